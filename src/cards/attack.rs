//! Attacks printed on Pokémon cards.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{DamageExpr, EnergyType};
use crate::effects::AttackEffect;
use crate::error::ValidationError;

/// Energy symbols an attack costs. Real cards print at most five.
pub type EnergyCost = SmallVec<[EnergyType; 4]>;

/// An attack: name, energy cost, damage and effects.
///
/// ## Example
///
/// ```
/// use rust_tcg::cards::Attack;
/// use rust_tcg::core::EnergyType;
/// use smallvec::smallvec;
///
/// let ember = Attack::new("Ember", smallvec![EnergyType::Fire, EnergyType::Colorless], "30", None)
///     .unwrap()
///     .with_text("Discard 1 Fire Energy attached to Charmander.");
///
/// assert_eq!(ember.energy_cost(), 2);
/// assert_eq!(ember.average_damage(), 30.0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AttackRecord", into = "AttackRecord")]
pub struct Attack {
    name: String,
    cost: EnergyCost,
    damage: Option<DamageExpr>,
    text: Option<String>,
    effects: Vec<AttackEffect>,
}

impl Attack {
    /// Build an attack. Empty `damage` text means the attack deals none.
    ///
    /// `energy_bonus_cap` overrides the default cap of a `"<n>+"` attack and
    /// is rejected for any other damage form.
    pub fn new(
        name: impl Into<String>,
        cost: EnergyCost,
        damage: &str,
        energy_bonus_cap: Option<u32>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::invariant("Attack", "name must not be empty"));
        }

        let damage = match damage.trim() {
            "" => None,
            text => Some(DamageExpr::parse(text)?),
        };
        let damage = match (damage, energy_bonus_cap) {
            (Some(expr), Some(cap)) => Some(expr.with_energy_bonus_cap(cap)?),
            (None, Some(_)) => {
                return Err(ValidationError::invariant(
                    "Attack",
                    "energyBonusCap given for an attack without damage",
                ))
            }
            (damage, None) => damage,
        };

        Ok(Self {
            name,
            cost,
            damage,
            text: None,
            effects: Vec::new(),
        })
    }

    /// Set the rules text (builder pattern).
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Add one effect.
    #[must_use]
    pub fn with_effect(mut self, effect: AttackEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Replace all effects.
    #[must_use]
    pub fn with_effects(mut self, effects: impl IntoIterator<Item = AttackEffect>) -> Self {
        self.effects = effects.into_iter().collect();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn cost(&self) -> &[EnergyType] {
        &self.cost
    }

    #[must_use]
    pub fn damage(&self) -> Option<&DamageExpr> {
        self.damage.as_ref()
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[must_use]
    pub fn effects(&self) -> &[AttackEffect] {
        &self.effects
    }

    /// Number of energy symbols in the cost.
    #[must_use]
    pub fn energy_cost(&self) -> u32 {
        u32::try_from(self.cost.len()).unwrap_or(u32::MAX)
    }

    /// Expected damage, 0 for attacks without damage.
    #[must_use]
    pub fn average_damage(&self) -> f64 {
        self.damage.as_ref().map_or(0.0, DamageExpr::expected_value)
    }
}

/// Wire shape of an attack.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttackRecord {
    name: String,
    #[serde(default)]
    cost: EnergyCost,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    damage: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    energy_bonus_cap: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    effects: Vec<AttackEffect>,
}

impl TryFrom<AttackRecord> for Attack {
    type Error = ValidationError;

    fn try_from(record: AttackRecord) -> Result<Self, Self::Error> {
        let mut attack = Attack::new(record.name, record.cost, &record.damage, record.energy_bonus_cap)?
            .with_effects(record.effects);
        attack.text = record.text;
        Ok(attack)
    }
}

impl From<Attack> for AttackRecord {
    fn from(attack: Attack) -> Self {
        let energy_bonus_cap = match attack.damage {
            Some(DamageExpr::EnergyBonus { cap, .. }) => Some(cap),
            _ => None,
        };
        AttackRecord {
            name: attack.name,
            cost: attack.cost,
            damage: attack.damage.map(|d| d.to_string()).unwrap_or_default(),
            energy_bonus_cap,
            text: attack.text,
            effects: attack.effects,
        }
    }
}
