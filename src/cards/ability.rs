//! Abilities printed on Pokémon cards.

use serde::{Deserialize, Serialize};

use crate::core::AbilityKind;
use crate::effects::AbilityEffect;
use crate::error::ValidationError;

/// An ability (Ability, Poké-Power or Poké-Body).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AbilityRecord", into = "AbilityRecord")]
pub struct Ability {
    name: String,
    text: String,
    kind: AbilityKind,
    effects: Vec<AbilityEffect>,
}

impl Ability {
    /// Build an ability. Name and text must not be empty.
    pub fn new(
        name: impl Into<String>,
        text: impl Into<String>,
        kind: AbilityKind,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let text = text.into();
        if name.trim().is_empty() {
            return Err(ValidationError::invariant("Ability", "name must not be empty"));
        }
        if text.trim().is_empty() {
            return Err(ValidationError::invariant("Ability", "text must not be empty"));
        }
        Ok(Self {
            name,
            text,
            kind,
            effects: Vec::new(),
        })
    }

    /// Add one effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: AbilityEffect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn kind(&self) -> AbilityKind {
        self.kind
    }

    #[must_use]
    pub fn effects(&self) -> &[AbilityEffect] {
        &self.effects
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbilityRecord {
    name: String,
    text: String,
    #[serde(rename = "abilityType", default = "default_kind")]
    kind: AbilityKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    effects: Vec<AbilityEffect>,
}

fn default_kind() -> AbilityKind {
    AbilityKind::Ability
}

impl TryFrom<AbilityRecord> for Ability {
    type Error = ValidationError;

    fn try_from(record: AbilityRecord) -> Result<Self, Self::Error> {
        let mut ability = Ability::new(record.name, record.text, record.kind)?;
        ability.effects = record.effects;
        Ok(ability)
    }
}

impl From<Ability> for AbilityRecord {
    fn from(ability: Ability) -> Self {
        AbilityRecord {
            name: ability.name,
            text: ability.text,
            kind: ability.kind,
            effects: ability.effects,
        }
    }
}
