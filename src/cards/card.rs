//! The card aggregate.
//!
//! A `Card` owns everything printed on one card: identity, display data,
//! card rules, and the attributes of its card type. Type-specific data
//! lives in `CardDetails`, so a trainer can never carry HP and a Pokémon
//! can never carry trainer effects.
//!
//! Cards are assembled with `CardBuilder` and immutable afterwards. JSON
//! input is read into a flat `CardRecord` and replayed through the same
//! builder, so imported cards pass the same type gates.

use serde::{Deserialize, Serialize};

use crate::core::{
    CardType, EnergyKind, EnergyType, EvolutionStage, Resistance, TrainerKind, Weakness,
};
use crate::effects::TrainerEffect;
use crate::error::CardError;
use crate::rules::{CardRule, RuleRecord, RuleSet, RuleType};

use super::ability::Ability;
use super::attack::Attack;
use super::builder::CardBuilder;
use super::energy::EnergyProvision;
use super::evolution::Evolution;

/// Attributes only Pokémon cards have.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_type: Option<EnergyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<EvolutionStage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retreat_cost: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weakness: Option<Weakness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resistance: Option<Resistance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<Ability>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attacks: Vec<Attack>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evolution: Option<Evolution>,
}

/// Attributes only trainer cards have.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerDetails {
    #[serde(default, rename = "trainerType", skip_serializing_if = "Option::is_none")]
    pub trainer_kind: Option<TrainerKind>,
    #[serde(default, rename = "trainerEffects", skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<TrainerEffect>,
}

/// Attributes only energy cards have.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_kind: Option<EnergyKind>,
    #[serde(default, rename = "energyProvision", skip_serializing_if = "Option::is_none")]
    pub provision: Option<EnergyProvision>,
}

/// Type-specific attributes, tagged by card type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cardType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardDetails {
    Pokemon(PokemonDetails),
    Trainer(TrainerDetails),
    Energy(EnergyDetails),
}

impl CardDetails {
    /// Empty attributes for a card type.
    #[must_use]
    pub fn empty(card_type: CardType) -> Self {
        match card_type {
            CardType::Pokemon => CardDetails::Pokemon(PokemonDetails::default()),
            CardType::Trainer => CardDetails::Trainer(TrainerDetails::default()),
            CardType::Energy => CardDetails::Energy(EnergyDetails::default()),
        }
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        match self {
            CardDetails::Pokemon(_) => CardType::Pokemon,
            CardDetails::Trainer(_) => CardType::Trainer,
            CardDetails::Energy(_) => CardType::Energy,
        }
    }
}

/// A fully assembled card.
///
/// ## Example
///
/// ```
/// use rust_tcg::cards::Card;
/// use rust_tcg::core::{CardType, EvolutionStage};
///
/// let card = Card::builder("inst-1", "base1-46", CardType::Pokemon, "Charmander")
///     .with_hp(50).unwrap()
///     .with_stage(EvolutionStage::Basic).unwrap()
///     .build();
///
/// assert_eq!(card.hp(), Some(50));
/// assert!(card.can_retreat());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CardRecord")]
pub struct Card {
    pub(super) instance_id: String,
    pub(super) card_id: String,
    pub(super) name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) rarity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) image_url: Option<String>,
    #[serde(default, rename = "cardRules", skip_serializing_if = "RuleSet::is_empty")]
    pub(super) rules: RuleSet,
    #[serde(flatten)]
    pub(super) details: CardDetails,
}

impl Card {
    /// Start building a card of the given type.
    #[must_use]
    pub fn builder(
        instance_id: impl Into<String>,
        card_id: impl Into<String>,
        card_type: CardType,
        name: impl Into<String>,
    ) -> CardBuilder {
        CardBuilder::new(instance_id.into(), card_id.into(), card_type, name.into())
    }

    // === Identity and display ===

    #[must_use]
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    #[must_use]
    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.details.card_type()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn number(&self) -> Option<&str> {
        self.number.as_deref()
    }

    #[must_use]
    pub fn rarity(&self) -> Option<&str> {
        self.rarity.as_deref()
    }

    #[must_use]
    pub fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    #[must_use]
    pub fn details(&self) -> &CardDetails {
        &self.details
    }

    // === Type-specific views ===

    /// Pokémon attributes, if this is a Pokémon card.
    #[must_use]
    pub fn pokemon(&self) -> Option<&PokemonDetails> {
        match &self.details {
            CardDetails::Pokemon(p) => Some(p),
            _ => None,
        }
    }

    /// Trainer attributes, if this is a trainer card.
    #[must_use]
    pub fn trainer(&self) -> Option<&TrainerDetails> {
        match &self.details {
            CardDetails::Trainer(t) => Some(t),
            _ => None,
        }
    }

    /// Energy attributes, if this is an energy card.
    #[must_use]
    pub fn energy(&self) -> Option<&EnergyDetails> {
        match &self.details {
            CardDetails::Energy(e) => Some(e),
            _ => None,
        }
    }

    #[must_use]
    pub fn hp(&self) -> Option<u32> {
        self.pokemon().and_then(|p| p.hp)
    }

    #[must_use]
    pub fn stage(&self) -> Option<EvolutionStage> {
        self.pokemon().and_then(|p| p.stage)
    }

    #[must_use]
    pub fn energy_type(&self) -> Option<EnergyType> {
        self.pokemon().and_then(|p| p.energy_type)
    }

    #[must_use]
    pub fn level(&self) -> Option<u32> {
        self.pokemon().and_then(|p| p.level)
    }

    #[must_use]
    pub fn retreat_cost(&self) -> Option<u32> {
        self.pokemon().and_then(|p| p.retreat_cost)
    }

    #[must_use]
    pub fn weakness(&self) -> Option<&Weakness> {
        self.pokemon().and_then(|p| p.weakness.as_ref())
    }

    #[must_use]
    pub fn resistance(&self) -> Option<&Resistance> {
        self.pokemon().and_then(|p| p.resistance.as_ref())
    }

    #[must_use]
    pub fn ability(&self) -> Option<&Ability> {
        self.pokemon().and_then(|p| p.ability.as_ref())
    }

    /// Attacks, empty for non-Pokémon cards.
    #[must_use]
    pub fn attacks(&self) -> &[Attack] {
        self.pokemon().map_or(&[][..], |p| p.attacks.as_slice())
    }

    #[must_use]
    pub fn evolution(&self) -> Option<&Evolution> {
        self.pokemon().and_then(|p| p.evolution.as_ref())
    }

    #[must_use]
    pub fn trainer_kind(&self) -> Option<TrainerKind> {
        self.trainer().and_then(|t| t.trainer_kind)
    }

    /// Trainer effects, empty for non-trainer cards.
    #[must_use]
    pub fn trainer_effects(&self) -> &[TrainerEffect] {
        self.trainer().map_or(&[][..], |t| t.effects.as_slice())
    }

    #[must_use]
    pub fn energy_kind(&self) -> Option<EnergyKind> {
        self.energy().and_then(|e| e.energy_kind)
    }

    #[must_use]
    pub fn energy_provision(&self) -> Option<&EnergyProvision> {
        self.energy().and_then(|e| e.provision.as_ref())
    }

    // === Card rules ===

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[must_use]
    pub fn has_rules(&self) -> bool {
        !self.rules.is_empty()
    }

    #[must_use]
    pub fn has_rule_type(&self, rule_type: RuleType) -> bool {
        self.rules.has_rule_type(rule_type)
    }

    #[must_use]
    pub fn rules_by_type(&self, rule_type: RuleType) -> Vec<&CardRule> {
        self.rules.by_type(rule_type)
    }

    /// Rules highest priority first; ties keep their printed order.
    #[must_use]
    pub fn rules_by_priority(&self) -> Vec<&CardRule> {
        self.rules.by_priority()
    }

    /// False when a CANNOT_RETREAT rule is printed on the card.
    #[must_use]
    pub fn can_retreat(&self) -> bool {
        !self.has_rule_type(RuleType::CannotRetreat)
    }

    /// False when a CANNOT_ATTACK rule is printed on the card.
    #[must_use]
    pub fn can_attack(&self) -> bool {
        !self.has_rule_type(RuleType::CannotAttack)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.card_type(), self.card_id)
    }
}

/// Flat, unchecked JSON form of a card.
///
/// Every type-specific field is optional here; `Card::try_from` hands each
/// one to the matching `CardBuilder` setter, so a field that does not
/// belong to `cardType` is a `WrongCardType` error.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CardRecord {
    pub instance_id: String,
    pub card_id: String,
    pub card_type: CardType,
    pub name: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub card_rules: Vec<RuleRecord>,

    // Pokémon
    #[serde(default)]
    pub energy_type: Option<EnergyType>,
    #[serde(default)]
    pub stage: Option<EvolutionStage>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub hp: Option<u32>,
    #[serde(default)]
    pub retreat_cost: Option<u32>,
    #[serde(default)]
    pub weakness: Option<Weakness>,
    #[serde(default)]
    pub resistance: Option<Resistance>,
    #[serde(default)]
    pub ability: Option<Ability>,
    #[serde(default)]
    pub attacks: Option<Vec<Attack>>,
    #[serde(default)]
    pub evolution: Option<Evolution>,

    // Trainer
    #[serde(default)]
    pub trainer_type: Option<TrainerKind>,
    #[serde(default)]
    pub trainer_effects: Option<Vec<TrainerEffect>>,

    // Energy
    #[serde(default)]
    pub energy_kind: Option<EnergyKind>,
    #[serde(default)]
    pub energy_provision: Option<EnergyProvision>,
}

impl TryFrom<CardRecord> for Card {
    type Error = CardError;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        let mut builder =
            Card::builder(record.instance_id, record.card_id, record.card_type, record.name);

        if !record.card_rules.is_empty() {
            builder = builder.with_card_rules(record.card_rules)?;
        }
        if let Some(number) = record.number {
            builder = builder.with_number(number);
        }
        if let Some(rarity) = record.rarity {
            builder = builder.with_rarity(rarity);
        }
        if let Some(artist) = record.artist {
            builder = builder.with_artist(artist);
        }
        if let Some(description) = record.description {
            builder = builder.with_description(description);
        }
        if let Some(image_url) = record.image_url {
            builder = builder.with_image_url(image_url);
        }

        if let Some(energy_type) = record.energy_type {
            builder = builder.with_energy_type(energy_type)?;
        }
        if let Some(stage) = record.stage {
            builder = builder.with_stage(stage)?;
        }
        if let Some(level) = record.level {
            builder = builder.with_level(level)?;
        }
        if let Some(hp) = record.hp {
            builder = builder.with_hp(hp)?;
        }
        if let Some(retreat_cost) = record.retreat_cost {
            builder = builder.with_retreat_cost(retreat_cost)?;
        }
        if let Some(weakness) = record.weakness {
            builder = builder.with_weakness(weakness)?;
        }
        if let Some(resistance) = record.resistance {
            builder = builder.with_resistance(resistance)?;
        }
        if let Some(ability) = record.ability {
            builder = builder.with_ability(ability)?;
        }
        if let Some(attacks) = record.attacks {
            builder = builder.with_attacks(attacks)?;
        }
        if let Some(evolution) = record.evolution {
            builder = builder.with_evolution(evolution)?;
        }

        if let Some(kind) = record.trainer_type {
            builder = builder.with_trainer_kind(kind)?;
        }
        if let Some(effects) = record.trainer_effects {
            builder = builder.with_trainer_effects(effects)?;
        }

        if let Some(kind) = record.energy_kind {
            builder = builder.with_energy_kind(kind)?;
        }
        if let Some(provision) = record.energy_provision {
            builder = builder.with_energy_provision(provision)?;
        }

        Ok(builder.build())
    }
}
