//! Closed vocabularies used on printed cards.
//!
//! Each enum has a fixed SCREAMING_SNAKE wire name per variant, shared by
//! serde and strum. Unknown text read through `Vocabulary::parse_field` is an
//! `InvalidEnumValue` naming the field it came from.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::error::ValidationError;

/// A closed vocabulary with one wire name per variant.
pub trait Vocabulary:
    Copy + Into<&'static str> + FromStr<Err = strum::ParseError> + VariantArray + 'static
{
    /// Record field this vocabulary is read from.
    const FIELD: &'static str;

    /// Wire name of this variant.
    fn as_str(self) -> &'static str {
        self.into()
    }

    /// Parse a wire name, reporting `FIELD` when it is unknown.
    fn parse_field(text: &str) -> Result<Self, ValidationError> {
        text.parse()
            .map_err(|_| ValidationError::invalid_enum(Self::FIELD, text))
    }
}

/// Energy type of a Pokémon, an attack cost token, or an energy card.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::VariantArray,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EnergyType {
    Grass,
    Fire,
    Water,
    Lightning,
    Psychic,
    Fighting,
    Darkness,
    Metal,
    Fairy,
    Dragon,
    Colorless,
}

impl Vocabulary for EnergyType {
    const FIELD: &'static str = "energyType";
}

/// Top-level card type. Gates which attributes a card may carry.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::VariantArray,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Pokemon,
    Trainer,
    Energy,
}

impl Vocabulary for CardType {
    const FIELD: &'static str = "cardType";
}

/// Evolution stage of a Pokémon.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::VariantArray,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EvolutionStage {
    Basic,
    #[serde(rename = "STAGE_1")]
    #[strum(serialize = "STAGE_1")]
    Stage1,
    #[serde(rename = "STAGE_2")]
    #[strum(serialize = "STAGE_2")]
    Stage2,
    Baby,
    Restored,
    LevelX,
}

impl Vocabulary for EvolutionStage {
    const FIELD: &'static str = "evolutionStage";
}

impl EvolutionStage {
    /// Deck-building investment weight: 1.0 / 0.5 / 0.33 for
    /// BASIC / STAGE_1 / STAGE_2, 1.0 for everything else.
    #[must_use]
    pub fn evolution_value(self) -> f64 {
        match self {
            EvolutionStage::Basic => 1.0,
            EvolutionStage::Stage1 => 0.5,
            EvolutionStage::Stage2 => 0.33,
            EvolutionStage::Baby | EvolutionStage::Restored | EvolutionStage::LevelX => 1.0,
        }
    }

    /// HP a typical card of this stage family prints.
    #[must_use]
    pub fn expected_hp(self) -> f64 {
        match self {
            EvolutionStage::Basic | EvolutionStage::Baby | EvolutionStage::Restored => 60.0,
            EvolutionStage::Stage1 => 80.0,
            EvolutionStage::Stage2 | EvolutionStage::LevelX => 100.0,
        }
    }
}

/// Kind of trainer card.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::VariantArray,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TrainerKind {
    Item,
    Supporter,
    Stadium,
    Tool,
}

impl Vocabulary for TrainerKind {
    const FIELD: &'static str = "trainerType";
}

/// Basic or special energy card.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::VariantArray,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EnergyKind {
    Basic,
    Special,
}

impl Vocabulary for EnergyKind {
    const FIELD: &'static str = "energyKind";
}

/// Special conditions an effect can inflict or cure.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::VariantArray,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialCondition {
    Asleep,
    Burned,
    Confused,
    Paralyzed,
    Poisoned,
}

impl Vocabulary for SpecialCondition {
    const FIELD: &'static str = "condition";
}

/// Who an effect applies to, from the acting card's point of view.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::VariantArray,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectTarget {
    /// The attacking / acting Pokémon itself.
    #[serde(rename = "SELF")]
    #[strum(serialize = "SELF")]
    SelfPokemon,
    /// The opponent's active Pokémon.
    Opponent,
    OwnBench,
    OpponentBench,
    AllOwn,
    AllOpponent,
}

impl Vocabulary for EffectTarget {
    const FIELD: &'static str = "target";
}

impl EffectTarget {
    /// Targets on the acting player's side of the table.
    #[must_use]
    pub const fn is_own_side(self) -> bool {
        matches!(
            self,
            EffectTarget::SelfPokemon | EffectTarget::OwnBench | EffectTarget::AllOwn
        )
    }

    /// Targets on the opponent's side of the table.
    #[must_use]
    pub const fn is_opponent_side(self) -> bool {
        !self.is_own_side()
    }
}

/// Where accelerated energy comes from.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::VariantArray,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EnergySource {
    Deck,
    Discard,
    Hand,
}

impl Vocabulary for EnergySource {
    const FIELD: &'static str = "source";
}

/// Flavour of a Pokémon's ability.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::VariantArray,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AbilityKind {
    Ability,
    PokePower,
    PokeBody,
}

impl Vocabulary for AbilityKind {
    const FIELD: &'static str = "abilityType";
}
