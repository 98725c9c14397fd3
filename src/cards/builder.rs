//! Step-by-step card assembly.
//!
//! Common setters work on every card. Type-gated setters fail with
//! `CardError::WrongCardType` when the card's type does not carry that
//! attribute, so an import pipeline learns about a misfiled field instead
//! of silently dropping it.

use crate::core::{
    CardType, EnergyKind, EnergyType, EvolutionStage, Resistance, TrainerKind, Vocabulary, Weakness,
};
use crate::effects::TrainerEffect;
use crate::error::{CardError, ValidationError};
use crate::rules::{RuleRecord, RuleSet};

use super::ability::Ability;
use super::attack::Attack;
use super::card::{Card, CardDetails, EnergyDetails, PokemonDetails, TrainerDetails};
use super::energy::EnergyProvision;
use super::evolution::Evolution;

/// Builder for `Card`.
///
/// ## Example
///
/// ```
/// use rust_tcg::cards::Card;
/// use rust_tcg::core::{CardType, TrainerKind};
///
/// let potion = Card::builder("inst-9", "base1-94", CardType::Trainer, "Potion")
///     .with_trainer_kind(TrainerKind::Item)
///     .unwrap()
///     .build();
/// assert_eq!(potion.trainer_kind(), Some(TrainerKind::Item));
///
/// let err = Card::builder("inst-9", "base1-94", CardType::Trainer, "Potion")
///     .with_hp(30)
///     .unwrap_err();
/// assert!(err.is_recoverable());
/// ```
#[derive(Clone, Debug)]
pub struct CardBuilder {
    card: Card,
}

impl CardBuilder {
    pub(super) fn new(instance_id: String, card_id: String, card_type: CardType, name: String) -> Self {
        Self {
            card: Card {
                instance_id,
                card_id,
                name,
                number: None,
                rarity: None,
                artist: None,
                description: None,
                image_url: None,
                rules: RuleSet::empty(),
                details: CardDetails::empty(card_type),
            },
        }
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Card {
        self.card
    }

    // === Common ===

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.card.name = name.into();
        self
    }

    #[must_use]
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.card.number = Some(number.into());
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: impl Into<String>) -> Self {
        self.card.rarity = Some(rarity.into());
        self
    }

    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.card.artist = Some(artist.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.card.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.card.image_url = Some(image_url.into());
        self
    }

    /// Replace the card rules. The whole list is validated first and
    /// every violation is reported; a partial list is never installed.
    pub fn with_card_rules(
        mut self,
        rules: impl IntoIterator<Item = RuleRecord>,
    ) -> Result<Self, CardError> {
        self.card.rules = RuleSet::new(rules)?;
        Ok(self)
    }

    /// Install an already validated rule set.
    #[must_use]
    pub fn with_rule_set(mut self, rules: RuleSet) -> Self {
        self.card.rules = rules;
        self
    }

    // === Type gates ===

    fn wrong_type(field: &'static str, expected: CardType, actual: CardType) -> CardError {
        CardError::WrongCardType {
            field,
            expected: expected.as_str(),
            actual: actual.as_str(),
        }
    }

    fn pokemon_mut(&mut self, field: &'static str) -> Result<&mut PokemonDetails, CardError> {
        let actual = self.card.card_type();
        match &mut self.card.details {
            CardDetails::Pokemon(details) => Ok(details),
            _ => Err(Self::wrong_type(field, CardType::Pokemon, actual)),
        }
    }

    fn trainer_mut(&mut self, field: &'static str) -> Result<&mut TrainerDetails, CardError> {
        let actual = self.card.card_type();
        match &mut self.card.details {
            CardDetails::Trainer(details) => Ok(details),
            _ => Err(Self::wrong_type(field, CardType::Trainer, actual)),
        }
    }

    fn energy_mut(&mut self, field: &'static str) -> Result<&mut EnergyDetails, CardError> {
        let actual = self.card.card_type();
        match &mut self.card.details {
            CardDetails::Energy(details) => Ok(details),
            _ => Err(Self::wrong_type(field, CardType::Energy, actual)),
        }
    }

    // === Pokémon ===

    pub fn with_energy_type(mut self, energy_type: EnergyType) -> Result<Self, CardError> {
        self.pokemon_mut("energyType")?.energy_type = Some(energy_type);
        Ok(self)
    }

    pub fn with_stage(mut self, stage: EvolutionStage) -> Result<Self, CardError> {
        self.pokemon_mut("evolutionStage")?.stage = Some(stage);
        Ok(self)
    }

    pub fn with_level(mut self, level: u32) -> Result<Self, CardError> {
        self.pokemon_mut("level")?.level = Some(level);
        Ok(self)
    }

    /// Set printed HP. Must be at least 1.
    pub fn with_hp(mut self, hp: u32) -> Result<Self, CardError> {
        let details = self.pokemon_mut("hp")?;
        if hp == 0 {
            return Err(ValidationError::invariant("Card", "hp must be >= 1").into());
        }
        details.hp = Some(hp);
        Ok(self)
    }

    pub fn with_retreat_cost(mut self, retreat_cost: u32) -> Result<Self, CardError> {
        self.pokemon_mut("retreatCost")?.retreat_cost = Some(retreat_cost);
        Ok(self)
    }

    pub fn with_weakness(mut self, weakness: Weakness) -> Result<Self, CardError> {
        self.pokemon_mut("weakness")?.weakness = Some(weakness);
        Ok(self)
    }

    pub fn with_resistance(mut self, resistance: Resistance) -> Result<Self, CardError> {
        self.pokemon_mut("resistance")?.resistance = Some(resistance);
        Ok(self)
    }

    pub fn with_ability(mut self, ability: Ability) -> Result<Self, CardError> {
        self.pokemon_mut("ability")?.ability = Some(ability);
        Ok(self)
    }

    /// Append one attack.
    pub fn with_attack(mut self, attack: Attack) -> Result<Self, CardError> {
        self.pokemon_mut("attacks")?.attacks.push(attack);
        Ok(self)
    }

    /// Replace all attacks.
    pub fn with_attacks(
        mut self,
        attacks: impl IntoIterator<Item = Attack>,
    ) -> Result<Self, CardError> {
        self.pokemon_mut("attacks")?.attacks = attacks.into_iter().collect();
        Ok(self)
    }

    pub fn with_evolution(mut self, evolution: Evolution) -> Result<Self, CardError> {
        self.pokemon_mut("evolution")?.evolution = Some(evolution);
        Ok(self)
    }

    // === Trainer ===

    pub fn with_trainer_kind(mut self, kind: TrainerKind) -> Result<Self, CardError> {
        self.trainer_mut("trainerType")?.trainer_kind = Some(kind);
        Ok(self)
    }

    /// Replace all trainer effects.
    pub fn with_trainer_effects(
        mut self,
        effects: impl IntoIterator<Item = TrainerEffect>,
    ) -> Result<Self, CardError> {
        self.trainer_mut("trainerEffects")?.effects = effects.into_iter().collect();
        Ok(self)
    }

    // === Energy ===

    pub fn with_energy_kind(mut self, kind: EnergyKind) -> Result<Self, CardError> {
        self.energy_mut("energyKind")?.energy_kind = Some(kind);
        Ok(self)
    }

    pub fn with_energy_provision(mut self, provision: EnergyProvision) -> Result<Self, CardError> {
        self.energy_mut("energyProvision")?.provision = Some(provision);
        Ok(self)
    }
}
