//! Ability effects.
//!
//! Abilities share several payloads with attacks (heal, status, switch,
//! damage-counter moves, energy acceleration) and add card-flow effects
//! of their own.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::fields::RawEffect;
use super::payload::{
    decode, encode, Amount, CardSearch, EnergyAcceleration, EnergyTransfer, InflictStatus,
    MoveDamageCounters, Targeted, TargetedAmount,
};

/// An effect printed on an ability.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEffect", into = "RawEffect")]
pub enum AbilityEffect {
    DrawCards(Amount),
    SearchDeck(CardSearch),
    Heal(TargetedAmount),
    StatusCondition(InflictStatus),
    SwitchPokemon(Targeted),
    MoveDamageCounter(MoveDamageCounters),
    EnergyAcceleration(EnergyAcceleration),
    /// Attacks do more damage.
    BoostAttack(Amount),
    /// Maximum HP is increased.
    BoostHp(Amount),
    /// Damage taken is reduced.
    ReduceDamage(Amount),
    DiscardFromHand(Amount),
    AttachFromDiscard(EnergyTransfer),
    RetrieveFromDiscard(CardSearch),
}

impl AbilityEffect {
    /// Every ability-effect discriminant.
    pub const EFFECT_TYPES: &'static [&'static str] = &[
        "DRAW_CARDS",
        "SEARCH_DECK",
        "HEAL",
        "STATUS_CONDITION",
        "SWITCH_POKEMON",
        "MOVE_DAMAGE_COUNTER",
        "ENERGY_ACCELERATION",
        "BOOST_ATTACK",
        "BOOST_HP",
        "REDUCE_DAMAGE",
        "DISCARD_FROM_HAND",
        "ATTACH_FROM_DISCARD",
        "RETRIEVE_FROM_DISCARD",
    ];

    /// Wire discriminant.
    #[must_use]
    pub fn effect_type(&self) -> &'static str {
        match self {
            AbilityEffect::DrawCards(_) => "DRAW_CARDS",
            AbilityEffect::SearchDeck(_) => "SEARCH_DECK",
            AbilityEffect::Heal(_) => "HEAL",
            AbilityEffect::StatusCondition(_) => "STATUS_CONDITION",
            AbilityEffect::SwitchPokemon(_) => "SWITCH_POKEMON",
            AbilityEffect::MoveDamageCounter(_) => "MOVE_DAMAGE_COUNTER",
            AbilityEffect::EnergyAcceleration(_) => "ENERGY_ACCELERATION",
            AbilityEffect::BoostAttack(_) => "BOOST_ATTACK",
            AbilityEffect::BoostHp(_) => "BOOST_HP",
            AbilityEffect::ReduceDamage(_) => "REDUCE_DAMAGE",
            AbilityEffect::DiscardFromHand(_) => "DISCARD_FROM_HAND",
            AbilityEffect::AttachFromDiscard(_) => "ATTACH_FROM_DISCARD",
            AbilityEffect::RetrieveFromDiscard(_) => "RETRIEVE_FROM_DISCARD",
        }
    }
}

impl TryFrom<&RawEffect> for AbilityEffect {
    type Error = ValidationError;

    fn try_from(raw: &RawEffect) -> Result<Self, Self::Error> {
        Ok(match raw.effect_type.as_str() {
            "DRAW_CARDS" => AbilityEffect::DrawCards(decode(raw)?),
            "SEARCH_DECK" => AbilityEffect::SearchDeck(decode(raw)?),
            "HEAL" => AbilityEffect::Heal(decode(raw)?),
            "STATUS_CONDITION" => AbilityEffect::StatusCondition(decode(raw)?),
            "SWITCH_POKEMON" => AbilityEffect::SwitchPokemon(decode(raw)?),
            "MOVE_DAMAGE_COUNTER" => AbilityEffect::MoveDamageCounter(decode(raw)?),
            "ENERGY_ACCELERATION" => AbilityEffect::EnergyAcceleration(decode(raw)?),
            "BOOST_ATTACK" => AbilityEffect::BoostAttack(decode(raw)?),
            "BOOST_HP" => AbilityEffect::BoostHp(decode(raw)?),
            "REDUCE_DAMAGE" => AbilityEffect::ReduceDamage(decode(raw)?),
            "DISCARD_FROM_HAND" => AbilityEffect::DiscardFromHand(decode(raw)?),
            "ATTACH_FROM_DISCARD" => AbilityEffect::AttachFromDiscard(decode(raw)?),
            "RETRIEVE_FROM_DISCARD" => AbilityEffect::RetrieveFromDiscard(decode(raw)?),
            other => return Err(ValidationError::invalid_enum("effectType", other)),
        })
    }
}

impl TryFrom<RawEffect> for AbilityEffect {
    type Error = ValidationError;

    fn try_from(raw: RawEffect) -> Result<Self, Self::Error> {
        AbilityEffect::try_from(&raw)
    }
}

impl From<&AbilityEffect> for RawEffect {
    fn from(effect: &AbilityEffect) -> Self {
        let kind = effect.effect_type();
        match effect {
            AbilityEffect::DrawCards(p)
            | AbilityEffect::BoostAttack(p)
            | AbilityEffect::BoostHp(p)
            | AbilityEffect::ReduceDamage(p)
            | AbilityEffect::DiscardFromHand(p) => encode(kind, p),
            AbilityEffect::SearchDeck(p) | AbilityEffect::RetrieveFromDiscard(p) => encode(kind, p),
            AbilityEffect::Heal(p) => encode(kind, p),
            AbilityEffect::StatusCondition(p) => encode(kind, p),
            AbilityEffect::SwitchPokemon(p) => encode(kind, p),
            AbilityEffect::MoveDamageCounter(p) => encode(kind, p),
            AbilityEffect::EnergyAcceleration(p) => encode(kind, p),
            AbilityEffect::AttachFromDiscard(p) => encode(kind, p),
        }
    }
}

impl From<AbilityEffect> for RawEffect {
    fn from(effect: AbilityEffect) -> Self {
        RawEffect::from(&effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_cards() {
        let effect = AbilityEffect::DrawCards(Amount::new(2).unwrap());
        let raw = RawEffect::from(&effect);
        assert_eq!(raw, RawEffect::new("DRAW_CARDS").with("amount", 2u32));
        assert_eq!(AbilityEffect::try_from(raw).unwrap(), effect);
    }

    #[test]
    fn test_search_deck_optional_filter() {
        let raw = RawEffect::new("SEARCH_DECK")
            .with("amount", 1i64)
            .with("cardFilter", "Basic Pokémon");
        match AbilityEffect::try_from(&raw).unwrap() {
            AbilityEffect::SearchDeck(search) => {
                assert_eq!(search.amount.get(), 1);
                assert_eq!(search.card_filter.as_deref(), Some("Basic Pokémon"));
            }
            _ => panic!("Expected SearchDeck"),
        }
    }

    #[test]
    fn test_attack_only_kind_rejected() {
        let raw = RawEffect::new("RECOIL_DAMAGE").with("amount", 10i64);
        assert!(AbilityEffect::try_from(&raw).is_err());
    }
}
