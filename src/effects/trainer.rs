//! Trainer-card effects.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

use super::fields::RawEffect;
use super::payload::{
    decode, encode, Amount, CardSearch, CureStatus, EnergyRetrieval, EnergyTransfer, Targeted,
    TargetedAmount, TradeCards,
};

/// An effect printed on a trainer card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEffect", into = "RawEffect")]
pub enum TrainerEffect {
    DrawCards(Amount),
    Heal(TargetedAmount),
    SearchDeck(CardSearch),
    SwitchActive(Targeted),
    CureStatus(CureStatus),
    /// Discard the whole hand.
    DiscardHand,
    DiscardEnergy(EnergyTransfer),
    TradeCards(TradeCards),
    RetrieveFromDiscard(CardSearch),
    RetrieveEnergy(EnergyRetrieval),
    IncreaseDamage(Amount),
    ReduceDamage(Amount),
    LookAtDeck(TargetedAmount),
}

impl TrainerEffect {
    /// Every trainer-effect discriminant.
    pub const EFFECT_TYPES: &'static [&'static str] = &[
        "DRAW_CARDS",
        "HEAL",
        "SEARCH_DECK",
        "SWITCH_ACTIVE",
        "CURE_STATUS",
        "DISCARD_HAND",
        "DISCARD_ENERGY",
        "TRADE_CARDS",
        "RETRIEVE_FROM_DISCARD",
        "RETRIEVE_ENERGY",
        "INCREASE_DAMAGE",
        "REDUCE_DAMAGE",
        "LOOK_AT_DECK",
    ];

    /// Wire discriminant.
    #[must_use]
    pub fn effect_type(&self) -> &'static str {
        match self {
            TrainerEffect::DrawCards(_) => "DRAW_CARDS",
            TrainerEffect::Heal(_) => "HEAL",
            TrainerEffect::SearchDeck(_) => "SEARCH_DECK",
            TrainerEffect::SwitchActive(_) => "SWITCH_ACTIVE",
            TrainerEffect::CureStatus(_) => "CURE_STATUS",
            TrainerEffect::DiscardHand => "DISCARD_HAND",
            TrainerEffect::DiscardEnergy(_) => "DISCARD_ENERGY",
            TrainerEffect::TradeCards(_) => "TRADE_CARDS",
            TrainerEffect::RetrieveFromDiscard(_) => "RETRIEVE_FROM_DISCARD",
            TrainerEffect::RetrieveEnergy(_) => "RETRIEVE_ENERGY",
            TrainerEffect::IncreaseDamage(_) => "INCREASE_DAMAGE",
            TrainerEffect::ReduceDamage(_) => "REDUCE_DAMAGE",
            TrainerEffect::LookAtDeck(_) => "LOOK_AT_DECK",
        }
    }
}

impl TryFrom<&RawEffect> for TrainerEffect {
    type Error = ValidationError;

    fn try_from(raw: &RawEffect) -> Result<Self, Self::Error> {
        Ok(match raw.effect_type.as_str() {
            "DRAW_CARDS" => TrainerEffect::DrawCards(decode(raw)?),
            "HEAL" => TrainerEffect::Heal(decode(raw)?),
            "SEARCH_DECK" => TrainerEffect::SearchDeck(decode(raw)?),
            "SWITCH_ACTIVE" => TrainerEffect::SwitchActive(decode(raw)?),
            "CURE_STATUS" => TrainerEffect::CureStatus(decode(raw)?),
            "DISCARD_HAND" => {
                decode::<()>(raw)?;
                TrainerEffect::DiscardHand
            }
            "DISCARD_ENERGY" => TrainerEffect::DiscardEnergy(decode(raw)?),
            "TRADE_CARDS" => TrainerEffect::TradeCards(decode(raw)?),
            "RETRIEVE_FROM_DISCARD" => TrainerEffect::RetrieveFromDiscard(decode(raw)?),
            "RETRIEVE_ENERGY" => TrainerEffect::RetrieveEnergy(decode(raw)?),
            "INCREASE_DAMAGE" => TrainerEffect::IncreaseDamage(decode(raw)?),
            "REDUCE_DAMAGE" => TrainerEffect::ReduceDamage(decode(raw)?),
            "LOOK_AT_DECK" => TrainerEffect::LookAtDeck(decode(raw)?),
            other => return Err(ValidationError::invalid_enum("effectType", other)),
        })
    }
}

impl TryFrom<RawEffect> for TrainerEffect {
    type Error = ValidationError;

    fn try_from(raw: RawEffect) -> Result<Self, Self::Error> {
        TrainerEffect::try_from(&raw)
    }
}

impl From<&TrainerEffect> for RawEffect {
    fn from(effect: &TrainerEffect) -> Self {
        let kind = effect.effect_type();
        match effect {
            TrainerEffect::DrawCards(p)
            | TrainerEffect::IncreaseDamage(p)
            | TrainerEffect::ReduceDamage(p) => encode(kind, p),
            TrainerEffect::Heal(p) | TrainerEffect::LookAtDeck(p) => encode(kind, p),
            TrainerEffect::SearchDeck(p) | TrainerEffect::RetrieveFromDiscard(p) => encode(kind, p),
            TrainerEffect::SwitchActive(p) => encode(kind, p),
            TrainerEffect::CureStatus(p) => encode(kind, p),
            TrainerEffect::DiscardHand => encode(kind, &()),
            TrainerEffect::DiscardEnergy(p) => encode(kind, p),
            TrainerEffect::TradeCards(p) => encode(kind, p),
            TrainerEffect::RetrieveEnergy(p) => encode(kind, p),
        }
    }
}

impl From<TrainerEffect> for RawEffect {
    fn from(effect: TrainerEffect) -> Self {
        RawEffect::from(&effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discard_hand_has_no_payload() {
        let raw = RawEffect::new("DISCARD_HAND");
        assert_eq!(TrainerEffect::try_from(&raw).unwrap(), TrainerEffect::DiscardHand);
        assert_eq!(RawEffect::from(&TrainerEffect::DiscardHand), raw);
    }

    #[test]
    fn test_trade_cards_requires_both_amounts() {
        let raw = RawEffect::new("TRADE_CARDS").with("discardAmount", 2i64);
        let err = TrainerEffect::try_from(&raw).unwrap_err();
        assert_eq!(err, ValidationError::missing("TRADE_CARDS", "searchAmount"));
    }

    #[test]
    fn test_trainer_json() {
        let effect: TrainerEffect =
            serde_json::from_str(r#"{"effectType":"HEAL","amount":30,"target":"ALL_OWN"}"#).unwrap();
        assert_eq!(effect.effect_type(), "HEAL");

        let bad: Result<TrainerEffect, _> =
            serde_json::from_str(r#"{"effectType":"HEAL","amount":30}"#);
        assert!(bad.unwrap_err().to_string().contains("target"));
    }
}
