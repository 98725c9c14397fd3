//! Attack effects.
//!
//! What an attack does besides its printed damage. Each variant owns
//! exactly the payload its discriminant requires; records arriving from the
//! import pipeline go through `TryFrom<RawEffect>`.

use serde::{Deserialize, Serialize};

use crate::core::EffectTarget;
use crate::error::ValidationError;

use super::fields::RawEffect;
use super::payload::{
    decode, encode, Amount, DamageModifier, EnergyAcceleration, EnergyTransfer, InflictStatus,
    MoveDamageCounters, PreventDamage, Targeted, TargetedAmount,
};

/// An effect printed on an attack.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEffect", into = "RawEffect")]
pub enum AttackEffect {
    /// Discard energy from a Pokémon (usually the attacker).
    DiscardEnergy(EnergyTransfer),
    /// Inflict a special condition.
    StatusCondition(InflictStatus),
    /// Adjust this attack's damage.
    DamageModifier(DamageModifier),
    Heal(TargetedAmount),
    PreventDamage(PreventDamage),
    /// Damage the attacker does to itself.
    RecoilDamage(Amount),
    EnergyAcceleration(EnergyAcceleration),
    SwitchPokemon(Targeted),
    MoveDamageCounter(MoveDamageCounters),
    /// Discard cards from a player's hand.
    DiscardCards(TargetedAmount),
    /// Target can't attack during its next turn.
    CannotAttack(Targeted),
    /// Target can't retreat during its next turn.
    CannotRetreat(Targeted),
}

impl AttackEffect {
    /// Every attack-effect discriminant.
    pub const EFFECT_TYPES: &'static [&'static str] = &[
        "DISCARD_ENERGY",
        "STATUS_CONDITION",
        "DAMAGE_MODIFIER",
        "HEAL",
        "PREVENT_DAMAGE",
        "RECOIL_DAMAGE",
        "ENERGY_ACCELERATION",
        "SWITCH_POKEMON",
        "MOVE_DAMAGE_COUNTER",
        "DISCARD_CARDS",
        "CANNOT_ATTACK",
        "CANNOT_RETREAT",
    ];

    /// Wire discriminant.
    #[must_use]
    pub fn effect_type(&self) -> &'static str {
        match self {
            AttackEffect::DiscardEnergy(_) => "DISCARD_ENERGY",
            AttackEffect::StatusCondition(_) => "STATUS_CONDITION",
            AttackEffect::DamageModifier(_) => "DAMAGE_MODIFIER",
            AttackEffect::Heal(_) => "HEAL",
            AttackEffect::PreventDamage(_) => "PREVENT_DAMAGE",
            AttackEffect::RecoilDamage(_) => "RECOIL_DAMAGE",
            AttackEffect::EnergyAcceleration(_) => "ENERGY_ACCELERATION",
            AttackEffect::SwitchPokemon(_) => "SWITCH_POKEMON",
            AttackEffect::MoveDamageCounter(_) => "MOVE_DAMAGE_COUNTER",
            AttackEffect::DiscardCards(_) => "DISCARD_CARDS",
            AttackEffect::CannotAttack(_) => "CANNOT_ATTACK",
            AttackEffect::CannotRetreat(_) => "CANNOT_RETREAT",
        }
    }

    /// The Pokémon the effect lands on.
    ///
    /// Recoil always hits the attacker. Moving damage counters reports the
    /// destination. Damage modifiers have no target.
    #[must_use]
    pub fn target(&self) -> Option<EffectTarget> {
        match self {
            AttackEffect::DiscardEnergy(p) => Some(p.target),
            AttackEffect::StatusCondition(p) => Some(p.target()),
            AttackEffect::DamageModifier(_) => None,
            AttackEffect::Heal(p) | AttackEffect::DiscardCards(p) => Some(p.target),
            AttackEffect::PreventDamage(p) => Some(p.target),
            AttackEffect::RecoilDamage(_) => Some(EffectTarget::SelfPokemon),
            AttackEffect::EnergyAcceleration(p) => Some(p.target),
            AttackEffect::SwitchPokemon(p)
            | AttackEffect::CannotAttack(p)
            | AttackEffect::CannotRetreat(p) => Some(p.target),
            AttackEffect::MoveDamageCounter(p) => Some(p.destination_target()),
        }
    }

    /// Whether the effect only happens on a coin flip.
    #[must_use]
    pub fn is_coin_flip(&self) -> bool {
        match self {
            AttackEffect::StatusCondition(p) => p.coin_flip(),
            AttackEffect::PreventDamage(p) => p.coin_flip,
            _ => false,
        }
    }

    /// Whether the effect lands on the attacker itself.
    #[must_use]
    pub fn targets_self(&self) -> bool {
        self.target() == Some(EffectTarget::SelfPokemon)
    }
}

impl TryFrom<&RawEffect> for AttackEffect {
    type Error = ValidationError;

    fn try_from(raw: &RawEffect) -> Result<Self, Self::Error> {
        Ok(match raw.effect_type.as_str() {
            "DISCARD_ENERGY" => AttackEffect::DiscardEnergy(decode(raw)?),
            "STATUS_CONDITION" => AttackEffect::StatusCondition(decode(raw)?),
            "DAMAGE_MODIFIER" => AttackEffect::DamageModifier(decode(raw)?),
            "HEAL" => AttackEffect::Heal(decode(raw)?),
            "PREVENT_DAMAGE" => AttackEffect::PreventDamage(decode(raw)?),
            "RECOIL_DAMAGE" => AttackEffect::RecoilDamage(decode(raw)?),
            "ENERGY_ACCELERATION" => AttackEffect::EnergyAcceleration(decode(raw)?),
            "SWITCH_POKEMON" => AttackEffect::SwitchPokemon(decode(raw)?),
            "MOVE_DAMAGE_COUNTER" => AttackEffect::MoveDamageCounter(decode(raw)?),
            "DISCARD_CARDS" => AttackEffect::DiscardCards(decode(raw)?),
            "CANNOT_ATTACK" => AttackEffect::CannotAttack(decode(raw)?),
            "CANNOT_RETREAT" => AttackEffect::CannotRetreat(decode(raw)?),
            other => return Err(ValidationError::invalid_enum("effectType", other)),
        })
    }
}

impl TryFrom<RawEffect> for AttackEffect {
    type Error = ValidationError;

    fn try_from(raw: RawEffect) -> Result<Self, Self::Error> {
        AttackEffect::try_from(&raw)
    }
}

impl From<&AttackEffect> for RawEffect {
    fn from(effect: &AttackEffect) -> Self {
        let kind = effect.effect_type();
        match effect {
            AttackEffect::DiscardEnergy(p) => encode(kind, p),
            AttackEffect::StatusCondition(p) => encode(kind, p),
            AttackEffect::DamageModifier(p) => encode(kind, p),
            AttackEffect::Heal(p) | AttackEffect::DiscardCards(p) => encode(kind, p),
            AttackEffect::PreventDamage(p) => encode(kind, p),
            AttackEffect::RecoilDamage(p) => encode(kind, p),
            AttackEffect::EnergyAcceleration(p) => encode(kind, p),
            AttackEffect::SwitchPokemon(p)
            | AttackEffect::CannotAttack(p)
            | AttackEffect::CannotRetreat(p) => encode(kind, p),
            AttackEffect::MoveDamageCounter(p) => encode(kind, p),
        }
    }
}

impl From<AttackEffect> for RawEffect {
    fn from(effect: AttackEffect) -> Self {
        RawEffect::from(&effect)
    }
}
