//! Effect variant library.
//!
//! Effects describe what rule text does; they never execute anything.
//! A separate game engine interprets them.
//!
//! - `AttackEffect`: effects printed on attacks
//! - `AbilityEffect`: effects printed on abilities
//! - `TrainerEffect`: effects printed on trainer cards
//!
//! ## Design Philosophy
//!
//! Each union is closed: one discriminant selects exactly one payload shape,
//! so a missing or contradictory field combination cannot be represented.
//! Adding a discriminant is a breaking change that the compiler walks you
//! through (construction, encoding, scoring).
//!
//! Records from the import pipeline (`RawEffect`) become effects through
//! `TryFrom`, which names the offending field on failure.

mod ability;
mod attack;
pub mod fields;
pub mod payload;
mod trainer;

pub use ability::AbilityEffect;
pub use attack::AttackEffect;
pub use fields::{FieldReader, FieldValue, Fields, RawEffect};
pub use payload::{
    Amount, CardSearch, CureStatus, DamageModifier, EffectPayload, EnergyAcceleration,
    EnergyRetrieval, EnergyTransfer, InflictStatus, MoveDamageCounters, PreventDamage, Targeted,
    TargetedAmount, TradeCards,
};
pub use trainer::TrainerEffect;
