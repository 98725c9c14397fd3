//! Core card vocabulary.
//!
//! - `types`: closed enums (energy, card type, stage, targets, ...)
//! - `damage`: the damage mini-language (`"30"`, `"20×"`, `"40+"`, `"30+20"`)
//! - `modifiers`: weakness and resistance

pub mod damage;
pub mod modifiers;
pub mod types;

pub use damage::{DamageExpr, DEFAULT_ENERGY_BONUS_CAP, ENERGY_BONUS_STEP};
pub use modifiers::{ModifierRecord, Resistance, Weakness, WeaknessModifier};
pub use types::{
    AbilityKind, CardType, EffectTarget, EnergyKind, EnergySource, EnergyType, EvolutionStage,
    SpecialCondition, TrainerKind, Vocabulary,
};
