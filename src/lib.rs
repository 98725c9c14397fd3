//! # rust-tcg
//!
//! Trading-card rule text as validated data, plus a deterministic balance
//! scorer for Pokémon cards.
//!
//! ## Design Principles
//!
//! 1. **Valid or absent**: every value object validates on construction and
//!    is immutable afterwards. A failed construction names the offending
//!    field; nothing half-built escapes.
//!
//! 2. **Closed vocabularies**: effects, rules and conditions are sum types,
//!    so every consumer matches them exhaustively.
//!
//! 3. **Data, not behavior**: effects and rules describe what a card says.
//!    A separate game engine decides what that means at the table.
//!
//! ## Modules
//!
//! - `core`: energy types, stages, targets, damage text, weakness/resistance
//! - `effects`: attack, ability and trainer effects and their field records
//! - `rules`: conditions, card rules and validated rule sets
//! - `cards`: the card aggregate and its builder
//! - `balance`: the strength calculator
//! - `error`: validation, rule-set and card errors

pub mod balance;
pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    AbilityKind, CardType, DamageExpr, EffectTarget, EnergyKind, EnergySource, EnergyType,
    EvolutionStage, Resistance, SpecialCondition, TrainerKind, Weakness,
};

pub use crate::effects::{AbilityEffect, AttackEffect, FieldValue, RawEffect, TrainerEffect};

pub use crate::rules::{
    CardRule, Condition, RuleCategory, RulePriority, RuleRecord, RuleSet, RuleType,
};

pub use crate::cards::{Ability, Attack, Card, CardBuilder, EnergyProvision, Evolution};

pub use crate::balance::{
    calculate_strength, BalanceCategory, BalanceConfig, CardStrengthResult, StrengthCalculator,
};

pub use crate::error::{CardError, RuleSetError, RuleViolation, ValidationError};
