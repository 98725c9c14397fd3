//! Balance calculator.
//!
//! Produces a deterministic 0-100 strength score for a Pokémon card from
//! its HP, attacks and ability, with named penalties and bonuses so a
//! designer can see why a card scored the way it did.
//!
//! ## Key Types
//!
//! - `StrengthCalculator`: scores cards under a `BalanceConfig`
//! - `CardStrengthResult`: total, category and per-factor breakdown
//! - `BalanceConfig`: every threshold and constant the scorer uses

pub mod attack_score;
pub mod calculator;
pub mod config;
pub mod result;

pub use attack_score::{score_attack, AttackScore};
pub use calculator::{calculate_strength, StrengthCalculator};
pub use config::{BalanceConfig, CategoryThresholds, EvolutionLine};
pub use result::{BalanceCategory, Bonuses, CardStrengthResult, Penalties, StrengthBreakdown};
