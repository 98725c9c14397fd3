//! Card rule system.
//!
//! Card rules are passive modifiers printed on a card. This module stores,
//! validates and orders them; it never applies them.
//!
//! - `Condition`: when a rule or effect is active
//! - `RuleRecord`: an unchecked rule, as written in JSON or by hand
//! - `CardRule`: one validated rule (kind, text, conditions, priority, metadata)
//! - `RuleSet`: a validated list with type and priority queries

pub mod condition;
pub mod rule;
pub mod set;

pub use condition::{Condition, ConditionRecord};
pub use rule::{
    CardRule, MetaField, MetaKind, RuleCategory, RulePriority, RuleRecord, RuleType,
};
pub use set::RuleSet;
