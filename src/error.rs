//! Error types for value-object construction.
//!
//! Every fallible constructor in this crate reports a `ValidationError`
//! naming the offending field. Rule sets aggregate per-rule failures into a
//! single `RuleSetError`, and the card builder wraps both in `CardError`.

use thiserror::Error;

/// A single construction failure.
///
/// `owner` is the discriminant or value object being built
/// (e.g. `"MOVE_DAMAGE_COUNTER"`, `"Attack"`), `field` the offending field.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{owner}: missing required field `{field}`")]
    MissingField { owner: String, field: String },

    #[error("invalid value `{value}` for `{field}`")]
    InvalidEnumValue { field: String, value: String },

    #[error("malformed `{field}`: `{value}`")]
    InvalidFormat { field: String, value: String },

    #[error("{owner}: field `{field}` must be {expected}")]
    WrongType {
        owner: String,
        field: String,
        expected: &'static str,
    },

    #[error("{owner}: unexpected field `{field}`")]
    UnexpectedField { owner: String, field: String },

    #[error("{owner}: {message}")]
    InvariantViolation { owner: String, message: String },
}

impl ValidationError {
    pub(crate) fn missing(owner: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingField {
            owner: owner.into(),
            field: field.into(),
        }
    }

    pub(crate) fn invalid_enum(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidEnumValue {
            field: field.into(),
            value: value.into(),
        }
    }

    pub(crate) fn invalid_format(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            value: value.into(),
        }
    }

    pub(crate) fn invariant(owner: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            owner: owner.into(),
            message: message.into(),
        }
    }

    /// The field this error is about, if it names one.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field, .. }
            | Self::InvalidEnumValue { field, .. }
            | Self::InvalidFormat { field, .. }
            | Self::WrongType { field, .. }
            | Self::UnexpectedField { field, .. } => Some(field),
            Self::InvariantViolation { .. } => None,
        }
    }
}

/// One offending rule inside a rejected rule list.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("rule #{index} ({rule_type}): {error}")]
pub struct RuleViolation {
    /// Position of the rule in the submitted list.
    pub index: usize,
    /// Wire name of the rule's kind.
    pub rule_type: &'static str,
    pub error: ValidationError,
}

/// Every violation found while validating a rule list.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{} invalid card rule(s): {}", violations.len(), summarize(violations))]
pub struct RuleSetError {
    pub violations: Vec<RuleViolation>,
}

fn summarize(violations: &[RuleViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure while assembling a card.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Rules(#[from] RuleSetError),

    #[error("`{field}` can only be set on {expected} cards, not {actual}")]
    WrongCardType {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },
}

impl CardError {
    /// Whether the import pipeline can skip this card and keep going.
    ///
    /// Input is static data, so nothing here is worth retrying; every
    /// failure is confined to the card that produced it.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            CardError::Validation(_) => true,
            CardError::Rules(_) => true,
            CardError::WrongCardType { .. } => true,
        }
    }
}
