//! Activation conditions.
//!
//! A `Condition` says when a rule or effect applies ("this Pokémon has
//! damage counters on it", "HP is 30 or less"). Conditions are data only;
//! the game engine that consumes a card decides whether they hold.
//!
//! On the wire a condition is `{ "type": "HP_AT_MOST", "value": 30 }`.
//! Flag kinds carry no value, threshold kinds require one.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A predicate over game state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ConditionRecord", into = "ConditionRecord")]
pub enum Condition {
    // === Flags ===
    SelfHasDamage,
    SelfHasNoDamage,
    OpponentHasDamage,
    IsActive,
    IsBenched,
    CoinFlipHeads,

    // === Thresholds ===
    HpAtMost(u32),
    HpAtLeast(u32),
    EnergyAttachedAtLeast(u32),
    BenchSizeAtLeast(u32),
    DamageCountersAtLeast(u32),
}

impl Condition {
    /// Wire name of the condition kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Condition::SelfHasDamage => "SELF_HAS_DAMAGE",
            Condition::SelfHasNoDamage => "SELF_HAS_NO_DAMAGE",
            Condition::OpponentHasDamage => "OPPONENT_HAS_DAMAGE",
            Condition::IsActive => "IS_ACTIVE",
            Condition::IsBenched => "IS_BENCHED",
            Condition::CoinFlipHeads => "COIN_FLIP_HEADS",
            Condition::HpAtMost(_) => "HP_AT_MOST",
            Condition::HpAtLeast(_) => "HP_AT_LEAST",
            Condition::EnergyAttachedAtLeast(_) => "ENERGY_ATTACHED_AT_LEAST",
            Condition::BenchSizeAtLeast(_) => "BENCH_SIZE_AT_LEAST",
            Condition::DamageCountersAtLeast(_) => "DAMAGE_COUNTERS_AT_LEAST",
        }
    }

    /// Threshold value, for threshold kinds.
    #[must_use]
    pub const fn value(&self) -> Option<u32> {
        match self {
            Condition::HpAtMost(v)
            | Condition::HpAtLeast(v)
            | Condition::EnergyAttachedAtLeast(v)
            | Condition::BenchSizeAtLeast(v)
            | Condition::DamageCountersAtLeast(v) => Some(*v),
            _ => None,
        }
    }

    /// Build a condition from its wire parts.
    pub fn from_parts(kind: &str, value: Option<i64>) -> Result<Self, ValidationError> {
        let flag = |condition: Condition| match value {
            None => Ok(condition),
            Some(_) => Err(ValidationError::UnexpectedField {
                owner: kind.to_string(),
                field: "value".to_string(),
            }),
        };
        let threshold = |make: fn(u32) -> Condition| {
            let raw = value.ok_or_else(|| ValidationError::missing(kind, "value"))?;
            u32::try_from(raw)
                .map(make)
                .map_err(|_| ValidationError::invariant(kind, format!("value must be >= 0, got {raw}")))
        };

        match kind {
            "SELF_HAS_DAMAGE" => flag(Condition::SelfHasDamage),
            "SELF_HAS_NO_DAMAGE" => flag(Condition::SelfHasNoDamage),
            "OPPONENT_HAS_DAMAGE" => flag(Condition::OpponentHasDamage),
            "IS_ACTIVE" => flag(Condition::IsActive),
            "IS_BENCHED" => flag(Condition::IsBenched),
            "COIN_FLIP_HEADS" => flag(Condition::CoinFlipHeads),
            "HP_AT_MOST" => threshold(Condition::HpAtMost),
            "HP_AT_LEAST" => threshold(Condition::HpAtLeast),
            "ENERGY_ATTACHED_AT_LEAST" => threshold(Condition::EnergyAttachedAtLeast),
            "BENCH_SIZE_AT_LEAST" => threshold(Condition::BenchSizeAtLeast),
            "DAMAGE_COUNTERS_AT_LEAST" => threshold(Condition::DamageCountersAtLeast),
            other => Err(ValidationError::invalid_enum("condition.type", other)),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value() {
            Some(v) => write!(f, "{}({v})", self.kind()),
            None => f.write_str(self.kind()),
        }
    }
}

/// Wire record for a condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

impl TryFrom<ConditionRecord> for Condition {
    type Error = ValidationError;

    fn try_from(record: ConditionRecord) -> Result<Self, Self::Error> {
        Condition::from_parts(&record.kind, record.value)
    }
}

impl From<Condition> for ConditionRecord {
    fn from(condition: Condition) -> Self {
        ConditionRecord {
            kind: condition.kind().to_string(),
            value: condition.value().map(i64::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_condition() {
        let condition = Condition::from_parts("SELF_HAS_DAMAGE", None).unwrap();
        assert_eq!(condition, Condition::SelfHasDamage);
        assert_eq!(condition.value(), None);
    }

    #[test]
    fn test_flag_rejects_value() {
        let err = Condition::from_parts("IS_ACTIVE", Some(3)).unwrap_err();
        assert_eq!(err.field(), Some("value"));
    }

    #[test]
    fn test_threshold_condition() {
        let condition = Condition::from_parts("HP_AT_MOST", Some(30)).unwrap();
        assert_eq!(condition, Condition::HpAtMost(30));
        assert_eq!(condition.to_string(), "HP_AT_MOST(30)");
    }

    #[test]
    fn test_threshold_requires_value() {
        let err = Condition::from_parts("BENCH_SIZE_AT_LEAST", None).unwrap_err();
        assert_eq!(err, ValidationError::missing("BENCH_SIZE_AT_LEAST", "value"));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = Condition::from_parts("HP_AT_LEAST", Some(-10)).unwrap_err();
        assert!(matches!(err, ValidationError::InvariantViolation { .. }));
    }

    #[test]
    fn test_unknown_kind() {
        let err = Condition::from_parts("MOON_IS_FULL", None).unwrap_err();
        assert_eq!(err, ValidationError::invalid_enum("condition.type", "MOON_IS_FULL"));
    }

    #[test]
    fn test_condition_serialization() {
        let json = serde_json::to_string(&Condition::EnergyAttachedAtLeast(2)).unwrap();
        assert_eq!(json, r#"{"type":"ENERGY_ATTACHED_AT_LEAST","value":2}"#);

        let flag: Condition = serde_json::from_str(r#"{"type":"IS_BENCHED"}"#).unwrap();
        assert_eq!(flag, Condition::IsBenched);
    }
}
