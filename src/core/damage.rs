//! Damage mini-language.
//!
//! Printed damage is one of:
//! - `"30"`: flat damage
//! - `"20×"`: coin flip, heads for the printed amount
//! - `"40+"`: base damage plus 10 per extra energy, up to a cap
//! - `"30+20"`: compound sum of fixed parts
//!
//! The string is parsed once into a `DamageExpr` when an attack is built;
//! `Display` renders it back to the printed form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::ValidationError;

/// Extra damage per energy for `"<n>+"` attacks.
pub const ENERGY_BONUS_STEP: u32 = 10;

/// Cap applied to `"<n>+"` attacks that do not print one.
pub const DEFAULT_ENERGY_BONUS_CAP: u32 = 2;

/// Parsed damage expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DamageExpr {
    /// Fixed damage.
    Flat(u32),
    /// Printed damage on heads, nothing on tails.
    CoinFlip(u32),
    /// Base damage plus `ENERGY_BONUS_STEP` per extra energy, at most `cap` times.
    EnergyBonus { base: u32, cap: u32 },
    /// Sum of fixed parts (two or more).
    Compound(SmallVec<[u32; 2]>),
}

impl DamageExpr {
    /// Parse printed damage text. Whitespace around the text is ignored.
    ///
    /// `×` and ASCII `x` both mark a coin flip.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let text = text.trim();
        let malformed = || ValidationError::invalid_format("damage", text);

        if let Some(base) = text.strip_suffix('×').or_else(|| text.strip_suffix('x')) {
            return parse_amount(base).map(DamageExpr::CoinFlip).ok_or_else(malformed);
        }

        if let Some(base) = text.strip_suffix('+') {
            return parse_amount(base)
                .map(|base| DamageExpr::EnergyBonus {
                    base,
                    cap: DEFAULT_ENERGY_BONUS_CAP,
                })
                .ok_or_else(malformed);
        }

        if text.contains('+') {
            let parts = text
                .split('+')
                .map(parse_amount)
                .collect::<Option<SmallVec<[u32; 2]>>>()
                .ok_or_else(malformed)?;
            return Ok(DamageExpr::Compound(parts));
        }

        parse_amount(text).map(DamageExpr::Flat).ok_or_else(malformed)
    }

    /// Replace the energy-bonus cap. Only `"<n>+"` damage has one.
    pub fn with_energy_bonus_cap(self, cap: u32) -> Result<Self, ValidationError> {
        match self {
            DamageExpr::EnergyBonus { base, .. } => Ok(DamageExpr::EnergyBonus { base, cap }),
            other => Err(ValidationError::invariant(
                "Attack",
                format!("energyBonusCap given for non-bonus damage `{other}`"),
            )),
        }
    }

    /// Closed-form expected damage.
    ///
    /// Coin flips average to half the printed amount; energy bonuses
    /// average the base and the fully-capped maximum.
    #[must_use]
    pub fn expected_value(&self) -> f64 {
        match self {
            DamageExpr::Flat(n) => f64::from(*n),
            DamageExpr::CoinFlip(n) => f64::from(*n) / 2.0,
            DamageExpr::EnergyBonus { base, cap } => {
                let min = f64::from(*base);
                let max = f64::from(*base) + f64::from(ENERGY_BONUS_STEP) * f64::from(*cap);
                (min + max) / 2.0
            }
            DamageExpr::Compound(parts) => parts.iter().map(|p| f64::from(*p)).sum(),
        }
    }

    /// Whether the damage depends on a coin flip.
    #[must_use]
    pub fn is_coin_flip(&self) -> bool {
        matches!(self, DamageExpr::CoinFlip(_))
    }
}

fn parse_amount(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl fmt::Display for DamageExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DamageExpr::Flat(n) => write!(f, "{n}"),
            DamageExpr::CoinFlip(n) => write!(f, "{n}×"),
            DamageExpr::EnergyBonus { base, .. } => write!(f, "{base}+"),
            DamageExpr::Compound(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str("+")?;
                    }
                    write!(f, "{part}")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for DamageExpr {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DamageExpr {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DamageExpr> for String {
    fn from(value: DamageExpr) -> Self {
        value.to_string()
    }
}
