//! Weakness and resistance.
//!
//! Printed modifiers are validated when the value object is built:
//! weakness must read `×<n>` or `+<n>`, resistance must read `-<n>`.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::EnergyType;
use crate::error::ValidationError;

/// How a weakness changes incoming damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeaknessModifier {
    /// `×n`: damage is multiplied.
    Multiply(u32),
    /// `+n`: damage is increased.
    Add(u32),
}

impl WeaknessModifier {
    /// Parse `×<digits>` or `+<digits>`.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let parsed = if let Some(digits) = text.strip_prefix('×') {
            parse_digits("Weakness", digits)?.map(Self::Multiply)
        } else if let Some(digits) = text.strip_prefix('+') {
            parse_digits("Weakness", digits)?.map(Self::Add)
        } else {
            None
        };
        parsed.ok_or_else(|| ValidationError::invalid_format("weakness", text))
    }
}

impl fmt::Display for WeaknessModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeaknessModifier::Multiply(n) => write!(f, "×{n}"),
            WeaknessModifier::Add(n) => write!(f, "+{n}"),
        }
    }
}

/// `None` when `digits` is not a run of ASCII digits. A well-formed value
/// too large for `u32` is an error of its own.
fn parse_digits(owner: &str, digits: &str) -> Result<Option<u32>, ValidationError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }
    digits
        .parse()
        .map(Some)
        .map_err(|_| ValidationError::invariant(owner, format!("`{digits}` is out of range")))
}

/// Printed weakness, e.g. FIRE ×2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ModifierRecord", into = "ModifierRecord")]
pub struct Weakness {
    energy_type: EnergyType,
    modifier: WeaknessModifier,
}

impl Weakness {
    /// Build a weakness from its printed modifier text.
    pub fn new(energy_type: EnergyType, modifier: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            energy_type,
            modifier: WeaknessModifier::parse(modifier)?,
        })
    }

    #[must_use]
    pub fn energy_type(&self) -> EnergyType {
        self.energy_type
    }

    #[must_use]
    pub fn modifier(&self) -> WeaknessModifier {
        self.modifier
    }

    /// True for the classic `×2` weakness.
    #[must_use]
    pub fn is_double(&self) -> bool {
        self.modifier == WeaknessModifier::Multiply(2)
    }
}

/// Printed resistance, e.g. FIGHTING -30.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ModifierRecord", into = "ModifierRecord")]
pub struct Resistance {
    energy_type: EnergyType,
    reduction: u32,
}

impl Resistance {
    /// Build a resistance from its printed modifier text (`-<n>`).
    pub fn new(energy_type: EnergyType, modifier: &str) -> Result<Self, ValidationError> {
        let parsed = match modifier.strip_prefix('-') {
            Some(digits) => parse_digits("Resistance", digits)?,
            None => None,
        };
        let reduction =
            parsed.ok_or_else(|| ValidationError::invalid_format("resistance", modifier))?;
        Ok(Self {
            energy_type,
            reduction,
        })
    }

    #[must_use]
    pub fn energy_type(&self) -> EnergyType {
        self.energy_type
    }

    /// Damage removed, as a positive number.
    #[must_use]
    pub fn reduction(&self) -> u32 {
        self.reduction
    }

    /// Printed form, e.g. `-30`.
    #[must_use]
    pub fn modifier_text(&self) -> String {
        format!("-{}", self.reduction)
    }
}

/// `{ "type": ..., "value": ... }` wire shape shared by weakness and resistance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierRecord {
    #[serde(rename = "type")]
    pub energy_type: EnergyType,
    pub value: String,
}

impl TryFrom<ModifierRecord> for Weakness {
    type Error = ValidationError;

    fn try_from(record: ModifierRecord) -> Result<Self, Self::Error> {
        Weakness::new(record.energy_type, &record.value)
    }
}

impl From<Weakness> for ModifierRecord {
    fn from(weakness: Weakness) -> Self {
        ModifierRecord {
            energy_type: weakness.energy_type,
            value: weakness.modifier.to_string(),
        }
    }
}

impl TryFrom<ModifierRecord> for Resistance {
    type Error = ValidationError;

    fn try_from(record: ModifierRecord) -> Result<Self, Self::Error> {
        Resistance::new(record.energy_type, &record.value)
    }
}

impl From<Resistance> for ModifierRecord {
    fn from(resistance: Resistance) -> Self {
        ModifierRecord {
            energy_type: resistance.energy_type,
            value: resistance.modifier_text(),
        }
    }
}
