//! What an energy card provides once attached.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::EnergyType;
use crate::error::ValidationError;

const OWNER: &str = "EnergyProvision";

/// Energy an energy card provides.
///
/// Basic energy provides exactly one energy of one listed type and nothing
/// else. Special energy may provide more, restrict where it is attached, or
/// carry extra effects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProvisionRecord", into = "ProvisionRecord")]
pub struct EnergyProvision {
    types: SmallVec<[EnergyType; 2]>,
    amount: u32,
    is_special: bool,
    restrictions: Vec<String>,
    additional_effects: Vec<String>,
}

impl EnergyProvision {
    /// One energy of a single type, as a basic energy card provides.
    #[must_use]
    pub fn basic(energy_type: EnergyType) -> Self {
        Self {
            types: SmallVec::from_elem(energy_type, 1),
            amount: 1,
            is_special: false,
            restrictions: Vec::new(),
            additional_effects: Vec::new(),
        }
    }

    /// Validate and build a provision.
    pub fn new(
        types: impl IntoIterator<Item = EnergyType>,
        amount: u32,
        is_special: bool,
        restrictions: Vec<String>,
        additional_effects: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let types: SmallVec<[EnergyType; 2]> = types.into_iter().collect();
        if types.is_empty() {
            return Err(ValidationError::invariant(OWNER, "must provide at least one energy type"));
        }
        if amount == 0 {
            return Err(ValidationError::invariant(OWNER, "amount must be >= 1"));
        }
        if !is_special {
            if amount > 1 {
                return Err(ValidationError::invariant(
                    OWNER,
                    format!("non-special energy provides at most 1 energy, got {amount}"),
                ));
            }
            if !restrictions.is_empty() {
                return Err(ValidationError::invariant(OWNER, "non-special energy has no restrictions"));
            }
            if !additional_effects.is_empty() {
                return Err(ValidationError::invariant(
                    OWNER,
                    "non-special energy has no additional effects",
                ));
            }
        }

        Ok(Self {
            types,
            amount,
            is_special,
            restrictions,
            additional_effects,
        })
    }

    #[must_use]
    pub fn types(&self) -> &[EnergyType] {
        &self.types
    }

    #[must_use]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    #[must_use]
    pub fn is_special(&self) -> bool {
        self.is_special
    }

    #[must_use]
    pub fn restrictions(&self) -> &[String] {
        &self.restrictions
    }

    #[must_use]
    pub fn additional_effects(&self) -> &[String] {
        &self.additional_effects
    }

    /// Whether this provision can pay for a cost symbol of `energy_type`.
    ///
    /// Anything pays for Colorless.
    #[must_use]
    pub fn provides(&self, energy_type: EnergyType) -> bool {
        energy_type == EnergyType::Colorless || self.types.contains(&energy_type)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProvisionRecord {
    types: SmallVec<[EnergyType; 2]>,
    amount: u32,
    #[serde(default)]
    is_special: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    restrictions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    additional_effects: Vec<String>,
}

impl TryFrom<ProvisionRecord> for EnergyProvision {
    type Error = ValidationError;

    fn try_from(record: ProvisionRecord) -> Result<Self, Self::Error> {
        EnergyProvision::new(
            record.types,
            record.amount,
            record.is_special,
            record.restrictions,
            record.additional_effects,
        )
    }
}

impl From<EnergyProvision> for ProvisionRecord {
    fn from(provision: EnergyProvision) -> Self {
        ProvisionRecord {
            types: provision.types,
            amount: provision.amount,
            is_special: provision.is_special,
            restrictions: provision.restrictions,
            additional_effects: provision.additional_effects,
        }
    }
}
