//! Evolution links between Pokémon cards.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const OWNER: &str = "Evolution";

/// Which Pokémon this card evolves from and into, by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EvolutionRecord", into = "EvolutionRecord")]
pub struct Evolution {
    evolves_from: Option<String>,
    evolves_to: Vec<String>,
}

impl Evolution {
    /// Validate and build evolution links.
    ///
    /// Every name must be non-empty, and the previous stage cannot also be
    /// listed as a next stage.
    pub fn new(
        evolves_from: Option<String>,
        evolves_to: Vec<String>,
    ) -> Result<Self, ValidationError> {
        if let Some(from) = &evolves_from {
            if from.trim().is_empty() {
                return Err(ValidationError::invariant(OWNER, "evolvesFrom must not be empty"));
            }
        }
        if evolves_to.iter().any(|name| name.trim().is_empty()) {
            return Err(ValidationError::invariant(OWNER, "evolvesTo names must not be empty"));
        }
        if let Some(from) = &evolves_from {
            if evolves_to.iter().any(|name| name == from) {
                return Err(ValidationError::invariant(
                    OWNER,
                    format!("`{from}` cannot be both the previous and the next stage"),
                ));
            }
        }

        Ok(Self {
            evolves_from,
            evolves_to,
        })
    }

    /// Links for a card that evolves from `name` and into nothing listed.
    pub fn from_previous(name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Some(name.into()), Vec::new())
    }

    #[must_use]
    pub fn evolves_from(&self) -> Option<&str> {
        self.evolves_from.as_deref()
    }

    #[must_use]
    pub fn evolves_to(&self) -> &[String] {
        &self.evolves_to
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvolutionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    evolves_from: Option<String>,
    #[serde(default)]
    evolves_to: Vec<String>,
}

impl TryFrom<EvolutionRecord> for Evolution {
    type Error = ValidationError;

    fn try_from(record: EvolutionRecord) -> Result<Self, Self::Error> {
        Evolution::new(record.evolves_from, record.evolves_to)
    }
}

impl From<Evolution> for EvolutionRecord {
    fn from(evolution: Evolution) -> Self {
        EvolutionRecord {
            evolves_from: evolution.evolves_from,
            evolves_to: evolution.evolves_to,
        }
    }
}
