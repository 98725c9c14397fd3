//! Calculator output.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::CategoryThresholds;

/// Coarse verdict on a card's power level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceCategory {
    VeryWeak,
    Weak,
    Balanced,
    Strong,
    TooStrong,
}

impl BalanceCategory {
    /// Category for a 0-100 score under the default thresholds.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        CategoryThresholds::default().classify(score)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            BalanceCategory::VeryWeak => "very_weak",
            BalanceCategory::Weak => "weak",
            BalanceCategory::Balanced => "balanced",
            BalanceCategory::Strong => "strong",
            BalanceCategory::TooStrong => "too_strong",
        }
    }
}

impl fmt::Display for BalanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized (0-100) component strengths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthBreakdown {
    pub hp_strength: f64,
    pub attack_strength: f64,
    pub ability_strength: f64,
}

/// Points subtracted from the total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Penalties {
    pub sustainability: f64,
    pub evolution_dependency: f64,
    pub prize_liability: f64,
    pub evolution: f64,
}

impl Penalties {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.sustainability + self.evolution_dependency + self.prize_liability + self.evolution
    }
}

/// Points added to the total. `retreat_cost` is negative for heavy retreaters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bonuses {
    pub retreat_cost: f64,
    pub basic_pokemon: f64,
}

impl Bonuses {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.retreat_cost + self.basic_pokemon
    }
}

/// Balance score of one card.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStrengthResult {
    /// Clamped to 0-100.
    pub total_strength: f64,
    pub balance_category: BalanceCategory,
    pub breakdown: StrengthBreakdown,
    pub penalties: Penalties,
    pub bonuses: Bonuses,
}

impl CardStrengthResult {
    /// Result for cards that cannot be scored (not a Pokémon, or no HP).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_strength: 0.0,
            balance_category: BalanceCategory::VeryWeak,
            breakdown: StrengthBreakdown::default(),
            penalties: Penalties::default(),
            bonuses: Bonuses::default(),
        }
    }
}

impl Default for CardStrengthResult {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names() {
        assert_eq!(
            serde_json::to_string(&BalanceCategory::TooStrong).unwrap(),
            "\"too_strong\""
        );
        assert_eq!(BalanceCategory::VeryWeak.to_string(), "very_weak");
    }

    #[test]
    fn test_from_score() {
        assert_eq!(BalanceCategory::from_score(47.0), BalanceCategory::Balanced);
        assert_eq!(BalanceCategory::from_score(100.0), BalanceCategory::TooStrong);
    }

    #[test]
    fn test_empty_result_shape() {
        let json = serde_json::to_value(CardStrengthResult::empty()).unwrap();
        assert_eq!(json["totalStrength"], 0.0);
        assert_eq!(json["balanceCategory"], "very_weak");
        assert_eq!(json["breakdown"]["hpStrength"], 0.0);
        assert_eq!(json["penalties"]["evolutionDependency"], 0.0);
        assert_eq!(json["bonuses"]["basicPokemon"], 0.0);
    }
}
