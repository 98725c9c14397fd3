//! Balance calculator configuration.

use serde::{Deserialize, Serialize};

use super::result::BalanceCategory;

/// Upper score bound of each balance category. Scores above `strong` are
/// too strong.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryThresholds {
    pub very_weak: f64,
    pub weak: f64,
    pub balanced: f64,
    pub strong: f64,
}

impl Default for CategoryThresholds {
    fn default() -> Self {
        Self {
            very_weak: 30.0,
            weak: 45.0,
            balanced: 54.0,
            strong: 70.0,
        }
    }
}

impl CategoryThresholds {
    /// Category for a 0-100 score. Bounds are inclusive.
    #[must_use]
    pub fn classify(&self, score: f64) -> BalanceCategory {
        if score <= self.very_weak {
            BalanceCategory::VeryWeak
        } else if score <= self.weak {
            BalanceCategory::Weak
        } else if score <= self.balanced {
            BalanceCategory::Balanced
        } else if score <= self.strong {
            BalanceCategory::Strong
        } else {
            BalanceCategory::TooStrong
        }
    }
}

/// A known three-stage evolution line, by Pokémon name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionLine {
    pub basic: String,
    pub stage1: String,
    pub stage2: String,
}

impl EvolutionLine {
    #[must_use]
    pub fn new(basic: &str, stage1: &str, stage2: &str) -> Self {
        Self {
            basic: basic.to_string(),
            stage1: stage1.to_string(),
            stage2: stage2.to_string(),
        }
    }
}

/// Balance calculator configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalanceConfig {
    /// Raw HP strength that normalizes to 100.
    pub max_hp_strength: f64,

    /// Raw attack strength that normalizes to 100.
    pub max_attack_strength: f64,

    /// Raw ability strength that normalizes to 100.
    pub max_ability_strength: f64,

    /// Raw total that normalizes to 100 for cards without an ability.
    pub max_total: f64,

    /// Raw total that normalizes to 100 for cards with an ability.
    pub max_total_with_ability: f64,

    /// Ability strength of a basic Pokémon; scaled up by evolution stage.
    pub ability_base: f64,

    pub category_thresholds: CategoryThresholds,

    /// hp / expectedHp below this ratio makes the card a cheap prize.
    pub prize_liability_ratio: f64,
    pub prize_liability_cap: f64,

    /// Penalty for the first form of a known three-stage line.
    pub evolution_dependency_basic: f64,
    /// Penalty for the middle form of a known three-stage line.
    pub evolution_dependency_stage1: f64,

    /// Flat tax on stage 2 cards.
    pub stage2_tax: f64,
    /// Flat tax on stage 1 cards.
    pub stage1_tax: f64,

    /// Bonus for basic Pokémon.
    pub basic_bonus: f64,

    /// Lines whose lower forms are only played to reach the top form.
    pub evolution_lines: Vec<EvolutionLine>,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            max_hp_strength: 200.0,
            max_attack_strength: 50.0,
            max_ability_strength: 150.0,
            max_total: 250.0,
            max_total_with_ability: 300.0,
            ability_base: 50.0,
            category_thresholds: CategoryThresholds::default(),
            prize_liability_ratio: 0.5,
            prize_liability_cap: 5.0,
            evolution_dependency_basic: 5.0,
            evolution_dependency_stage1: 3.0,
            stage2_tax: 8.0,
            stage1_tax: 3.0,
            basic_bonus: 5.0,
            evolution_lines: default_evolution_lines(),
        }
    }
}

fn default_evolution_lines() -> Vec<EvolutionLine> {
    [
        ("Bulbasaur", "Ivysaur", "Venusaur"),
        ("Charmander", "Charmeleon", "Charizard"),
        ("Squirtle", "Wartortle", "Blastoise"),
        ("Caterpie", "Metapod", "Butterfree"),
        ("Weedle", "Kakuna", "Beedrill"),
        ("Pidgey", "Pidgeotto", "Pidgeot"),
        ("Nidoran♀", "Nidorina", "Nidoqueen"),
        ("Nidoran♂", "Nidorino", "Nidoking"),
        ("Oddish", "Gloom", "Vileplume"),
        ("Poliwag", "Poliwhirl", "Poliwrath"),
        ("Abra", "Kadabra", "Alakazam"),
        ("Machop", "Machoke", "Machamp"),
        ("Bellsprout", "Weepinbell", "Victreebel"),
        ("Geodude", "Graveler", "Golem"),
        ("Gastly", "Haunter", "Gengar"),
        ("Dratini", "Dragonair", "Dragonite"),
    ]
    .into_iter()
    .map(|(basic, stage1, stage2)| EvolutionLine::new(basic, stage1, stage2))
    .collect()
}

impl BalanceConfig {
    /// Set the category thresholds.
    #[must_use]
    pub fn with_category_thresholds(mut self, thresholds: CategoryThresholds) -> Self {
        self.category_thresholds = thresholds;
        self
    }

    /// Replace the known evolution lines.
    #[must_use]
    pub fn with_evolution_lines(mut self, lines: Vec<EvolutionLine>) -> Self {
        self.evolution_lines = lines;
        self
    }

    /// Add one known evolution line.
    #[must_use]
    pub fn with_evolution_line(mut self, line: EvolutionLine) -> Self {
        self.evolution_lines.push(line);
        self
    }

    /// Set the basic-Pokémon bonus.
    #[must_use]
    pub fn with_basic_bonus(mut self, bonus: f64) -> Self {
        self.basic_bonus = bonus;
        self
    }

    /// Set the stage taxes (stage 1, stage 2).
    #[must_use]
    pub fn with_stage_tax(mut self, stage1: f64, stage2: f64) -> Self {
        self.stage1_tax = stage1;
        self.stage2_tax = stage2;
        self
    }

    /// Penalty for a card whose name is a lower form of a known line.
    ///
    /// A name matches a form when one of its words equals the form's name,
    /// ignoring case ("Dark Charmeleon" is the middle form of Charizard's line).
    #[must_use]
    pub fn evolution_dependency(&self, card_name: &str) -> f64 {
        let words: Vec<String> = card_name.split_whitespace().map(str::to_lowercase).collect();
        let named = |form: &str| {
            let form = form.to_lowercase();
            words.iter().any(|word| *word == form)
        };

        for line in &self.evolution_lines {
            if named(&line.basic) {
                return self.evolution_dependency_basic;
            }
            if named(&line.stage1) {
                return self.evolution_dependency_stage1;
            }
        }
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BalanceConfig::default();
        assert_eq!(config.max_hp_strength, 200.0);
        assert_eq!(config.max_total, 250.0);
        assert_eq!(config.max_total_with_ability, 300.0);
        assert_eq!(config.evolution_lines.len(), 16);
    }

    #[test]
    fn test_thresholds_inclusive() {
        let t = CategoryThresholds::default();
        assert_eq!(t.classify(0.0), BalanceCategory::VeryWeak);
        assert_eq!(t.classify(30.0), BalanceCategory::VeryWeak);
        assert_eq!(t.classify(30.1), BalanceCategory::Weak);
        assert_eq!(t.classify(45.0), BalanceCategory::Weak);
        assert_eq!(t.classify(54.0), BalanceCategory::Balanced);
        assert_eq!(t.classify(70.0), BalanceCategory::Strong);
        assert_eq!(t.classify(70.1), BalanceCategory::TooStrong);
    }

    #[test]
    fn test_evolution_dependency() {
        let config = BalanceConfig::default();
        assert_eq!(config.evolution_dependency("Charmander"), 5.0);
        assert_eq!(config.evolution_dependency("Dark Charmeleon"), 3.0);
        assert_eq!(config.evolution_dependency("charizard"), 0.0);
        assert_eq!(config.evolution_dependency("Nidoran♀"), 5.0);
        assert_eq!(config.evolution_dependency("Pikachu"), 0.0);
        // whole words only
        assert_eq!(config.evolution_dependency("Abracadabra"), 0.0);
    }

    #[test]
    fn test_builder_pattern() {
        let config = BalanceConfig::default()
            .with_basic_bonus(0.0)
            .with_stage_tax(1.0, 2.0)
            .with_evolution_lines(Vec::new())
            .with_evolution_line(EvolutionLine::new("Pichu", "Pikachu", "Raichu"));

        assert_eq!(config.basic_bonus, 0.0);
        assert_eq!(config.stage2_tax, 2.0);
        assert_eq!(config.evolution_dependency("Pikachu"), 3.0);
    }

    #[test]
    fn test_serialization() {
        let config = BalanceConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: BalanceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
