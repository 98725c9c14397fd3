//! Card strength calculator.
//!
//! Scoring is a pure function of one card. The steps run in a fixed order:
//!
//! 1. HP strength: stage weight × HP × HP efficiency (expected HP for the
//!    stage, adjusted for weakness and resistance)
//! 2. Attack strength: mean raw score over attacks (see `attack_score`)
//! 3. Ability strength: flat, scaled up for evolved Pokémon
//! 4. Normalized sum of the three, minus penalties, plus bonuses, clamped
//!    to 0-100
//! 5. Category from the clamped score

use log::debug;

use crate::cards::Card;
use crate::core::{CardType, EvolutionStage};

use super::attack_score::{score_attack, AttackScore};
use super::config::BalanceConfig;
use super::result::{Bonuses, CardStrengthResult, Penalties, StrengthBreakdown};

/// Score `card` with the default configuration.
#[must_use]
pub fn calculate_strength(card: &Card) -> CardStrengthResult {
    StrengthCalculator::default().calculate_strength(card)
}

/// Card strength calculator.
///
/// Holds only configuration; safe to share between threads.
#[derive(Clone, Debug, Default)]
pub struct StrengthCalculator {
    config: BalanceConfig,
}

impl StrengthCalculator {
    #[must_use]
    pub fn new(config: BalanceConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    /// Score a card. Non-Pokémon cards and Pokémon without HP get
    /// `CardStrengthResult::empty()`.
    #[must_use]
    pub fn calculate_strength(&self, card: &Card) -> CardStrengthResult {
        if card.card_type() != CardType::Pokemon {
            return CardStrengthResult::empty();
        }
        let Some(hp) = card.hp().filter(|hp| *hp > 0) else {
            return CardStrengthResult::empty();
        };
        let config = &self.config;
        let stage = card.stage();

        let hp_raw = hp_strength(card, hp);
        let attack_scores: Vec<AttackScore> =
            card.attacks().iter().map(|attack| score_attack(attack, hp)).collect();
        let attack_raw = if attack_scores.is_empty() {
            0.0
        } else {
            attack_scores.iter().map(AttackScore::raw).sum::<f64>() / attack_scores.len() as f64
        };
        let has_ability = card.ability().is_some();
        let ability_raw = if has_ability {
            config.ability_base / evolution_value(stage)
        } else {
            0.0
        };

        let breakdown = StrengthBreakdown {
            hp_strength: normalize(hp_raw, config.max_hp_strength),
            attack_strength: normalize(attack_raw, config.max_attack_strength),
            ability_strength: normalize(ability_raw, config.max_ability_strength),
        };

        let max_total = if has_ability {
            config.max_total_with_ability
        } else {
            config.max_total
        };
        let base = normalize(hp_raw + attack_raw + ability_raw, max_total);

        let penalties = Penalties {
            sustainability: sustainability_penalty(&attack_scores, hp),
            evolution_dependency: config.evolution_dependency(card.name()),
            prize_liability: self.prize_liability(hp, stage),
            evolution: self.stage_tax(stage),
        };
        let bonuses = Bonuses {
            retreat_cost: retreat_bonus(card.retreat_cost()),
            basic_pokemon: if stage == Some(EvolutionStage::Basic) {
                config.basic_bonus
            } else {
                0.0
            },
        };

        let total = round1((base - penalties.total() + bonuses.total()).clamp(0.0, 100.0));
        let result = CardStrengthResult {
            total_strength: total,
            balance_category: config.category_thresholds.classify(total),
            breakdown: StrengthBreakdown {
                hp_strength: round1(breakdown.hp_strength),
                attack_strength: round1(breakdown.attack_strength),
                ability_strength: round1(breakdown.ability_strength),
            },
            penalties: Penalties {
                sustainability: round1(penalties.sustainability),
                evolution_dependency: round1(penalties.evolution_dependency),
                prize_liability: round1(penalties.prize_liability),
                evolution: round1(penalties.evolution),
            },
            bonuses: Bonuses {
                retreat_cost: round1(bonuses.retreat_cost),
                basic_pokemon: round1(bonuses.basic_pokemon),
            },
        };

        debug!(
            "{}: total {} ({}) hp {} attack {} ability {} penalties {:?} bonuses {:?}",
            card.name(),
            result.total_strength,
            result.balance_category,
            result.breakdown.hp_strength,
            result.breakdown.attack_strength,
            result.breakdown.ability_strength,
            result.penalties,
            result.bonuses,
        );
        result
    }

    fn prize_liability(&self, hp: u32, stage: Option<EvolutionStage>) -> f64 {
        let ratio = f64::from(hp) / expected_hp(stage);
        let threshold = self.config.prize_liability_ratio;
        if ratio < threshold {
            (20.0 * (threshold - ratio)).min(self.config.prize_liability_cap)
        } else {
            0.0
        }
    }

    fn stage_tax(&self, stage: Option<EvolutionStage>) -> f64 {
        match stage {
            Some(EvolutionStage::Stage2) => self.config.stage2_tax,
            Some(EvolutionStage::Stage1) => self.config.stage1_tax,
            _ => 0.0,
        }
    }
}

/// Cards without a printed stage score like basics.
fn evolution_value(stage: Option<EvolutionStage>) -> f64 {
    stage.map_or(1.0, EvolutionStage::evolution_value)
}

fn expected_hp(stage: Option<EvolutionStage>) -> f64 {
    stage.map_or(60.0, EvolutionStage::expected_hp)
}

fn hp_strength(card: &Card, hp: u32) -> f64 {
    let stage = card.stage();
    let hp = f64::from(hp);
    let mut efficiency = hp / expected_hp(stage);

    if card.weakness().is_some_and(|w| w.is_double()) {
        efficiency -= 0.25 + 0.12 * efficiency;
    }
    efficiency = efficiency.max(0.0);

    if let Some(resistance) = card.resistance() {
        let reduction = resistance.reduction();
        if reduction >= 30 {
            efficiency += 0.30 + 0.18 * efficiency;
        } else if reduction >= 20 {
            efficiency += 0.18 + 0.12 * efficiency;
        }
    }

    evolution_value(stage) * hp * efficiency
}

fn sustainability_penalty(scores: &[AttackScore], hp: u32) -> f64 {
    let max_self_damage = scores.iter().map(|s| s.self_damage).max().unwrap_or(0);
    if max_self_damage == 0 {
        return 0.0;
    }
    let penalty = (20.0 * f64::from(max_self_damage) / f64::from(hp)).min(10.0);
    if scores.iter().any(|s| s.self_damage == 0) {
        penalty / 2.0
    } else {
        penalty
    }
}

fn retreat_bonus(retreat_cost: Option<u32>) -> f64 {
    match retreat_cost {
        Some(0) => 5.0,
        Some(1) => 2.0,
        Some(cost) if cost >= 3 => -2.0,
        _ => 0.0,
    }
}

/// Scale `raw` so that `max` maps to 100, clamped to 0-100.
fn normalize(raw: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    (raw * 100.0 / max).clamp(0.0, 100.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Attack;
    use crate::core::{EnergyType, Resistance, Weakness};
    use smallvec::smallvec;

    fn basic(name: &str, hp: u32) -> crate::cards::CardBuilder {
        Card::builder("i", "c", CardType::Pokemon, name)
            .with_stage(EvolutionStage::Basic)
            .unwrap()
            .with_hp(hp)
            .unwrap()
    }

    #[test]
    fn test_reference_card() {
        let card = basic("Vulpix", 60)
            .with_attack(Attack::new("Ember", smallvec![EnergyType::Fire], "30", None).unwrap())
            .unwrap()
            .with_retreat_cost(1)
            .unwrap()
            .build();

        let result = calculate_strength(&card);
        assert_eq!(result.breakdown.hp_strength, 30.0);
        assert_eq!(result.breakdown.attack_strength, 80.0);
        assert_eq!(result.breakdown.ability_strength, 0.0);
        assert_eq!(result.bonuses.retreat_cost, 2.0);
        assert_eq!(result.bonuses.basic_pokemon, 5.0);
        assert_eq!(result.total_strength, 47.0);
        assert_eq!(result.balance_category.as_str(), "balanced");
    }

    #[test]
    fn test_weakness_and_resistance_shift_hp() {
        let plain = hp_strength(&basic("A", 60).build(), 60);
        let weak = hp_strength(
            &basic("A", 60)
                .with_weakness(Weakness::new(EnergyType::Fire, "×2").unwrap())
                .unwrap()
                .build(),
            60,
        );
        let resistant = hp_strength(
            &basic("A", 60)
                .with_resistance(Resistance::new(EnergyType::Fire, "-30").unwrap())
                .unwrap()
                .build(),
            60,
        );

        let mild = |modifier: &str| {
            hp_strength(
                &basic("A", 60)
                    .with_resistance(Resistance::new(EnergyType::Fire, modifier).unwrap())
                    .unwrap()
                    .build(),
                60,
            )
        };

        assert_eq!(plain, 60.0);
        // 1.0 + 0.18 + 0.12
        assert!((mild("-20") - 60.0 * 1.30).abs() < 1e-9);
        assert_eq!(mild("-10"), 60.0);
        // 1.0 - (0.25 + 0.12)
        assert!((weak - 60.0 * 0.63).abs() < 1e-9);
        // 1.0 + 0.30 + 0.18
        assert!((resistant - 60.0 * 1.48).abs() < 1e-9);
    }

    #[test]
    fn test_sustainability() {
        let recoil = AttackScore {
            self_damage: 30,
            ..AttackScore::default()
        };
        let clean = AttackScore::default();

        assert_eq!(sustainability_penalty(&[clean], 60), 0.0);
        assert_eq!(sustainability_penalty(&[recoil], 60), 10.0);
        assert_eq!(sustainability_penalty(&[recoil, clean], 60), 5.0);
        assert_eq!(sustainability_penalty(&[recoil], 120), 5.0);
    }

    #[test]
    fn test_retreat_bonus() {
        assert_eq!(retreat_bonus(Some(0)), 5.0);
        assert_eq!(retreat_bonus(Some(1)), 2.0);
        assert_eq!(retreat_bonus(Some(2)), 0.0);
        assert_eq!(retreat_bonus(Some(4)), -2.0);
        assert_eq!(retreat_bonus(None), 0.0);
    }

    #[test]
    fn test_prize_liability() {
        let calculator = StrengthCalculator::default();
        assert_eq!(calculator.prize_liability(60, Some(EvolutionStage::Basic)), 0.0);
        // ratio 0.375 on a stage 1
        assert!((calculator.prize_liability(30, Some(EvolutionStage::Stage1)) - 2.5).abs() < 1e-9);
        // capped
        assert_eq!(calculator.prize_liability(10, Some(EvolutionStage::Stage2)), 5.0);
    }

    #[test]
    fn test_stage_tax_and_ability() {
        let stage2 = Card::builder("i", "c", CardType::Pokemon, "Venusaur")
            .with_stage(EvolutionStage::Stage2)
            .unwrap()
            .with_hp(100)
            .unwrap()
            .with_ability(
                crate::cards::Ability::new(
                    "Energy Trans",
                    "Move Grass energy.",
                    crate::core::AbilityKind::PokePower,
                )
                .unwrap(),
            )
            .unwrap()
            .build();

        let result = calculate_strength(&stage2);
        assert_eq!(result.penalties.evolution, 8.0);
        assert_eq!(result.penalties.evolution_dependency, 0.0);
        assert_eq!(result.bonuses.basic_pokemon, 0.0);
        // 50 / 0.33 over 150
        assert_eq!(result.breakdown.ability_strength, 100.0);
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(30.000000000000004), 30.0);
        assert_eq!(round1(12.345), 12.3);
        assert_eq!(round1(-1.25), -1.3);
    }
}
