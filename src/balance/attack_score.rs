//! Per-attack scoring.
//!
//! An attack's raw strength is its damage per energy, less what it costs
//! the attacker (drawbacks, inefficiency), plus bonuses for efficient
//! damage and for hurting or stalling the opponent. Raw strength never
//! drops below zero.

use crate::cards::Attack;
use crate::core::SpecialCondition;
use crate::effects::AttackEffect;

/// Poison damage that earns the stronger poison bonus.
const HEAVY_POISON_DAMAGE: u32 = 20;

/// Score components of one attack.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AttackScore {
    pub damage_per_energy: f64,
    /// Cost to the attacker of its own drawbacks.
    pub drawback: f64,
    /// Penalty for expensive attacks that hit softly.
    pub inefficiency: f64,
    pub efficiency_bonus: f64,
    /// Bonus for statuses on the opponent and for protecting or healing.
    pub effect_bonus: f64,
    /// Damage the attack deals to the attacker.
    pub self_damage: u32,
}

impl AttackScore {
    /// Raw attack strength, floored at 0.
    #[must_use]
    pub fn raw(&self) -> f64 {
        (self.damage_per_energy - self.drawback - self.inefficiency
            + self.efficiency_bonus
            + self.effect_bonus)
            .max(0.0)
    }
}

/// Score one attack of a Pokémon with `hp` HP.
#[must_use]
pub fn score_attack(attack: &Attack, hp: u32) -> AttackScore {
    let printed_cost = attack.energy_cost();
    let cost = printed_cost.max(1);
    let damage_per_energy = attack.average_damage() / f64::from(cost);

    let self_damage = self_damage(attack);
    let drawback = self_damage_penalty(self_damage, hp)
        + attack.effects().iter().map(effect_drawback).sum::<f64>()
        + coin_flip_penalty(attack, cost, damage_per_energy);

    AttackScore {
        damage_per_energy,
        drawback,
        inefficiency: inefficiency_penalty(printed_cost, damage_per_energy),
        efficiency_bonus: efficiency_bonus(damage_per_energy),
        effect_bonus: attack.effects().iter().map(effect_bonus).sum(),
        self_damage,
    }
}

/// Recoil the attacker takes.
#[must_use]
pub fn self_damage(attack: &Attack) -> u32 {
    attack
        .effects()
        .iter()
        .map(|effect| match effect {
            AttackEffect::RecoilDamage(recoil) => recoil.get(),
            _ => 0,
        })
        .sum()
}

fn self_damage_penalty(self_damage: u32, hp: u32) -> f64 {
    if self_damage == 0 || hp == 0 {
        return 0.0;
    }
    let percent = f64::from(self_damage) / f64::from(hp) * 100.0;
    if percent >= 80.0 {
        30.0
    } else if percent >= 66.0 {
        20.0
    } else if percent >= 50.0 {
        12.0
    } else if percent >= 33.0 {
        6.0
    } else if percent >= 25.0 {
        3.0
    } else {
        1.0
    }
}

fn self_status_penalty(condition: SpecialCondition) -> f64 {
    match condition {
        SpecialCondition::Paralyzed => 6.0,
        SpecialCondition::Asleep | SpecialCondition::Confused => 4.0,
        SpecialCondition::Poisoned | SpecialCondition::Burned => 3.0,
    }
}

fn energy_discard_penalty(amount: u32) -> f64 {
    match amount {
        0 => 0.0,
        1 => 3.0,
        2 => 6.0,
        _ => 10.0,
    }
}

/// Drawback of one effect on the attacker. Effects on anyone else cost 0.
fn effect_drawback(effect: &AttackEffect) -> f64 {
    let on_self = effect.targets_self();
    match effect {
        AttackEffect::StatusCondition(status) if on_self => {
            let penalty = self_status_penalty(status.condition());
            if status.coin_flip() {
                penalty / 2.0
            } else {
                penalty
            }
        }
        AttackEffect::DiscardEnergy(discard) if on_self => energy_discard_penalty(discard.amount.get()),
        AttackEffect::DiscardCards(discard) if discard.target.is_own_side() => {
            f64::from(discard.amount.get().min(2))
        }
        AttackEffect::CannotAttack(_) if on_self => 6.0,
        AttackEffect::CannotRetreat(_) if on_self => 2.0,
        _ => 0.0,
    }
}

fn coin_flip_penalty(attack: &Attack, cost: u32, damage_per_energy: f64) -> f64 {
    let damage_flip = attack.damage().is_some_and(|damage| damage.is_coin_flip());
    let effect_flip = attack.effects().iter().any(AttackEffect::is_coin_flip);
    if !damage_flip && !effect_flip {
        return 0.0;
    }

    let penalty = 2.0 + f64::from(cost);
    if damage_per_energy >= 15.0 {
        penalty / 2.0
    } else {
        penalty
    }
}

/// Only attacks costing 3+ energy are judged on efficiency.
fn inefficiency_penalty(printed_cost: u32, damage_per_energy: f64) -> f64 {
    if printed_cost < 3 {
        return 0.0;
    }
    let threshold = if printed_cost >= 4 { 10.0 } else { 8.0 };
    if damage_per_energy < threshold {
        threshold - damage_per_energy
    } else {
        0.0
    }
}

fn efficiency_bonus(damage_per_energy: f64) -> f64 {
    if damage_per_energy >= 20.0 {
        10.0
    } else if damage_per_energy >= 15.0 {
        6.0
    } else if damage_per_energy >= 12.0 {
        3.0
    } else {
        0.0
    }
}

/// Bonus for an effect aimed away from the attacker. Self-targeted effects earn nothing.
fn effect_bonus(effect: &AttackEffect) -> f64 {
    if effect.targets_self() {
        return 0.0;
    }
    match effect {
        AttackEffect::StatusCondition(status) => {
            match status.condition() {
                SpecialCondition::Poisoned => {
                    if status.poison_damage() == Some(HEAVY_POISON_DAMAGE) {
                        4.0
                    } else {
                        3.0
                    }
                }
                SpecialCondition::Paralyzed | SpecialCondition::Confused => 2.0,
                SpecialCondition::Asleep => 1.5,
                SpecialCondition::Burned => 1.0,
            }
        }
        AttackEffect::PreventDamage(_) | AttackEffect::Heal(_) => 1.0,
        _ => 0.0,
    }
}
