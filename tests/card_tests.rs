//! Card aggregate integration tests.
//!
//! Type-gated assembly, rule queries on built cards, and the value
//! objects printed on them.

use proptest::prelude::*;
use smallvec::smallvec;
use strum::VariantArray;

use rust_tcg::cards::{Ability, Attack, Card, EnergyProvision, Evolution};
use rust_tcg::core::{
    AbilityKind, CardType, EffectTarget, EnergyKind, EnergyType, EvolutionStage, Resistance,
    TrainerKind, Weakness,
};
use rust_tcg::effects::{Amount, AttackEffect, TargetedAmount, TrainerEffect};
use rust_tcg::error::CardError;
use rust_tcg::rules::{RulePriority, RuleRecord, RuleType};

fn charizard() -> Card {
    Card::builder("inst-4", "base1-4", CardType::Pokemon, "Charizard")
        .with_number("4/102")
        .with_rarity("Rare Holo")
        .with_energy_type(EnergyType::Fire)
        .unwrap()
        .with_stage(EvolutionStage::Stage2)
        .unwrap()
        .with_hp(120)
        .unwrap()
        .with_retreat_cost(3)
        .unwrap()
        .with_weakness(Weakness::new(EnergyType::Water, "×2").unwrap())
        .unwrap()
        .with_resistance(Resistance::new(EnergyType::Fighting, "-30").unwrap())
        .unwrap()
        .with_ability(
            Ability::new(
                "Energy Burn",
                "All Energy attached to Charizard are Fire Energy.",
                AbilityKind::PokePower,
            )
            .unwrap(),
        )
        .unwrap()
        .with_attack(
            Attack::new("Fire Spin", smallvec![EnergyType::Fire; 4], "100", None).unwrap(),
        )
        .unwrap()
        .with_evolution(Evolution::from_previous("Charmeleon").unwrap())
        .unwrap()
        .build()
}

/// Test that a fully printed Pokémon keeps every attribute
#[test]
fn test_full_pokemon() {
    let card = charizard();
    assert_eq!(card.card_type(), CardType::Pokemon);
    assert_eq!(card.energy_type(), Some(EnergyType::Fire));
    assert_eq!(card.stage(), Some(EvolutionStage::Stage2));
    assert_eq!(card.hp(), Some(120));
    assert!(card.weakness().unwrap().is_double());
    assert_eq!(card.resistance().unwrap().reduction(), 30);
    assert_eq!(card.attacks().len(), 1);
    assert_eq!(card.attacks()[0].energy_cost(), 4);
    assert_eq!(card.evolution().unwrap().evolves_from(), Some("Charmeleon"));
    assert_eq!(card.number(), Some("4/102"));
    assert!(!card.has_rules());
}

/// Test that a trainer card carries its kind and effects
#[test]
fn test_trainer_card() {
    let card = Card::builder("inst-1", "base1-94", CardType::Trainer, "Potion")
        .with_trainer_kind(TrainerKind::Item)
        .unwrap()
        .with_trainer_effects(vec![TrainerEffect::Heal(
            TargetedAmount::new(20, EffectTarget::SelfPokemon).unwrap(),
        )])
        .unwrap()
        .build();

    assert_eq!(card.trainer_kind(), Some(TrainerKind::Item));
    assert_eq!(card.trainer_effects().len(), 1);
    assert!(card.hp().is_none());
}

/// Test that an energy card carries its kind and provision
#[test]
fn test_energy_card() {
    let card = Card::builder("inst-2", "base1-98", CardType::Energy, "Fire Energy")
        .with_energy_kind(EnergyKind::Basic)
        .unwrap()
        .with_energy_provision(EnergyProvision::basic(EnergyType::Fire))
        .unwrap()
        .build();

    assert_eq!(card.energy_kind(), Some(EnergyKind::Basic));
    assert_eq!(card.energy_provision().unwrap().amount(), 1);
}

/// Test that every type-gated setter rejects the wrong card type
#[test]
fn test_type_gates() {
    let trainer = || Card::builder("i", "c", CardType::Trainer, "Bill");
    let energy = || Card::builder("i", "c", CardType::Energy, "Water Energy");
    let pokemon = || Card::builder("i", "c", CardType::Pokemon, "Squirtle");

    let gated: Vec<Result<_, CardError>> = vec![
        trainer().with_hp(40).map(|_| ()),
        trainer().with_stage(EvolutionStage::Basic).map(|_| ()),
        trainer()
            .with_attack(Attack::new("Bubble", smallvec![EnergyType::Water], "10", None).unwrap())
            .map(|_| ()),
        energy().with_weakness(Weakness::new(EnergyType::Lightning, "×2").unwrap()).map(|_| ()),
        energy().with_trainer_kind(TrainerKind::Supporter).map(|_| ()),
        pokemon().with_trainer_effects(Vec::new()).map(|_| ()),
        pokemon().with_energy_kind(EnergyKind::Special).map(|_| ()),
        pokemon().with_energy_provision(EnergyProvision::basic(EnergyType::Water)).map(|_| ()),
    ];

    for result in gated {
        let err = result.unwrap_err();
        assert!(matches!(err, CardError::WrongCardType { .. }), "{err}");
        assert!(err.is_recoverable());
    }
}

/// Test that a type-gate error names the field and both card types
#[test]
fn test_wrong_type_message_names_field() {
    let err = Card::builder("i", "c", CardType::Trainer, "Bill")
        .with_retreat_cost(1)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "`retreatCost` can only be set on POKEMON cards, not TRAINER"
    );
}

/// Test that rule queries on a card follow priority and type
#[test]
fn test_rule_queries_on_card() {
    let card = Card::builder("i", "c", CardType::Pokemon, "Wobbuffet")
        .with_card_rules(vec![
            RuleRecord::new(RuleType::CannotAttack, "Can't attack.").with_priority(RulePriority::Low),
            RuleRecord::new(RuleType::NoPrize, "No prize.").with_priority(RulePriority::Highest),
            RuleRecord::new(RuleType::CannotRetreat, "Can't retreat."),
        ])
        .unwrap()
        .build();

    assert!(card.has_rules());
    assert!(!card.can_attack());
    assert!(!card.can_retreat());
    assert!(card.has_rule_type(RuleType::NoPrize));
    assert!(card.rules_by_type(RuleType::FreeRetreat).is_empty());

    let order: Vec<RuleType> = card.rules_by_priority().iter().map(|r| r.rule_type()).collect();
    assert_eq!(
        order,
        vec![RuleType::NoPrize, RuleType::CannotRetreat, RuleType::CannotAttack]
    );
}

/// Test that an invalid rule list fails card assembly
#[test]
fn test_invalid_rules_fail_card_assembly() {
    let err = Card::builder("i", "c", CardType::Pokemon, "Mew")
        .with_card_rules(vec![RuleRecord::new(RuleType::ExtraPrize, "")])
        .unwrap_err();
    match err {
        CardError::Rules(rules) => assert_eq!(rules.violations[0].index, 0),
        other => panic!("Expected rule errors, got {other:?}"),
    }
}

/// Test that a card survives a JSON round trip
#[test]
fn test_card_json_round_trip() {
    let card = charizard();
    let json = serde_json::to_value(&card).unwrap();
    assert_eq!(json["cardType"], "POKEMON");
    assert_eq!(json["hp"], 120);
    assert_eq!(json["weakness"]["value"], "×2");
    assert_eq!(json["attacks"][0]["damage"], "100");

    let back: Card = serde_json::from_value(json).unwrap();
    assert_eq!(back, card);
}

/// Test that JSON import validates the value objects inside a card
#[test]
fn test_card_json_validates_parts() {
    let json = r#"{
        "instanceId": "i", "cardId": "c", "name": "Pikachu", "cardType": "POKEMON",
        "hp": 40,
        "attacks": [{"name": "Thundershock", "cost": ["LIGHTNING"], "damage": "10×x"}]
    }"#;
    assert!(serde_json::from_str::<Card>(json).is_err());

    let json = r#"{
        "instanceId": "i", "cardId": "c", "name": "Pikachu", "cardType": "POKEMON",
        "hp": 40,
        "attacks": [{
            "name": "Thundershock", "cost": ["LIGHTNING"], "damage": "10",
            "effects": [{"effectType": "RECOIL_DAMAGE", "amount": 10}]
        }]
    }"#;
    let card: Card = serde_json::from_str(json).unwrap();
    assert_eq!(
        card.attacks()[0].effects(),
        &[AttackEffect::RecoilDamage(Amount::new(10).unwrap())]
    );
}

/// Test that JSON import applies the same type gates as the builder
#[test]
fn test_card_json_enforces_type_gates() {
    let misfiled = [
        r#"{"instanceId":"i","cardId":"c","cardType":"TRAINER","name":"Bill","hp":30,
            "attacks":[{"name":"Hit","cost":["COLORLESS"],"damage":"10"}]}"#,
        r#"{"instanceId":"i","cardId":"c","cardType":"ENERGY","name":"Fire Energy","trainerType":"ITEM"}"#,
        r#"{"instanceId":"i","cardId":"c","cardType":"POKEMON","name":"Pikachu","energyKind":"BASIC"}"#,
    ];
    for json in misfiled {
        let err = serde_json::from_str::<Card>(json).unwrap_err();
        assert!(err.to_string().contains("can only be set on"), "{err}");
    }

    let zero_hp = r#"{"instanceId":"i","cardId":"c","cardType":"POKEMON","name":"Ghost","hp":0}"#;
    assert!(serde_json::from_str::<Card>(zero_hp).is_err());

    let potion = r#"{"instanceId":"i","cardId":"base1-94","cardType":"TRAINER","name":"Potion",
        "trainerType":"ITEM","trainerEffects":[{"effectType":"HEAL","amount":20,"target":"SELF"}]}"#;
    let card: Card = serde_json::from_str(potion).unwrap();
    assert_eq!(card.trainer_kind(), Some(TrainerKind::Item));
    assert_eq!(card.trainer_effects().len(), 1);
}

fn energy_type() -> impl Strategy<Value = EnergyType> {
    prop::sample::select(EnergyType::VARIANTS.to_vec())
}

proptest! {
    /// Property: a provision exists only if its invariants hold
    #[test]
    fn prop_energy_provision_invariants(
        types in prop::collection::vec(energy_type(), 0..3),
        amount in 0u32..4,
        is_special in any::<bool>(),
        restricted in any::<bool>(),
        extra in any::<bool>(),
    ) {
        let restrictions = if restricted { vec!["Evolved only".to_string()] } else { Vec::new() };
        let effects = if extra { vec!["Heal 10".to_string()] } else { Vec::new() };
        let expected_ok = !types.is_empty()
            && amount >= 1
            && (is_special || (amount <= 1 && !restricted && !extra));

        let result = EnergyProvision::new(types.clone(), amount, is_special, restrictions, effects);
        prop_assert_eq!(result.is_ok(), expected_ok);
        if let Ok(provision) = result {
            prop_assert_eq!(provision.types(), types.as_slice());
            prop_assert!(provision.amount() >= 1);
        }
    }
}
