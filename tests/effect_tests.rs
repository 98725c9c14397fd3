//! Effect library integration tests.
//!
//! Every discriminant of every effect union is built from its minimal
//! record, re-encoded, and checked for field-level error reporting.

use rust_tcg::effects::{AbilityEffect, AttackEffect, FieldValue, RawEffect, TrainerEffect};
use rust_tcg::error::ValidationError;
use rust_tcg::rules::Condition;

/// (effectType, minimal fields, required fields)
type Case = (&'static str, Vec<(&'static str, FieldValue)>, &'static [&'static str]);

fn case(
    kind: &'static str,
    fields: Vec<(&'static str, FieldValue)>,
    required: &'static [&'static str],
) -> Case {
    (kind, fields, required)
}

fn int(value: i64) -> FieldValue {
    FieldValue::Int(value)
}

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

fn raw(effect_type: &str, fields: &[(&'static str, FieldValue)]) -> RawEffect {
    fields
        .iter()
        .fold(RawEffect::new(effect_type), |raw, (key, value)| raw.with(*key, value.clone()))
}

fn attack_cases() -> Vec<Case> {
    vec![
        case("DISCARD_ENERGY", vec![("amount", int(1)), ("target", text("SELF"))], &["amount", "target"]),
        case(
            "STATUS_CONDITION",
            vec![("condition", text("PARALYZED")), ("target", text("OPPONENT"))],
            &["condition", "target"],
        ),
        case("DAMAGE_MODIFIER", vec![("modifier", int(-20))], &["modifier"]),
        case("HEAL", vec![("amount", int(30)), ("target", text("SELF"))], &["amount", "target"]),
        case("PREVENT_DAMAGE", vec![("target", text("SELF"))], &["target"]),
        case("RECOIL_DAMAGE", vec![("amount", int(10))], &["amount"]),
        case(
            "ENERGY_ACCELERATION",
            vec![("amount", int(1)), ("source", text("DECK")), ("target", text("OWN_BENCH"))],
            &["amount", "source", "target"],
        ),
        case("SWITCH_POKEMON", vec![("target", text("OPPONENT"))], &["target"]),
        case(
            "MOVE_DAMAGE_COUNTER",
            vec![
                ("sourceTarget", text("SELF")),
                ("destinationTarget", text("OPPONENT")),
                ("amount", int(2)),
            ],
            &["sourceTarget", "destinationTarget", "amount"],
        ),
        case("DISCARD_CARDS", vec![("amount", int(2)), ("target", text("SELF"))], &["amount", "target"]),
        case("CANNOT_ATTACK", vec![("target", text("SELF"))], &["target"]),
        case("CANNOT_RETREAT", vec![("target", text("OPPONENT"))], &["target"]),
    ]
}

fn ability_cases() -> Vec<Case> {
    vec![
        case("DRAW_CARDS", vec![("amount", int(1))], &["amount"]),
        case("SEARCH_DECK", vec![("amount", int(1))], &["amount"]),
        case("HEAL", vec![("amount", int(10)), ("target", text("ALL_OWN"))], &["amount", "target"]),
        case(
            "STATUS_CONDITION",
            vec![("condition", text("ASLEEP")), ("target", text("OPPONENT"))],
            &["condition", "target"],
        ),
        case("SWITCH_POKEMON", vec![("target", text("OWN_BENCH"))], &["target"]),
        case(
            "MOVE_DAMAGE_COUNTER",
            vec![
                ("sourceTarget", text("OWN_BENCH")),
                ("destinationTarget", text("SELF")),
                ("amount", int(1)),
            ],
            &["sourceTarget", "destinationTarget", "amount"],
        ),
        case(
            "ENERGY_ACCELERATION",
            vec![("amount", int(1)), ("source", text("HAND")), ("target", text("SELF"))],
            &["amount", "source", "target"],
        ),
        case("BOOST_ATTACK", vec![("amount", int(10))], &["amount"]),
        case("BOOST_HP", vec![("amount", int(20))], &["amount"]),
        case("REDUCE_DAMAGE", vec![("amount", int(10))], &["amount"]),
        case("DISCARD_FROM_HAND", vec![("amount", int(1))], &["amount"]),
        case(
            "ATTACH_FROM_DISCARD",
            vec![("amount", int(1)), ("target", text("SELF"))],
            &["amount", "target"],
        ),
        case("RETRIEVE_FROM_DISCARD", vec![("amount", int(1))], &["amount"]),
    ]
}

fn trainer_cases() -> Vec<Case> {
    vec![
        case("DRAW_CARDS", vec![("amount", int(7))], &["amount"]),
        case("HEAL", vec![("amount", int(20)), ("target", text("SELF"))], &["amount", "target"]),
        case("SEARCH_DECK", vec![("amount", int(1))], &["amount"]),
        case("SWITCH_ACTIVE", vec![("target", text("OWN_BENCH"))], &["target"]),
        case("CURE_STATUS", vec![("target", text("SELF"))], &["target"]),
        case("DISCARD_HAND", vec![], &[]),
        case("DISCARD_ENERGY", vec![("amount", int(1)), ("target", text("OPPONENT"))], &["amount", "target"]),
        case(
            "TRADE_CARDS",
            vec![("discardAmount", int(2)), ("searchAmount", int(1))],
            &["discardAmount", "searchAmount"],
        ),
        case("RETRIEVE_FROM_DISCARD", vec![("amount", int(2))], &["amount"]),
        case("RETRIEVE_ENERGY", vec![("amount", int(2))], &["amount"]),
        case("INCREASE_DAMAGE", vec![("amount", int(10))], &["amount"]),
        case("REDUCE_DAMAGE", vec![("amount", int(20))], &["amount"]),
        case("LOOK_AT_DECK", vec![("amount", int(5)), ("target", text("OPPONENT"))], &["amount", "target"]),
    ]
}

/// Shared checks over one union's case table.
fn check_cases<E>(cases: Vec<Case>, all_types: &[&str])
where
    E: for<'a> TryFrom<&'a RawEffect, Error = ValidationError> + PartialEq + std::fmt::Debug,
    for<'a> RawEffect: From<&'a E>,
{
    let covered: Vec<&str> = cases.iter().map(|(kind, _, _)| *kind).collect();
    for kind in all_types {
        assert!(covered.contains(kind), "no test case for {kind}");
    }

    for (kind, fields, required) in cases {
        let record = raw(kind, &fields);
        let effect = E::try_from(&record).unwrap_or_else(|e| panic!("{kind}: {e}"));

        // encode then decode yields the same effect
        let encoded = RawEffect::from(&effect);
        assert_eq!(encoded.effect_type, kind);
        assert_eq!(E::try_from(&encoded).unwrap(), effect, "{kind}");

        for field in required {
            let without: Vec<_> = fields.iter().filter(|(k, _)| k != field).cloned().collect();
            let err = E::try_from(&raw(kind, &without)).unwrap_err();
            let expected = ValidationError::MissingField {
                owner: kind.to_string(),
                field: (*field).to_string(),
            };
            assert_eq!(err, expected, "{kind} without {field}");
        }

        let extra = record.clone().with("bogus", 1i64);
        let err = E::try_from(&extra).unwrap_err();
        assert_eq!(err.field(), Some("bogus"), "{kind} with extra field");
    }
}

/// Test that every attack effect decodes, round trips and rejects bad fields
#[test]
fn test_every_attack_effect() {
    check_cases::<AttackEffect>(attack_cases(), AttackEffect::EFFECT_TYPES);
}

/// Test that every ability effect decodes, round trips and rejects bad fields
#[test]
fn test_every_ability_effect() {
    check_cases::<AbilityEffect>(ability_cases(), AbilityEffect::EFFECT_TYPES);
}

/// Test that every trainer effect decodes, round trips and rejects bad fields
#[test]
fn test_every_trainer_effect() {
    check_cases::<TrainerEffect>(trainer_cases(), TrainerEffect::EFFECT_TYPES);
}

/// Test that an unknown effectType is rejected
#[test]
fn test_unknown_discriminant() {
    let err = AttackEffect::try_from(&RawEffect::new("TELEPORT")).unwrap_err();
    assert!(matches!(err, ValidationError::InvalidEnumValue { .. }));
    assert_eq!(err.field(), Some("effectType"));
}

/// Test that a mistyped value names its field
#[test]
fn test_wrong_value_type_names_field() {
    let record = RawEffect::new("HEAL").with("amount", "thirty").with("target", "SELF");
    let err = AttackEffect::try_from(&record).unwrap_err();
    assert!(matches!(err, ValidationError::WrongType { .. }));
    assert_eq!(err.field(), Some("amount"));
}

/// Test that an unknown vocabulary value names its field
#[test]
fn test_bad_sub_enum_names_field() {
    let record = RawEffect::new("STATUS_CONDITION")
        .with("condition", "FROZEN")
        .with("target", "OPPONENT");
    let err = AttackEffect::try_from(&record).unwrap_err();
    assert_eq!(err.field(), Some("condition"));
}

/// Test that moving damage counters needs two distinct targets and a positive amount
#[test]
fn test_move_damage_counter_invariants() {
    let same_target = RawEffect::new("MOVE_DAMAGE_COUNTER")
        .with("sourceTarget", "OPPONENT")
        .with("destinationTarget", "OPPONENT")
        .with("amount", 1i64);
    assert!(matches!(
        AttackEffect::try_from(&same_target).unwrap_err(),
        ValidationError::InvariantViolation { .. }
    ));

    let zero = RawEffect::new("MOVE_DAMAGE_COUNTER")
        .with("sourceTarget", "SELF")
        .with("destinationTarget", "OPPONENT")
        .with("amount", 0i64);
    assert!(AbilityEffect::try_from(&zero).is_err());
}

/// Test that moving damage counters prevents knockouts unless told otherwise
#[test]
fn test_move_damage_counter_prevents_knockout_by_default() {
    let record = RawEffect::new("MOVE_DAMAGE_COUNTER")
        .with("sourceTarget", "SELF")
        .with("destinationTarget", "OPPONENT")
        .with("amount", 3i64);
    match AttackEffect::try_from(&record).unwrap() {
        AttackEffect::MoveDamageCounter(moved) => {
            assert!(moved.prevent_knockout());
            assert_eq!(moved.amount(), 3);
        }
        other => panic!("Expected MoveDamageCounter, got {other:?}"),
    }
}

/// Test that poison damage is only accepted on POISONED
#[test]
fn test_poison_damage_only_with_poison() {
    let record = RawEffect::new("STATUS_CONDITION")
        .with("condition", "BURNED")
        .with("target", "OPPONENT")
        .with("poisonDamage", 20i64);
    assert!(AttackEffect::try_from(&record).is_err());
}

/// Test that a damage modifier keeps its condition
#[test]
fn test_damage_modifier_with_condition() {
    let record = RawEffect::new("DAMAGE_MODIFIER")
        .with("modifier", 30i64)
        .with("condition", Condition::SelfHasDamage);
    let effect = AttackEffect::try_from(&record).unwrap();
    assert_eq!(RawEffect::from(&effect), record);
}

/// Test that a JSON list of attack effects imports and round trips
#[test]
fn test_json_import() {
    let json = r#"[
        {"effectType": "STATUS_CONDITION", "condition": "POISONED", "target": "OPPONENT", "poisonDamage": 20},
        {"effectType": "CANNOT_ATTACK", "target": "SELF"},
        {"effectType": "DAMAGE_MODIFIER", "modifier": 10, "condition": {"type": "HP_AT_MOST", "value": 30}}
    ]"#;
    let effects: Vec<AttackEffect> = serde_json::from_str(json).unwrap();
    assert_eq!(effects.len(), 3);
    assert!(effects[1].targets_self());

    let out = serde_json::to_string(&effects).unwrap();
    let back: Vec<AttackEffect> = serde_json::from_str(&out).unwrap();
    assert_eq!(effects, back);
}

/// Test that JSON import reports the missing field by name
#[test]
fn test_json_import_reports_missing_field() {
    let err = serde_json::from_str::<TrainerEffect>(r#"{"effectType": "LOOK_AT_DECK", "amount": 3}"#)
        .unwrap_err();
    assert!(err.to_string().contains("target"));
}
