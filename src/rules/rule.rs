//! Card rules: passive, always-on modifiers printed on a card.
//!
//! A rule is distinct from an ability: nobody activates it, it simply holds
//! ("This Pokémon can't retreat", "When this Pokémon is Knocked Out, your
//! opponent takes 2 more Prize cards"). Rules are data; an external engine
//! consults them in priority order.
//!
//! ## Metadata
//!
//! Each rule kind declares the metadata keys it accepts. A `RuleRecord` is
//! assembled freely (builder style, or from JSON); turning it into a
//! `CardRule` checks text and metadata against the kind's schema, so every
//! `CardRule` in existence is valid. `RuleSet::new` runs that check over a
//! whole list at once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{EnergyType, SpecialCondition, Vocabulary};
use crate::effects::{FieldReader, FieldValue, Fields};
use crate::error::ValidationError;

use super::condition::Condition;

/// Broad grouping of rule kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCategory {
    Movement,
    Attack,
    Damage,
    Status,
    Prize,
    Evolution,
    Play,
    Energy,
}

/// Kind of card rule.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::IntoStaticStr,
    strum_macros::VariantArray,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    // Movement
    CannotRetreat,
    FreeRetreat,
    RetreatCostChange,
    // Attack
    CannotAttack,
    AttackCostChange,
    ExtraAttackDamage,
    AttackRequiresCoinFlip,
    // Damage
    DamageReduction,
    DamageImmunity,
    ExtraDamageTaken,
    NoWeakness,
    // Status
    StatusImmunity,
    AutoCureStatus,
    StatusOnAttach,
    // Prize
    ExtraPrize,
    ReducedPrize,
    NoPrize,
    // Evolution
    CannotEvolve,
    EvolveImmediately,
    LevelUp,
    BreakEvolution,
    // Play
    OnePerDeck,
    PrismStar,
    CannotPlayFirstTurn,
    // Energy
    EnergyCostReduction,
    EnergyAttachLimit,
    ExtraEnergyProvided,
}

impl Vocabulary for RuleType {
    const FIELD: &'static str = "ruleType";
}

/// Shape a metadata value must have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetaKind {
    /// Integer >= 0.
    Count,
    /// Integer >= 1.
    Positive,
    /// Any integer.
    Signed,
    /// Non-empty string.
    Text,
    EnergyType,
    /// Array of special-condition names.
    ConditionList,
    /// Array of energy-type names.
    EnergyTypeList,
    /// Array of free strings.
    TextList,
}

/// One metadata key a rule kind accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetaField {
    pub name: &'static str,
    pub kind: MetaKind,
    pub required: bool,
}

const fn required(name: &'static str, kind: MetaKind) -> MetaField {
    MetaField { name, kind, required: true }
}

const fn optional(name: &'static str, kind: MetaKind) -> MetaField {
    MetaField { name, kind, required: false }
}

const NO_METADATA: &[MetaField] = &[];
const SIGNED_AMOUNT: &[MetaField] = &[required("amount", MetaKind::Signed)];
const COUNT_AMOUNT: &[MetaField] = &[required("amount", MetaKind::Count)];
const DAMAGE_SOURCES: &[MetaField] = &[optional("sources", MetaKind::TextList)];
const OPTIONAL_CONDITIONS: &[MetaField] = &[optional("conditions", MetaKind::ConditionList)];
const REQUIRED_CONDITIONS: &[MetaField] = &[required("conditions", MetaKind::ConditionList)];
const PRIZE_COUNT: &[MetaField] = &[required("prizeCount", MetaKind::Count)];
const EVOLVES_FROM: &[MetaField] = &[required("evolvesFrom", MetaKind::Text)];
const MAX_COPIES: &[MetaField] = &[optional("maxCopies", MetaKind::Positive)];
const COST_REDUCTION: &[MetaField] = &[
    required("reduction", MetaKind::Count),
    optional("energyType", MetaKind::EnergyType),
];
const ATTACH_LIMIT: &[MetaField] = &[required("perTurn", MetaKind::Count)];
const EXTRA_ENERGY: &[MetaField] = &[
    required("amount", MetaKind::Count),
    optional("energyTypes", MetaKind::EnergyTypeList),
];

impl RuleType {
    /// Category this kind belongs to.
    #[must_use]
    pub const fn category(self) -> RuleCategory {
        use RuleType::*;
        match self {
            CannotRetreat | FreeRetreat | RetreatCostChange => RuleCategory::Movement,
            CannotAttack | AttackCostChange | ExtraAttackDamage | AttackRequiresCoinFlip => {
                RuleCategory::Attack
            }
            DamageReduction | DamageImmunity | ExtraDamageTaken | NoWeakness => RuleCategory::Damage,
            StatusImmunity | AutoCureStatus | StatusOnAttach => RuleCategory::Status,
            ExtraPrize | ReducedPrize | NoPrize => RuleCategory::Prize,
            CannotEvolve | EvolveImmediately | LevelUp | BreakEvolution => RuleCategory::Evolution,
            OnePerDeck | PrismStar | CannotPlayFirstTurn => RuleCategory::Play,
            EnergyCostReduction | EnergyAttachLimit | ExtraEnergyProvided => RuleCategory::Energy,
        }
    }

    /// Metadata keys this kind accepts. Any other key is a violation.
    #[must_use]
    pub const fn metadata_schema(self) -> &'static [MetaField] {
        use RuleType as R;
        match self {
            R::RetreatCostChange | R::AttackCostChange => SIGNED_AMOUNT,
            R::ExtraAttackDamage | R::DamageReduction | R::ExtraDamageTaken => COUNT_AMOUNT,
            R::DamageImmunity => DAMAGE_SOURCES,
            R::StatusImmunity | R::AutoCureStatus => OPTIONAL_CONDITIONS,
            R::StatusOnAttach => REQUIRED_CONDITIONS,
            R::ExtraPrize | R::ReducedPrize => PRIZE_COUNT,
            R::LevelUp | R::BreakEvolution => EVOLVES_FROM,
            R::OnePerDeck => MAX_COPIES,
            R::EnergyCostReduction => COST_REDUCTION,
            R::EnergyAttachLimit => ATTACH_LIMIT,
            R::ExtraEnergyProvided => EXTRA_ENERGY,
            R::CannotRetreat
            | R::FreeRetreat
            | R::CannotAttack
            | R::AttackRequiresCoinFlip
            | R::NoWeakness
            | R::NoPrize
            | R::CannotEvolve
            | R::EvolveImmediately
            | R::PrismStar
            | R::CannotPlayFirstTurn => NO_METADATA,
        }
    }
}

/// How early an engine should consider a rule relative to others.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RulePriority {
    Highest,
    High,
    #[default]
    Normal,
    Low,
    Lowest,
}

impl RulePriority {
    /// Numeric rank, 5 (HIGHEST) down to 1 (LOWEST).
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            RulePriority::Highest => 5,
            RulePriority::High => 4,
            RulePriority::Normal => 3,
            RulePriority::Low => 2,
            RulePriority::Lowest => 1,
        }
    }
}

/// Unchecked form of a card rule: the JSON wire shape and the rule builder.
///
/// ## Example
///
/// ```
/// use rust_tcg::rules::{RulePriority, RuleRecord, RuleType};
///
/// let rule = RuleRecord::new(RuleType::ExtraPrize, "Your opponent takes 1 more Prize card.")
///     .with_priority(RulePriority::High)
///     .with_meta("prizeCount", 1i64)
///     .build()
///     .unwrap();
///
/// assert_eq!(rule.meta_count("prizeCount"), Some(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleRecord {
    pub rule_type: RuleType,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub priority: RulePriority,
    #[serde(default, skip_serializing_if = "Fields::is_empty")]
    pub metadata: Fields,
}

impl RuleRecord {
    /// Start a rule with NORMAL priority, no conditions and no metadata.
    #[must_use]
    pub fn new(rule_type: RuleType, text: impl Into<String>) -> Self {
        Self {
            rule_type,
            text: text.into(),
            conditions: Vec::new(),
            priority: RulePriority::Normal,
            metadata: Fields::default(),
        }
    }

    /// Set the priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: RulePriority) -> Self {
        self.priority = priority;
        self
    }

    /// Add an activation condition. All conditions must hold.
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add a metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check text and metadata against the kind's schema.
    pub fn build(self) -> Result<CardRule, ValidationError> {
        CardRule::try_from(self)
    }
}

/// A passive rule printed on a card.
///
/// Only obtainable from a `RuleRecord` that passed its kind's schema, so
/// the metadata getters never see a malformed value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleRecord", into = "RuleRecord")]
pub struct CardRule {
    rule_type: RuleType,
    text: String,
    conditions: Vec<Condition>,
    priority: RulePriority,
    metadata: Fields,
}

impl CardRule {
    #[must_use]
    pub fn rule_type(&self) -> RuleType {
        self.rule_type
    }

    #[must_use]
    pub fn category(&self) -> RuleCategory {
        self.rule_type.category()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    #[must_use]
    pub fn priority(&self) -> RulePriority {
        self.priority
    }

    #[must_use]
    pub fn metadata(&self) -> &Fields {
        &self.metadata
    }

    /// Get a metadata value.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&FieldValue> {
        self.metadata.get(key)
    }

    /// Get a non-negative integer metadata value.
    #[must_use]
    pub fn meta_count(&self, key: &str) -> Option<u32> {
        self.meta(key)
            .and_then(FieldValue::as_int)
            .and_then(|v| u32::try_from(v).ok())
    }
}

impl TryFrom<RuleRecord> for CardRule {
    type Error = ValidationError;

    fn try_from(record: RuleRecord) -> Result<Self, Self::Error> {
        let owner = record.rule_type.as_str();
        if record.text.trim().is_empty() {
            return Err(ValidationError::invariant(owner, "rule text must not be empty"));
        }

        let mut reader = FieldReader::new(owner, &record.metadata);
        for field in record.rule_type.metadata_schema() {
            read_meta(&mut reader, field)?;
        }
        reader.finish()?;

        Ok(CardRule {
            rule_type: record.rule_type,
            text: record.text,
            conditions: record.conditions,
            priority: record.priority,
            metadata: record.metadata,
        })
    }
}

impl From<CardRule> for RuleRecord {
    fn from(rule: CardRule) -> Self {
        RuleRecord {
            rule_type: rule.rule_type,
            text: rule.text,
            conditions: rule.conditions,
            priority: rule.priority,
            metadata: rule.metadata,
        }
    }
}

fn read_meta(reader: &mut FieldReader<'_>, field: &MetaField) -> Result<(), ValidationError> {
    let name = field.name;
    let present = match field.kind {
        MetaKind::Count => reader.opt_count(name)?.is_some(),
        MetaKind::Positive => reader.opt_positive(name)?.is_some(),
        MetaKind::Signed => reader.opt_signed(name)?.is_some(),
        MetaKind::Text => match reader.opt_text(name)? {
            Some(text) if text.trim().is_empty() => {
                return Err(ValidationError::invariant(
                    reader.owner(),
                    format!("`{name}` must not be empty"),
                ))
            }
            other => other.is_some(),
        },
        MetaKind::EnergyType => reader.opt_enum::<EnergyType>(name)?.is_some(),
        MetaKind::ConditionList => {
            let list = reader.opt_text_list(name)?;
            if let Some(items) = &list {
                for item in items {
                    item.parse::<SpecialCondition>()
                        .map_err(|_| ValidationError::invalid_enum(name, item.as_str()))?;
                }
            }
            list.is_some()
        }
        MetaKind::EnergyTypeList => {
            let list = reader.opt_text_list(name)?;
            if let Some(items) = &list {
                for item in items {
                    item.parse::<EnergyType>()
                        .map_err(|_| ValidationError::invalid_enum(name, item.as_str()))?;
                }
            }
            list.is_some()
        }
        MetaKind::TextList => reader.opt_text_list(name)?.is_some(),
    };

    if field.required && !present {
        return Err(ValidationError::missing(reader.owner(), name));
    }
    Ok(())
}

impl fmt::Display for CardRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule_type, self.text)
    }
}
