//! Validated rule lists.
//!
//! A `RuleSet` only exists if every record handed to it passed validation,
//! so a card never carries a partially-valid rule list.

use std::cmp::Reverse;

use im::Vector;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::Vocabulary;
use crate::error::{RuleSetError, RuleViolation};

use super::rule::{CardRule, RuleRecord, RuleType};

/// An ordered, fully validated list of card rules.
///
/// Insertion order is kept; `by_priority` gives the order an engine should
/// consult them in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<RuleRecord>", into = "Vec<CardRule>")]
pub struct RuleSet {
    rules: Vector<CardRule>,
}

impl RuleSet {
    /// Validate every record and build the set.
    ///
    /// Fails with one `RuleViolation` per offending record; nothing is kept
    /// on failure.
    pub fn new(records: impl IntoIterator<Item = RuleRecord>) -> Result<Self, RuleSetError> {
        let mut rules = Vector::new();
        let mut violations = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            let rule_type = record.rule_type.as_str();
            match CardRule::try_from(record) {
                Ok(rule) => rules.push_back(rule),
                Err(error) => violations.push(RuleViolation {
                    index,
                    rule_type,
                    error,
                }),
            }
        }

        if !violations.is_empty() {
            warn!(
                "rejected rule list of {} rule(s): {} violation(s)",
                rules.len() + violations.len(),
                violations.len()
            );
            return Err(RuleSetError { violations });
        }

        debug!("installed {} card rule(s)", rules.len());
        Ok(Self { rules })
    }

    /// Collect rules that are already validated.
    #[must_use]
    pub fn from_rules(rules: impl IntoIterator<Item = CardRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Create an empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CardRule> {
        self.rules.iter()
    }

    /// Whether any rule of this kind is present.
    #[must_use]
    pub fn has_rule_type(&self, rule_type: RuleType) -> bool {
        self.rules.iter().any(|rule| rule.rule_type() == rule_type)
    }

    /// All rules of a kind, in insertion order.
    #[must_use]
    pub fn by_type(&self, rule_type: RuleType) -> Vec<&CardRule> {
        self.rules
            .iter()
            .filter(|rule| rule.rule_type() == rule_type)
            .collect()
    }

    /// All rules, highest priority first. Ties keep insertion order.
    #[must_use]
    pub fn by_priority(&self) -> Vec<&CardRule> {
        let mut ordered: Vec<&CardRule> = self.rules.iter().collect();
        // sort_by_key is stable
        ordered.sort_by_key(|rule| Reverse(rule.priority().rank()));
        ordered
    }
}

impl TryFrom<Vec<RuleRecord>> for RuleSet {
    type Error = RuleSetError;

    fn try_from(records: Vec<RuleRecord>) -> Result<Self, Self::Error> {
        RuleSet::new(records)
    }
}

impl From<RuleSet> for Vec<CardRule> {
    fn from(set: RuleSet) -> Self {
        set.rules.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a CardRule;
    type IntoIter = im::vector::Iter<'a, CardRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
