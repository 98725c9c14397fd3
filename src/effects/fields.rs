//! Field records: the JSON-shaped form effects and rule metadata arrive in.
//!
//! An import pipeline hands us flat records like
//! `{ "effectType": "HEAL", "amount": 30, "target": "SELF" }`.
//! `FieldReader` pulls typed values out of such a record, naming the
//! offending field on every failure, and rejects keys nobody asked for.
//!
//! ## FieldValue Types
//!
//! - `Bool`: flags (`coinFlip`, `preventKnockout`)
//! - `Int`: counts and modifiers
//! - `Text`: enum names and free text
//! - `IntList` / `TextList`: arrays
//! - `Record`: a nested object (a `Condition`)
//! - `Null`: an explicit JSON `null`, read as absent

use std::num::NonZeroU32;
use std::str::FromStr;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::rules::Condition;

/// A value inside a field record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    IntList(Vec<i64>),
    TextList(Vec<String>),
    Record(Fields),
}

impl FieldValue {
    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Get as a list of strings. An empty list of any element type counts.
    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::TextList(v) => Some(v),
            FieldValue::IntList(v) if v.is_empty() => Some(&[][..]),
            _ => None,
        }
    }

    /// Get as a nested record.
    #[must_use]
    pub fn as_record(&self) -> Option<&Fields> {
        match self {
            FieldValue::Record(r) => Some(r),
            _ => None,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(i64::from(v))
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Int(i64::from(v))
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        FieldValue::TextList(v)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(v: Vec<&str>) -> Self {
        FieldValue::TextList(v.into_iter().map(str::to_string).collect())
    }
}

impl From<Condition> for FieldValue {
    fn from(condition: Condition) -> Self {
        let mut record = Fields::default();
        record.insert("type".to_string(), condition.kind().into());
        if let Some(value) = condition.value() {
            record.insert("value".to_string(), value.into());
        }
        FieldValue::Record(record)
    }
}

/// A flat, string-keyed record.
pub type Fields = FxHashMap<String, FieldValue>;

/// Flat wire record of an effect: discriminant plus payload fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEffect {
    #[serde(rename = "effectType")]
    pub effect_type: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl RawEffect {
    /// Create a record with no payload.
    pub fn new(effect_type: impl Into<String>) -> Self {
        Self {
            effect_type: effect_type.into(),
            fields: Fields::default(),
        }
    }

    /// Add a field (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a field only when a value is present.
    #[must_use]
    pub fn with_opt<V: Into<FieldValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }
}

/// Typed, tracking reader over a field record.
///
/// Every accessor marks its key as consumed; `finish` then fails on the
/// first key (alphabetically) that no accessor asked for.
pub struct FieldReader<'a> {
    owner: &'a str,
    fields: &'a Fields,
    seen: FxHashSet<&'a str>,
}

impl<'a> FieldReader<'a> {
    pub fn new(owner: &'a str, fields: &'a Fields) -> Self {
        Self {
            owner,
            fields,
            seen: FxHashSet::default(),
        }
    }

    /// Name of the record being read, used in error messages.
    #[must_use]
    pub fn owner(&self) -> &'a str {
        self.owner
    }

    fn take(&mut self, field: &str) -> Option<&'a FieldValue> {
        let (key, value) = self.fields.get_key_value(field)?;
        self.seen.insert(key.as_str());
        match value {
            FieldValue::Null => None,
            value => Some(value),
        }
    }

    fn wrong_type(&self, field: &str, expected: &'static str) -> ValidationError {
        ValidationError::WrongType {
            owner: self.owner.to_string(),
            field: field.to_string(),
            expected,
        }
    }

    fn opt_int(&mut self, field: &str) -> Result<Option<i64>, ValidationError> {
        match self.take(field) {
            None => Ok(None),
            Some(value) => value
                .as_int()
                .map(Some)
                .ok_or_else(|| self.wrong_type(field, "an integer")),
        }
    }

    fn non_negative(&self, field: &str, raw: i64) -> Result<u32, ValidationError> {
        u32::try_from(raw).map_err(|_| {
            ValidationError::invariant(self.owner, format!("`{field}` must be >= 0, got {raw}"))
        })
    }

    /// Optional non-negative integer.
    pub fn opt_count(&mut self, field: &str) -> Result<Option<u32>, ValidationError> {
        match self.opt_int(field)? {
            None => Ok(None),
            Some(raw) => self.non_negative(field, raw).map(Some),
        }
    }

    /// Required non-negative integer.
    pub fn count(&mut self, field: &str) -> Result<u32, ValidationError> {
        self.opt_count(field)?
            .ok_or_else(|| ValidationError::missing(self.owner, field))
    }

    /// Required integer >= 1.
    pub fn positive(&mut self, field: &str) -> Result<NonZeroU32, ValidationError> {
        let value = self.count(field)?;
        NonZeroU32::new(value).ok_or_else(|| {
            ValidationError::invariant(self.owner, format!("`{field}` must be >= 1, got 0"))
        })
    }

    /// Optional integer >= 1.
    pub fn opt_positive(
        &mut self,
        field: &str,
    ) -> Result<Option<NonZeroU32>, ValidationError> {
        match self.opt_count(field)? {
            None => Ok(None),
            Some(value) => NonZeroU32::new(value).map(Some).ok_or_else(|| {
                ValidationError::invariant(self.owner, format!("`{field}` must be >= 1, got 0"))
            }),
        }
    }

    /// Optional signed integer.
    pub fn opt_signed(&mut self, field: &str) -> Result<Option<i32>, ValidationError> {
        match self.opt_int(field)? {
            None => Ok(None),
            Some(raw) => i32::try_from(raw).map(Some).map_err(|_| {
                ValidationError::invariant(self.owner, format!("`{field}` is out of range: {raw}"))
            }),
        }
    }

    /// Required signed integer.
    pub fn signed(&mut self, field: &str) -> Result<i32, ValidationError> {
        self.opt_signed(field)?
            .ok_or_else(|| ValidationError::missing(self.owner, field))
    }

    /// Optional bool with a default.
    pub fn flag(&mut self, field: &str, default: bool) -> Result<bool, ValidationError> {
        match self.take(field) {
            None => Ok(default),
            Some(value) => value
                .as_bool()
                .ok_or_else(|| self.wrong_type(field, "a boolean")),
        }
    }

    /// Optional text.
    pub fn opt_text(&mut self, field: &str) -> Result<Option<String>, ValidationError> {
        match self.take(field) {
            None => Ok(None),
            Some(value) => value
                .as_text()
                .map(|s| Some(s.to_string()))
                .ok_or_else(|| self.wrong_type(field, "a string")),
        }
    }

    /// Required non-empty text.
    pub fn text(&mut self, field: &str) -> Result<String, ValidationError> {
        let text = self
            .opt_text(field)?
            .ok_or_else(|| ValidationError::missing(self.owner, field))?;
        if text.trim().is_empty() {
            return Err(ValidationError::invariant(
                self.owner,
                format!("`{field}` must not be empty"),
            ));
        }
        Ok(text)
    }

    /// Optional value of a closed enum.
    pub fn opt_enum<T>(&mut self, field: &str) -> Result<Option<T>, ValidationError>
    where
        T: FromStr,
    {
        match self.take(field) {
            None => Ok(None),
            Some(value) => {
                let text = value
                    .as_text()
                    .ok_or_else(|| self.wrong_type(field, "a string"))?;
                text.parse()
                    .map(Some)
                    .map_err(|_| ValidationError::invalid_enum(field, text))
            }
        }
    }

    /// Required value of a closed enum.
    pub fn enum_value<T>(&mut self, field: &str) -> Result<T, ValidationError>
    where
        T: FromStr,
    {
        self.opt_enum(field)?
            .ok_or_else(|| ValidationError::missing(self.owner, field))
    }

    /// Optional text array; absent reads as `None`.
    pub fn opt_text_list(&mut self, field: &str) -> Result<Option<Vec<String>>, ValidationError> {
        match self.take(field) {
            None => Ok(None),
            Some(value) => value
                .as_text_list()
                .map(|list| Some(list.to_vec()))
                .ok_or_else(|| self.wrong_type(field, "an array of strings")),
        }
    }

    /// Optional array of closed-enum values; absent reads as empty.
    pub fn enum_list<T>(&mut self, field: &str) -> Result<Vec<T>, ValidationError>
    where
        T: FromStr,
    {
        let Some(items) = self.opt_text_list(field)? else {
            return Ok(Vec::new());
        };
        items
            .iter()
            .map(|item| {
                item.parse()
                    .map_err(|_| ValidationError::invalid_enum(field, item.as_str()))
            })
            .collect()
    }

    /// Optional nested condition.
    pub fn opt_condition(&mut self, field: &str) -> Result<Option<Condition>, ValidationError> {
        let Some(value) = self.take(field) else {
            return Ok(None);
        };
        let record = value
            .as_record()
            .ok_or_else(|| self.wrong_type(field, "an object"))?;

        let mut nested = FieldReader::new(field, record);
        let kind = nested
            .opt_text("type")?
            .ok_or_else(|| ValidationError::missing(field, "type"))?;
        let raw_value = nested.opt_int("value")?;
        nested.finish()?;
        Condition::from_parts(&kind, raw_value).map(Some)
    }

    /// Fail on the first field no accessor consumed.
    pub fn finish(self) -> Result<(), ValidationError> {
        let mut extra: Vec<&str> = self
            .fields
            .keys()
            .map(String::as_str)
            .filter(|key| !self.seen.contains(key))
            .collect();
        extra.sort_unstable();

        match extra.first() {
            None => Ok(()),
            Some(field) => Err(ValidationError::UnexpectedField {
                owner: self.owner.to_string(),
                field: (*field).to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EffectTarget;

    fn record(pairs: &[(&str, FieldValue)]) -> Fields {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::from(5i64).as_int(), Some(5));
        assert_eq!(FieldValue::from(true).as_bool(), Some(true));
        assert_eq!(FieldValue::from("SELF").as_text(), Some("SELF"));
        assert_eq!(FieldValue::IntList(Vec::new()).as_text_list(), Some(&[][..]));
        assert_eq!(FieldValue::from(5i64).as_bool(), None);
    }

    #[test]
    fn test_reader_typed_values() {
        let fields = record(&[
            ("amount", 3i64.into()),
            ("target", "OPPONENT".into()),
            ("coinFlip", true.into()),
        ]);
        let mut reader = FieldReader::new("TEST", &fields);

        assert_eq!(reader.positive("amount").unwrap().get(), 3);
        assert_eq!(reader.enum_value::<EffectTarget>("target").unwrap(), EffectTarget::Opponent);
        assert!(reader.flag("coinFlip", false).unwrap());
        assert!(reader.flag("preventKnockout", true).unwrap());
        reader.finish().unwrap();
    }

    #[test]
    fn test_reader_missing_field() {
        let fields = Fields::default();
        let mut reader = FieldReader::new("HEAL", &fields);
        assert_eq!(
            reader.count("amount").unwrap_err(),
            ValidationError::missing("HEAL", "amount")
        );
    }

    #[test]
    fn test_reader_wrong_type() {
        let fields = record(&[("amount", "lots".into())]);
        let mut reader = FieldReader::new("HEAL", &fields);
        let err = reader.count("amount").unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { .. }));
        assert_eq!(err.field(), Some("amount"));
    }

    #[test]
    fn test_reader_negative_count() {
        let fields = record(&[("amount", (-1i64).into())]);
        let mut reader = FieldReader::new("HEAL", &fields);
        assert!(matches!(
            reader.count("amount").unwrap_err(),
            ValidationError::InvariantViolation { .. }
        ));
    }

    #[test]
    fn test_reader_bad_enum_names_field() {
        let fields = record(&[("target", "EVERYONE".into())]);
        let mut reader = FieldReader::new("HEAL", &fields);
        assert_eq!(
            reader.enum_value::<EffectTarget>("target").unwrap_err(),
            ValidationError::invalid_enum("target", "EVERYONE")
        );
    }

    #[test]
    fn test_reader_rejects_unconsumed_fields() {
        let fields = record(&[("amount", 1i64.into()), ("zeta", 1i64.into()), ("alpha", 1i64.into())]);
        let mut reader = FieldReader::new("DRAW_CARDS", &fields);
        reader.count("amount").unwrap();
        assert_eq!(
            reader.finish().unwrap_err(),
            ValidationError::UnexpectedField {
                owner: "DRAW_CARDS".to_string(),
                field: "alpha".to_string(),
            }
        );
    }

    #[test]
    fn test_reader_nested_condition() {
        let fields = record(&[("condition", Condition::HpAtMost(30).into())]);
        let mut reader = FieldReader::new("DAMAGE_MODIFIER", &fields);
        assert_eq!(reader.opt_condition("condition").unwrap(), Some(Condition::HpAtMost(30)));
        reader.finish().unwrap();
    }

    #[test]
    fn test_null_reads_as_absent() {
        let raw: RawEffect = serde_json::from_str(
            r#"{"effectType":"PREVENT_DAMAGE","target":"SELF","amount":null}"#,
        )
        .unwrap();
        assert_eq!(raw.fields.get("amount"), Some(&FieldValue::Null));

        let mut reader = FieldReader::new("PREVENT_DAMAGE", &raw.fields);
        assert_eq!(reader.opt_count("amount").unwrap(), None);
        assert_eq!(
            reader.count("amount").unwrap_err(),
            ValidationError::missing("PREVENT_DAMAGE", "amount")
        );
        reader.enum_value::<EffectTarget>("target").unwrap();
        reader.finish().unwrap();
    }

    #[test]
    fn test_raw_effect_json() {
        let raw: RawEffect =
            serde_json::from_str(r#"{"effectType":"HEAL","amount":30,"target":"SELF"}"#).unwrap();
        assert_eq!(raw.effect_type, "HEAL");
        assert_eq!(raw.fields.get("amount"), Some(&FieldValue::Int(30)));
        assert_eq!(raw.fields.get("target"), Some(&FieldValue::Text("SELF".to_string())));
    }
}
