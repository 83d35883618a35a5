//! Filter types for typed query building.
//!
//! A [`FilterField`] names a column, an operator and a value. Storage
//! adapters either translate it into SQL or evaluate it directly against
//! the value an entity reports for that column ([`FilterField::matches`]).

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// SQL `LIKE` pattern match.
    Like,
    /// SQL `ILIKE` case-insensitive pattern match.
    ILike,
    /// SQL `IN` list membership.
    In,
    /// SQL `IS NULL` check.
    IsNull,
    /// SQL `IS NOT NULL` check.
    IsNotNull,
}

impl FilterOp {
    /// Return the SQL operator for binary comparisons.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Like => "LIKE",
            Self::ILike => "ILIKE",
            Self::In => "IN",
            Self::IsNull => "IS NULL",
            Self::IsNotNull => "IS NOT NULL",
        }
    }
}

/// A dynamic filter value.
///
/// Deserialization is untagged; variants are tried top to bottom, so a
/// UUID-shaped string becomes [`FilterValue::Uuid`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A boolean value.
    Boolean(bool),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A UUID value.
    Uuid(uuid::Uuid),
    /// A timestamp value.
    Timestamp(DateTime<Utc>),
    /// A string value (enums are reported in their storage spelling).
    String(String),
    /// An exact decimal value (money).
    Decimal(Decimal),
    /// A list of string values (for `IN` operator).
    StringList(Vec<String>),
    /// Null / no value (for `IS NULL`, `IS NOT NULL`).
    Null,
}

impl FilterValue {
    /// Whether this value is SQL `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Integer(i) => Some(Decimal::from(*i)),
            Self::Float(f) => Decimal::try_from(*f).ok(),
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Textual form used for pattern matching and `IN` membership.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Uuid(u) => Some(u.to_string()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Decimal(d) => Some(d.to_string()),
            Self::Boolean(b) => Some(b.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Timestamp(t) => Some(t.to_rfc3339()),
            Self::StringList(_) | Self::Null => None,
        }
    }

    /// Compare two values of compatible types.
    ///
    /// Numbers compare across integer, float and decimal. A UUID compares
    /// with a string that parses as a UUID. Anything else is incomparable.
    pub fn compare(&self, other: &FilterValue) -> Option<Ordering> {
        match (self, other) {
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            (Self::Boolean(a), Self::Boolean(b)) => Some(a.cmp(b)),
            (Self::Uuid(a), Self::Uuid(b)) => Some(a.cmp(b)),
            (Self::Uuid(a), Self::String(b)) => {
                b.parse::<uuid::Uuid>().ok().map(|b| a.cmp(&b))
            }
            (Self::String(a), Self::Uuid(b)) => {
                a.parse::<uuid::Uuid>().ok().map(|a| a.cmp(b))
            }
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            (a, b) => match (a.as_decimal(), b.as_decimal()) {
                (Some(a), Some(b)) => Some(a.cmp(&b)),
                _ => None,
            },
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i16> for FilterValue {
    fn from(value: i16) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<uuid::Uuid> for FilterValue {
    fn from(value: uuid::Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<Decimal> for FilterValue {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The column or field name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        Self {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    /// Shorthand for an inequality filter.
    pub fn ne(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Ne, value)
    }

    /// Shorthand for a `>=` filter.
    pub fn gte(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Gte, value)
    }

    /// Shorthand for a `<=` filter.
    pub fn lte(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Lte, value)
    }

    /// Shorthand for a case-insensitive LIKE filter.
    pub fn ilike(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(field, FilterOp::ILike, FilterValue::String(pattern.into()))
    }

    /// Shorthand for an `IN` filter.
    pub fn one_of(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(field, FilterOp::In, FilterValue::StringList(values))
    }

    /// Shorthand for an `IS NULL` filter.
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::new(field, FilterOp::IsNull, FilterValue::Null)
    }

    /// Evaluate this condition against the value a record holds for `field`.
    ///
    /// Comparisons against `NULL` are false, mirroring SQL.
    pub fn matches(&self, actual: &FilterValue) -> bool {
        match self.op {
            FilterOp::IsNull => actual.is_null(),
            FilterOp::IsNotNull => !actual.is_null(),
            _ if actual.is_null() => false,
            FilterOp::Eq => actual.compare(&self.value) == Some(Ordering::Equal),
            FilterOp::Ne => matches!(
                actual.compare(&self.value),
                Some(Ordering::Less | Ordering::Greater)
            ),
            FilterOp::Gt => actual.compare(&self.value) == Some(Ordering::Greater),
            FilterOp::Gte => matches!(
                actual.compare(&self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOp::Lt => actual.compare(&self.value) == Some(Ordering::Less),
            FilterOp::Lte => matches!(
                actual.compare(&self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOp::Like => match (actual.as_text(), self.value.as_text()) {
                (Some(text), Some(pattern)) => like_match(&text, &pattern),
                _ => false,
            },
            FilterOp::ILike => match (actual.as_text(), self.value.as_text()) {
                (Some(text), Some(pattern)) => {
                    like_match(&text.to_lowercase(), &pattern.to_lowercase())
                }
                _ => false,
            },
            FilterOp::In => match (&self.value, actual.as_text()) {
                (FilterValue::StringList(list), Some(text)) => list.iter().any(|candidate| {
                    actual.compare(&FilterValue::String(candidate.clone()))
                        == Some(Ordering::Equal)
                        || *candidate == text
                }),
                _ => false,
            },
        }
    }
}

/// SQL `LIKE` semantics: `%` matches any run of characters, `_` exactly one.
fn like_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    // matched[j] = pattern[..j] matches text[..i] for the current i.
    let mut matched = vec![false; pattern.len() + 1];
    matched[0] = true;
    for (j, p) in pattern.iter().enumerate() {
        matched[j + 1] = matched[j] && *p == '%';
    }

    for t in &text {
        let mut next = vec![false; pattern.len() + 1];
        for (j, p) in pattern.iter().enumerate() {
            next[j + 1] = match p {
                '%' => next[j] || matched[j + 1],
                '_' => matched[j],
                c => matched[j] && c == t,
            };
        }
        matched = next;
    }

    matched[pattern.len()]
}
