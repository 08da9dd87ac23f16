//! Field values of list rows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Textual form used when matching against filter values
    pub fn to_filter_text(&self) -> Option<String> {
        match self {
            FieldValue::String(s) => Some(s.clone()),
            FieldValue::Integer(i) => Some(i.to_string()),
            FieldValue::Float(f) => Some(f.to_string()),
            FieldValue::Boolean(b) => Some(b.to_string()),
            FieldValue::DateTime(dt) => Some(dt.to_rfc3339()),
            FieldValue::Null => None,
        }
    }

    /// Exact match against a filter value
    pub fn equals_text(&self, needle: &str) -> bool {
        self.to_filter_text().is_some_and(|text| text == needle)
    }

    /// Case-insensitive substring match, used by search filters
    pub fn contains_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.to_filter_text()
            .is_some_and(|text| text.to_lowercase().contains(&needle))
    }

    /// Total order for sorting rows
    ///
    /// Nulls sort first. Integers and floats compare numerically; values
    /// of unrelated kinds fall back to their textual form.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
            (FieldValue::Null, _) => Ordering::Less,
            (_, FieldValue::Null) => Ordering::Greater,
            (FieldValue::String(a), FieldValue::String(b)) => {
                a.to_lowercase().cmp(&b.to_lowercase())
            }
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => a.total_cmp(b),
            (FieldValue::Integer(a), FieldValue::Float(b)) => (*a as f64).total_cmp(b),
            (FieldValue::Float(a), FieldValue::Integer(b)) => a.total_cmp(&(*b as f64)),
            (FieldValue::Boolean(a), FieldValue::Boolean(b)) => a.cmp(b),
            (FieldValue::DateTime(a), FieldValue::DateTime(b)) => a.cmp(b),
            (a, b) => a.to_filter_text().cmp(&b.to_filter_text()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(dt: DateTime<Utc>) -> Self {
        FieldValue::DateTime(dt)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}
