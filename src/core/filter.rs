//! Named filter predicates for list views

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalize a raw filter value
///
/// `None`, empty and whitespace-only strings all mean "inactive".
/// Anything else is kept as given.
pub fn normalize_value(value: Option<&str>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v.to_string()),
        _ => None,
    }
}

/// Active filters of a list view
///
/// Only active filters are stored, so composing a query never emits
/// empty-string parameters. Entries are kept sorted by name, which makes
/// composed queries deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    entries: BTreeMap<String, String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear one filter
    ///
    /// Returns `true` when the active value actually changed.
    pub fn set(&mut self, name: &str, value: Option<&str>) -> bool {
        match normalize_value(value) {
            Some(value) => {
                if self.entries.get(name) == Some(&value) {
                    return false;
                }
                self.entries.insert(name.to_string(), value);
                true
            }
            None => self.entries.remove(name).is_some(),
        }
    }

    /// Value of an active filter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Active filters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply per-call overrides without touching `self`
    ///
    /// `Some(value)` replaces a filter, `None` clears it.
    pub fn with_overrides(&self, overrides: &BTreeMap<String, Option<String>>) -> FilterSet {
        let mut merged = self.clone();
        for (name, value) in overrides {
            merged.set(name, value.as_deref());
        }
        merged
    }

    pub(crate) fn into_map(self) -> BTreeMap<String, String> {
        self.entries
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for (k, v) in iter {
            set.set(k.as_ref(), Some(v.as_ref()));
        }
        set
    }
}
