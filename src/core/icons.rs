//! Icon lookup for category and type rows
//!
//! Rows name their icon by string (`"FruitsVegetable"`, `"Bakery"`...).
//! A name without a registered icon renders nothing; it is not an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A renderable icon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    /// Registered name
    pub name: String,

    /// SVG path data or asset reference, as the renderer expects it
    pub source: String,
}

/// Name to icon table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRegistry {
    icons: HashMap<String, Icon>,
}

impl IconRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an icon, replacing any previous one with the same name
    pub fn register(&mut self, name: impl Into<String>, source: impl Into<String>) {
        let name = name.into();
        self.icons.insert(
            name.clone(),
            Icon {
                name,
                source: source.into(),
            },
        );
    }

    /// Look up an icon by name
    pub fn get(&self, name: &str) -> Option<&Icon> {
        self.icons.get(name)
    }

    /// Look up the icon of a row that may not name one
    pub fn resolve(&self, name: Option<&str>) -> Option<&Icon> {
        name.filter(|n| !n.is_empty()).and_then(|n| self.get(n))
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl<N: Into<String>, S: Into<String>> FromIterator<(N, S)> for IconRegistry {
    fn from_iter<I: IntoIterator<Item = (N, S)>>(iter: I) -> Self {
        let mut registry = IconRegistry::new();
        for (name, source) in iter {
            registry.register(name, source);
        }
        registry
    }
}
