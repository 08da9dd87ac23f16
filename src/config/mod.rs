//! List view configuration loading and management
//!
//! Each view is configured once, at controller construction:
//!
//! ```yaml
//! views:
//!   - entity: products
//!     default_sort_column: created
//!     default_sort_direction: desc
//!     default_page_size: 20
//!     column_fields:
//!       created: created_at
//!     filter_keys: [name, type, categories, language]
//!     locale: en
//!     text_direction: ltr
//! ```

use crate::core::error::ConfigError;
use crate::core::pagination::DEFAULT_PAGE_SIZE;
use crate::core::sort::{SortDirection, SortSpec};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Filter name carrying the view locale
pub const LOCALE_FILTER: &str = "language";

/// Reading direction of the console language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Horizontal alignment of a table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Right,
}

impl TextDirection {
    /// Alignment of leading columns (id, title)
    pub fn align_start(&self) -> Alignment {
        match self {
            TextDirection::Ltr => Alignment::Left,
            TextDirection::Rtl => Alignment::Right,
        }
    }

    /// Alignment of trailing columns (actions)
    pub fn align_end(&self) -> Alignment {
        match self {
            TextDirection::Ltr => Alignment::Right,
            TextDirection::Rtl => Alignment::Left,
        }
    }
}

fn default_page_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Static configuration of one list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListViewConfig {
    /// Entity shown by the view (e.g., "products")
    pub entity: String,

    /// Column sorted before the user clicks any header
    #[serde(default)]
    pub default_sort_column: Option<String>,

    /// Direction used when a column becomes active
    #[serde(default)]
    pub default_sort_direction: SortDirection,

    /// Items per page
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,

    /// Display column -> server field (identity when absent)
    #[serde(default)]
    pub column_fields: HashMap<String, String>,

    /// Filters the view renders controls for
    ///
    /// Informational: other filter names are still accepted.
    #[serde(default)]
    pub filter_keys: Vec<String>,

    /// Content language, sent as the `language` filter when set
    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default)]
    pub text_direction: TextDirection,
}

impl ListViewConfig {
    /// Minimal configuration for `entity` with all defaults
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            default_sort_column: None,
            default_sort_direction: SortDirection::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
            column_fields: HashMap::new(),
            filter_keys: Vec::new(),
            locale: None,
            text_direction: TextDirection::default(),
        }
    }

    pub fn with_default_sort(
        mut self,
        column: impl Into<String>,
        direction: SortDirection,
    ) -> Self {
        self.default_sort_column = Some(column.into());
        self.default_sort_direction = direction;
        self
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.default_page_size = page_size;
        self
    }

    pub fn with_column_field(
        mut self,
        column: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        self.column_fields.insert(column.into(), field.into());
        self
    }

    pub fn with_filter_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_text_direction(mut self, direction: TextDirection) -> Self {
        self.text_direction = direction;
        self
    }

    /// Sort state before any header click
    pub fn initial_sort(&self) -> SortSpec {
        SortSpec::new(self.default_sort_column.clone(), self.default_sort_direction)
    }

    /// Whether the view declares a filter control for `name`
    pub fn declares_filter(&self, name: &str) -> bool {
        self.filter_keys.iter().any(|k| k == name)
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.entity.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "entity".to_string(),
                context: "list view configuration".to_string(),
            });
        }

        if self.default_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "default_page_size".to_string(),
                value: "0".to_string(),
                message: "page size must be greater than zero".to_string(),
            });
        }

        if let Some(column) = &self.default_sort_column {
            if column.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "default_sort_column".to_string(),
                    value: column.clone(),
                    message: "use null for the source default ordering".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Configuration of all list views of a console
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListViewsConfig {
    #[serde(default)]
    pub views: Vec<ListViewConfig>,
}

impl ListViewsConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.to_string(),
                }
            } else {
                ConfigError::IoError {
                    message: e.to_string(),
                }
            }
        })?;
        Self::parse(&content, Some(path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Self::parse(yaml, None)
    }

    fn parse(yaml: &str, file: Option<&str>) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: file.map(str::to_string),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every view
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.views.iter().try_for_each(ListViewConfig::validate)
    }

    /// Find the view for an entity
    pub fn view(&self, entity: &str) -> Option<&ListViewConfig> {
        self.views.iter().find(|v| v.entity == entity)
    }

    /// Merge configurations
    ///
    /// Later configurations replace earlier views with the same entity;
    /// new entities are appended in order of first appearance.
    pub fn merge(configs: Vec<ListViewsConfig>) -> Self {
        let mut views: Vec<ListViewConfig> = Vec::new();

        for config in configs {
            for view in config.views {
                match views.iter_mut().find(|v| v.entity == view.entity) {
                    Some(existing) => *existing = view,
                    None => views.push(view),
                }
            }
        }

        Self { views }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_yaml() {
        let config = ListViewsConfig::from_yaml_str("views:\n  - entity: types\n").unwrap();
        let view = config.view("types").unwrap();
        assert_eq!(view.default_page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(view.default_sort_direction, SortDirection::Desc);
        assert_eq!(view.initial_sort(), SortSpec::default());
        assert_eq!(view.text_direction, TextDirection::Ltr);
    }

    #[test]
    fn test_yaml_serialization() {
        let config = ListViewsConfig {
            views: vec![
                ListViewConfig::new("products")
                    .with_default_sort("created", SortDirection::Desc)
                    .with_column_field("created", "created_at")
                    .with_filter_keys(["name", "type"]),
            ],
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = ListViewsConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = ListViewConfig::new("types").with_page_size(0).validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "default_page_size"
        ));
    }

    #[test]
    fn test_empty_entity_rejected() {
        let err = ListViewConfig::new(" ").validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { .. }));
    }

    #[test]
    fn test_rtl_alignment() {
        assert_eq!(TextDirection::Rtl.align_start(), Alignment::Right);
        assert_eq!(TextDirection::Rtl.align_end(), Alignment::Left);
        assert_eq!(TextDirection::Ltr.align_start(), Alignment::Left);
    }
}
