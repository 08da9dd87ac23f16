//! Catalog entities and their list view presets
//!
//! Products, categories and product types (brands) share one generic
//! [`ListController`](crate::controller::ListController); what differs per
//! entity is only its row type and its [`ListViewConfig`].

pub mod category;
pub mod product;
pub mod product_type;

pub use category::Category;
pub use product::Product;
pub use product_type::ProductType;

use crate::config::{ListViewConfig, ListViewsConfig};
use crate::core::store::Listable;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Free-text search filter
pub const SEARCH_FILTER: &str = "name";
/// Category slug filter
pub const CATEGORY_FILTER: &str = "categories";
/// Product type slug filter
pub const TYPE_FILTER: &str = "type";

/// An image attached to a catalog record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub original: Option<String>,
}

/// A catalog record shown in an admin list view
pub trait CatalogEntity: Listable + Serialize + DeserializeOwned + 'static {
    /// Entity name, also the view name
    const ENTITY: &'static str;

    /// List view preset for this entity
    fn list_view_config() -> ListViewConfig;

    /// Icon name for the icon column, if the row has one
    fn icon_name(&self) -> Option<&str> {
        None
    }
}

/// Presets for every catalog list view
pub fn catalog_views() -> ListViewsConfig {
    ListViewsConfig {
        views: vec![
            Product::list_view_config(),
            Category::list_view_config(),
            ProductType::list_view_config(),
        ],
    }
}

/// Apply a locale to a preset, the way the console does per request
pub fn localized<E: CatalogEntity>(locale: &str) -> ListViewConfig {
    let config = E::list_view_config();
    if locale.is_empty() {
        return config;
    }
    config.with_locale(locale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_views_are_valid() {
        let views = catalog_views();
        assert!(views.validate().is_ok());
        assert_eq!(views.views.len(), 3);
        assert!(views.view("products").is_some());
        assert!(views.view("categories").is_some());
        assert!(views.view("types").is_some());
    }

    #[test]
    fn test_localized_sets_locale() {
        let config = localized::<Category>("de");
        assert_eq!(config.locale.as_deref(), Some("de"));
        assert!(config.declares_filter(crate::config::LOCALE_FILTER));
        assert_eq!(localized::<Category>("").locale, None);
    }
}
