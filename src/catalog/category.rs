//! Category rows

use super::{Attachment, CatalogEntity, SEARCH_FILTER, TYPE_FILTER};
use crate::config::{LOCALE_FILTER, ListViewConfig};
use crate::core::field::FieldValue;
use crate::core::store::Listable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub image: Vec<Attachment>,
    #[serde(default)]
    pub banner_image: Vec<Attachment>,

    /// Slug of the product type the category belongs to
    #[serde(rename = "type", default)]
    pub type_slug: Option<String>,

    #[serde(default)]
    pub parent: Option<u64>,
    #[serde(default)]
    pub children: Vec<Category>,

    pub language: String,
}

impl Category {
    /// Rows with sub-categories can be expanded in the table
    pub fn is_expandable(&self) -> bool {
        !self.children.is_empty()
    }
}

impl Listable for Category {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Integer(i64::try_from(self.id).ok()?),
            "name" => self.name.as_str().into(),
            "slug" => self.slug.as_str().into(),
            "details" => self.details.clone().into(),
            "type" => self.type_slug.clone().into(),
            "parent" => self.parent.and_then(|p| i64::try_from(p).ok()).into(),
            "language" => self.language.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}

impl CatalogEntity for Category {
    const ENTITY: &'static str = "categories";

    fn list_view_config() -> ListViewConfig {
        ListViewConfig::new(Self::ENTITY).with_filter_keys([
            SEARCH_FILTER,
            TYPE_FILTER,
            LOCALE_FILTER,
        ])
    }

    fn icon_name(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}
