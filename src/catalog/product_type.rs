//! Product type (brand) rows

use super::{Attachment, CatalogEntity, SEARCH_FILTER};
use crate::config::{LOCALE_FILTER, ListViewConfig};
use crate::core::field::FieldValue;
use crate::core::store::Listable;
use serde::{Deserialize, Serialize};

/// Image group of a product type (promotional sliders etc.)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeImage {
    #[serde(default)]
    pub image: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub images: Vec<TypeImage>,
    pub language: String,
}

impl ProductType {
    /// All attachments across image groups, in display order
    pub fn attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.images.iter().flat_map(|group| group.image.iter())
    }
}

impl Listable for ProductType {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Integer(i64::try_from(self.id).ok()?),
            "name" => self.name.as_str().into(),
            "slug" => self.slug.as_str().into(),
            "icon" => self.icon.clone().into(),
            "language" => self.language.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}

impl CatalogEntity for ProductType {
    const ENTITY: &'static str = "types";

    fn list_view_config() -> ListViewConfig {
        ListViewConfig::new(Self::ENTITY).with_filter_keys([SEARCH_FILTER, LOCALE_FILTER])
    }

    fn icon_name(&self) -> Option<&str> {
        self.icon.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attachments_flatten_groups() {
        let t: ProductType = serde_json::from_value(json!({
            "id": 1,
            "name": "Grocery",
            "slug": "grocery",
            "icon": "FruitsVegetable",
            "language": "en",
            "images": [
                { "image": [{ "id": 1, "original": "a.png" }, { "id": 2, "original": "b.png" }] },
                { "image": [{ "id": 3, "original": "c.png" }] }
            ]
        }))
        .unwrap();

        let originals: Vec<_> = t.attachments().filter_map(|a| a.original.as_deref()).collect();
        assert_eq!(originals, vec!["a.png", "b.png", "c.png"]);
    }
}
