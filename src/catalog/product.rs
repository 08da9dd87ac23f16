//! Product rows

use super::{Attachment, CATEGORY_FILTER, CatalogEntity, SEARCH_FILTER, TYPE_FILTER};
use crate::config::{LOCALE_FILTER, ListViewConfig};
use crate::core::field::FieldValue;
use crate::core::sort::SortDirection;
use crate::core::store::Listable;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub quantity: i64,
    pub status: String,

    /// Slug of the product type
    #[serde(rename = "type", default)]
    pub product_type: Option<String>,

    /// Slugs of the categories the product belongs to
    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub image: Option<Attachment>,

    pub language: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Price the shop currently charges
    pub fn effective_price(&self) -> f64 {
        self.sale_price.unwrap_or(self.price)
    }
}

impl Listable for Product {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let value = match field {
            "id" => FieldValue::Integer(i64::try_from(self.id).ok()?),
            "name" => self.name.as_str().into(),
            "slug" => self.slug.as_str().into(),
            "sku" => self.sku.clone().into(),
            "price" => self.price.into(),
            "sale_price" => self.sale_price.into(),
            "quantity" => self.quantity.into(),
            "status" => self.status.as_str().into(),
            "type" => self.product_type.clone().into(),
            "language" => self.language.as_str().into(),
            "created_at" => self.created_at.into(),
            "updated_at" => self.updated_at.into(),
            _ => return None,
        };
        Some(value)
    }

    fn filter_values(&self, name: &str) -> Vec<FieldValue> {
        match name {
            CATEGORY_FILTER => self
                .categories
                .iter()
                .map(|slug| FieldValue::from(slug.as_str()))
                .collect(),
            _ => self.field_value(name).into_iter().collect(),
        }
    }
}

impl CatalogEntity for Product {
    const ENTITY: &'static str = "products";

    fn list_view_config() -> ListViewConfig {
        ListViewConfig::new(Self::ENTITY)
            .with_default_sort("created", SortDirection::Desc)
            .with_column_field("created", "created_at")
            .with_column_field("updated", "updated_at")
            .with_filter_keys([SEARCH_FILTER, TYPE_FILTER, CATEGORY_FILTER, LOCALE_FILTER])
    }
}
