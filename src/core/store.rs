//! Row access for stores that filter and sort locally

use crate::core::field::FieldValue;

/// Trait for rows that a local store can filter and sort
///
/// Implement this for entity types served by
/// [`InMemoryDataSource`](crate::storage::InMemoryDataSource). Field
/// names are server field names, the same ones a
/// [`ListQuery`](crate::core::ListQuery) carries in `order_by` and
/// `filters`.
pub trait Listable: Clone + Send + Sync {
    /// Value of a server field, `None` when the row has no such field
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Values a filter named `name` is matched against
    ///
    /// Defaults to the field of the same name. Override when a filter
    /// targets a related record (e.g. `categories` matching any category
    /// slug of a product).
    fn filter_values(&self, name: &str) -> Vec<FieldValue> {
        self.field_value(name).into_iter().collect()
    }
}
