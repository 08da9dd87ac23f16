//! In-memory implementation of DataSource for testing and development

use crate::core::field::FieldValue;
use crate::core::query::ListQuery;
use crate::core::sort::SortDirection;
use crate::core::source::{DataSource, FetchedPage};
use crate::core::store::Listable;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, RwLock};

/// In-memory data source
///
/// Resolves a [`ListQuery`] the way the admin API does: all filters must
/// match (substring match for search filters, exact match otherwise),
/// rows are ordered by `order_by`, and pages past the end come back
/// empty. Pagination metadata is reported in the API's snake_case shape.
#[derive(Clone)]
pub struct InMemoryDataSource<T> {
    rows: Arc<RwLock<Vec<T>>>,
    search_filters: Vec<String>,
}

impl<T: Listable> InMemoryDataSource<T> {
    /// Create a new in-memory data source
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: Arc::new(RwLock::new(rows)),
            search_filters: Vec::new(),
        }
    }

    /// Filters matched by case-insensitive substring instead of equality
    pub fn with_search_filters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_filters = names.into_iter().map(Into::into).collect();
        self
    }

    /// Add a row
    pub fn insert(&self, row: T) -> Result<()> {
        let mut rows = self
            .rows
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        rows.push(row);

        Ok(())
    }

    /// Number of rows, ignoring filters
    pub fn len(&self) -> Result<usize> {
        let rows = self
            .rows
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(rows.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn matches(&self, row: &T, name: &str, value: &str) -> bool {
        let search = self.search_filters.iter().any(|s| s == name);
        row.filter_values(name).iter().any(|field| {
            if search {
                field.contains_text(value)
            } else {
                field.equals_text(value)
            }
        })
    }

    fn apply_sort(&self, rows: &mut [T], field: &str, direction: SortDirection) {
        rows.sort_by(|a, b| {
            let a = a.field_value(field).unwrap_or(FieldValue::Null);
            let b = b.field_value(field).unwrap_or(FieldValue::Null);
            match direction {
                SortDirection::Asc => a.compare(&b),
                SortDirection::Desc => b.compare(&a),
            }
        });
    }
}

#[async_trait]
impl<T: Listable + 'static> DataSource<T> for InMemoryDataSource<T> {
    async fn fetch_page(&self, query: &ListQuery) -> Result<FetchedPage<T>> {
        let mut matched: Vec<T> = {
            let rows = self
                .rows
                .read()
                .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

            rows.iter()
                .filter(|row| {
                    query
                        .filters
                        .iter()
                        .all(|(name, value)| self.matches(row, name, value))
                })
                .cloned()
                .collect()
        };

        if let Some(field) = &query.order_by {
            self.apply_sort(&mut matched, field, query.sorted_by);
        }

        let total = matched.len() as u64;
        let limit = query.limit.max(1);
        let page = query.page.max(1);
        let offset = (page - 1).saturating_mul(limit);

        let items: Vec<T> = matched
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .collect();

        let from = if items.is_empty() { None } else { Some(offset + 1) };
        let to = from.map(|f| f + items.len() as u64 - 1);

        Ok(FetchedPage::new(
            items,
            json!({
                "total": total,
                "current_page": page,
                "per_page": limit,
                "last_page": total.div_ceil(limit).max(1),
                "from": from,
                "to": to,
            }),
        ))
    }
}
