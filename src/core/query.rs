//! Query composition
//!
//! [`QueryComposer::compose`] turns the sort, filter and page state of a
//! view into the [`ListQuery`] sent to the data source. It is a pure
//! function of its inputs.
//!
//! # Wire parameters
//! ```text
//! page=2&limit=20&orderBy=created_at&sortedBy=desc&categories=shoes&name=red
//! ```
//! `orderBy` and `sortedBy` are omitted when no column is sorted, letting
//! the data source apply its default ordering.

use crate::core::filter::FilterSet;
use crate::core::pagination::PageRequest;
use crate::core::sort::{SortDirection, SortSpec};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Query sent to a data source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Page number (starts at 1)
    pub page: u64,

    /// Number of items per page
    pub limit: u64,

    /// Server field to order by, `None` for the source default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,

    /// Sort direction
    pub sorted_by: SortDirection,

    /// Active filters, all of which must match
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    /// Sort expression in `field:direction` form
    pub fn sort_expression(&self) -> Option<String> {
        self.order_by
            .as_ref()
            .map(|field| format!("{}:{}", field, self.sorted_by))
    }

    /// Value of an active filter
    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters.get(name).map(String::as_str)
    }

    /// Flatten into wire parameters
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];

        if let Some(field) = &self.order_by {
            pairs.push(("orderBy".to_string(), field.clone()));
            pairs.push(("sortedBy".to_string(), self.sorted_by.to_string()));
        }

        pairs.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }
}

/// One-off changes applied on top of a view's stored state
///
/// Used for requests such as exports that must not alter what the user
/// sees. Every field left at its default keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOverrides {
    pub sort: Option<SortSpec>,

    /// `Some(value)` replaces a filter, `None` clears it
    pub filters: BTreeMap<String, Option<String>>,

    pub page: Option<u64>,

    pub page_size: Option<u64>,
}

impl QueryOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(name.into(), Some(value.into()));
        self
    }

    pub fn clear_filter(mut self, name: impl Into<String>) -> Self {
        self.filters.insert(name.into(), None);
        self
    }

    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Composes [`ListQuery`] values for one view
#[derive(Debug, Clone, Default)]
pub struct QueryComposer {
    column_fields: HashMap<String, String>,
}

impl QueryComposer {
    /// Create a composer with a display column to server field mapping
    pub fn new(column_fields: HashMap<String, String>) -> Self {
        Self { column_fields }
    }

    /// Server field for a display column, identity when unmapped
    pub fn server_field<'a>(&'a self, column: &'a str) -> &'a str {
        self.column_fields
            .get(column)
            .map(String::as_str)
            .unwrap_or(column)
    }

    /// Compose a query from view state, overrides winning over state
    pub fn compose(
        &self,
        sort: &SortSpec,
        filters: &FilterSet,
        page: &PageRequest,
        overrides: Option<&QueryOverrides>,
    ) -> ListQuery {
        let Some(overrides) = overrides else {
            return self.build(sort, filters.clone(), *page);
        };

        let sort = overrides.sort.as_ref().unwrap_or(sort);
        let filters = filters.with_overrides(&overrides.filters);
        let page = PageRequest::new(
            overrides.page.unwrap_or(page.page),
            overrides.page_size.unwrap_or(page.page_size),
        );
        self.build(sort, filters, page)
    }

    fn build(&self, sort: &SortSpec, filters: FilterSet, page: PageRequest) -> ListQuery {
        ListQuery {
            page: page.page,
            limit: page.page_size,
            order_by: sort
                .column
                .as_deref()
                .map(|column| self.server_field(column).to_string()),
            sorted_by: sort.direction,
            filters: filters.into_map(),
        }
    }
}
