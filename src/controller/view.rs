//! Read-only view of a controller for the rendering layer

use crate::config::TextDirection;
use crate::core::error::ErrorResponse;
use crate::core::filter::FilterSet;
use crate::core::pagination::{NormalizedPaginatorInfo, PageRequest};
use crate::core::query::ListQuery;
use crate::core::sort::{SortIndicator, SortSpec};
use serde::Serialize;

/// Outcome of a fetch that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// The response replaced the visible page
    Applied { sequence: u64 },

    /// A newer request was issued, or the view state changed, before
    /// this one resolved
    Discarded { sequence: u64, latest: u64 },
}

impl FetchOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, FetchOutcome::Applied { .. })
    }
}

/// A fetch that has been issued but not yet completed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub sequence: u64,
    pub query: ListQuery,
}

/// A page fetched outside the visible state (exports, previews)
#[derive(Debug, Clone, Serialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub paginator: NormalizedPaginatorInfo,
    pub query: ListQuery,
}

/// Everything a renderer needs to draw one list view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListViewState<T> {
    pub entity: String,
    pub items: Vec<T>,
    pub paginator: Option<NormalizedPaginatorInfo>,
    pub sort: SortSpec,
    pub filters: FilterSet,
    pub page: PageRequest,
    pub loading: bool,
    pub error: Option<ErrorResponse>,
    pub text_direction: TextDirection,
}

impl<T> ListViewState<T> {
    /// The pagination control is only shown when there is something to page
    pub fn show_pagination(&self) -> bool {
        self.paginator.is_some_and(|p| p.should_render())
    }

    /// Nothing to show: renderers display their empty-table text
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Header arrow state for `column`
    pub fn sort_indicator(&self, column: &str) -> SortIndicator {
        self.sort.indicator(column)
    }
}
