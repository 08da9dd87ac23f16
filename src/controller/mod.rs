//! The list view query controller
//!
//! One [`ListController`] drives one list view. It owns the sort, filter
//! and page state, composes the [`ListQuery`] for the data source, and
//! applies fetch results so that only the most recently issued request
//! ever reaches the screen.
//!
//! ```text
//! toggle_sort / set_filter ──▶ reset page ──┐
//! go_to_page ───────────────────────────────┼──▶ compose ──▶ refresh ──▶ DataSource
//!                                           │                   │
//!            ListViewState ◀── normalize ◀──┴── latest wins ◀───┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let controller = ListController::new(Category::list_view_config(), source)?;
//! controller.refresh().await?;
//!
//! controller.toggle_sort("name");
//! controller.refresh().await?;
//!
//! if controller.set_filter("type", Some("grocery")).is_some() {
//!     controller.refresh().await?;
//! }
//! ```

pub mod view;

pub use view::{FetchOutcome, ListPage, ListViewState, PendingFetch};

use crate::config::{LOCALE_FILTER, ListViewConfig};
use crate::core::error::{ListError, ListResult, TransportError};
use crate::core::events::{EventBus, ListEvent};
use crate::core::filter::FilterSet;
use crate::core::pagination::{NormalizedPaginatorInfo, PageRequest, normalize};
use crate::core::query::{ListQuery, QueryComposer, QueryOverrides};
use crate::core::sort::{SortIndicator, SortSpec};
use crate::core::source::{DataSource, FetchedPage};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Mutable state of one view
struct ListState<T> {
    sort: SortSpec,
    filters: FilterSet,
    page: PageRequest,

    /// Sequence number of the most recently issued fetch
    latest_sequence: u64,
    /// Sequence number of the most recent fetch that settled (applied or failed)
    settled_sequence: u64,

    items: Vec<T>,
    paginator: Option<NormalizedPaginatorInfo>,
    applied_query: Option<ListQuery>,
    error: Option<ListError>,
}

struct Inner<T, S> {
    config: ListViewConfig,
    composer: QueryComposer,
    source: S,
    events: Option<EventBus>,
    state: RwLock<ListState<T>>,
}

/// Sort, filter and pagination controller for one list view
///
/// Cheap to clone: clones share the same state, so a UI task and a fetch
/// task can both hold a handle.
pub struct ListController<T, S> {
    inner: Arc<Inner<T, S>>,
}

impl<T, S> Clone for ListController<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, S> ListController<T, S>
where
    T: Send + Sync + 'static,
    S: DataSource<T>,
{
    /// Create a controller for a view
    pub fn new(config: ListViewConfig, source: S) -> ListResult<Self> {
        Self::build(config, source, None)
    }

    /// Create a controller that publishes its events on `events`
    pub fn with_events(config: ListViewConfig, source: S, events: EventBus) -> ListResult<Self> {
        Self::build(config, source, Some(events))
    }

    fn build(config: ListViewConfig, source: S, events: Option<EventBus>) -> ListResult<Self> {
        config.validate()?;

        let mut filters = FilterSet::new();
        filters.set(LOCALE_FILTER, config.locale.as_deref());

        let state = ListState {
            sort: config.initial_sort(),
            filters,
            page: PageRequest::first(config.default_page_size),
            latest_sequence: 0,
            settled_sequence: 0,
            items: Vec::new(),
            paginator: None,
            applied_query: None,
            error: None,
        };

        Ok(Self {
            inner: Arc::new(Inner {
                composer: QueryComposer::new(config.column_fields.clone()),
                config,
                source,
                events,
                state: RwLock::new(state),
            }),
        })
    }

    // === Configuration ===

    pub fn config(&self) -> &ListViewConfig {
        &self.inner.config
    }

    /// Entity name of the view
    pub fn entity(&self) -> &str {
        &self.inner.config.entity
    }

    // === State mutations ===

    /// Toggle the sort on a column header and reset to the first page
    ///
    /// Returns the query to fetch next.
    pub fn toggle_sort(&self, column: &str) -> ListQuery {
        let (sort, query) = {
            let mut state = self.write();
            state
                .sort
                .toggle(column, self.inner.config.default_sort_direction);
            state.page = state.page.with_page(1);
            (state.sort.clone(), self.compose_state(&state, None))
        };

        tracing::debug!(
            view = %self.entity(),
            column = %column,
            direction = %sort.direction,
            "sort toggled"
        );
        self.publish(ListEvent::SortChanged {
            column: column.to_string(),
            direction: sort.direction,
        });
        query
    }

    /// Set or clear one filter
    ///
    /// `None`, empty and blank values clear the filter. Returns the query to
    /// fetch next, or `None` when the active value did not change (no page
    /// reset, nothing to refetch).
    pub fn set_filter(&self, name: &str, value: Option<&str>) -> Option<ListQuery> {
        let (active, query) = {
            let mut state = self.write();
            if !state.filters.set(name, value) {
                return None;
            }
            state.page = state.page.with_page(1);
            (
                state.filters.get(name).map(str::to_string),
                self.compose_state(&state, None),
            )
        };

        if !self.inner.config.filter_keys.is_empty() && !self.inner.config.declares_filter(name) {
            tracing::debug!(
                view = %self.entity(),
                filter = %name,
                "filter not declared by view, passing through"
            );
        }
        tracing::debug!(view = %self.entity(), filter = %name, value = ?active, "filter changed");
        self.publish(ListEvent::FilterChanged {
            name: name.to_string(),
            value: active,
        });
        Some(query)
    }

    /// Navigate to a page
    ///
    /// Pages below 1 clamp to 1. Pages past the last one are sent as-is;
    /// the data source answers them with an empty page. Returns `None`
    /// when already on that page.
    pub fn go_to_page(&self, page: i64) -> Option<ListQuery> {
        let page = u64::try_from(page).unwrap_or(0).max(1);

        let query = {
            let mut state = self.write();
            if state.page.page == page {
                return None;
            }
            state.page = state.page.with_page(page);
            self.compose_state(&state, None)
        };

        tracing::debug!(view = %self.entity(), page, "page changed");
        self.publish(ListEvent::PageChanged { page });
        Some(query)
    }

    /// Return to the first page
    pub fn reset_page(&self) {
        let mut state = self.write();
        state.page = state.page.with_page(1);
    }

    // === Reads ===

    pub fn sort(&self) -> SortSpec {
        self.read().sort.clone()
    }

    /// Header arrow state for `column`
    pub fn sort_indicator(&self, column: &str) -> SortIndicator {
        self.read().sort.indicator(column)
    }

    pub fn filters(&self) -> FilterSet {
        self.read().filters.clone()
    }

    pub fn page_request(&self) -> PageRequest {
        self.read().page
    }

    /// Pagination metadata of the visible page, `None` before the first success
    pub fn paginator(&self) -> Option<NormalizedPaginatorInfo> {
        self.read().paginator
    }

    /// Error of the latest settled fetch, cleared by the next success
    pub fn error(&self) -> Option<ListError> {
        self.read().error.clone()
    }

    /// Whether the most recently issued fetch is still outstanding
    pub fn is_loading(&self) -> bool {
        let state = self.read();
        state.latest_sequence > state.settled_sequence
    }

    /// Query whose result is currently visible
    pub fn applied_query(&self) -> Option<ListQuery> {
        self.read().applied_query.clone()
    }

    /// Query for the current state
    pub fn current_query(&self) -> ListQuery {
        let state = self.read();
        self.compose_state(&state, None)
    }

    /// Query for the current state with one-off overrides applied
    ///
    /// Stored state is left untouched.
    pub fn compose_with(&self, overrides: &QueryOverrides) -> ListQuery {
        let state = self.read();
        self.compose_state(&state, Some(overrides))
    }

    // === Fetching ===

    /// Register a new fetch for the current state
    ///
    /// Every call supersedes all earlier pending fetches.
    pub fn begin_fetch(&self) -> PendingFetch {
        let pending = {
            let mut state = self.write();
            state.latest_sequence += 1;
            PendingFetch {
                sequence: state.latest_sequence,
                query: self.compose_state(&state, None),
            }
        };

        tracing::debug!(
            view = %self.entity(),
            sequence = pending.sequence,
            page = pending.query.page,
            "fetch issued"
        );
        self.publish(ListEvent::FetchIssued {
            sequence: pending.sequence,
            query: pending.query.clone(),
        });
        pending
    }

    /// Apply the result of a fetch started with [`begin_fetch`](Self::begin_fetch)
    ///
    /// Results are discarded, failures included, when a newer fetch was
    /// issued or when sort, filters or page changed since this one was
    /// issued. A failure of a current fetch is recorded and returned while
    /// the previously visible page stays in place.
    pub fn complete_fetch(
        &self,
        pending: PendingFetch,
        result: anyhow::Result<FetchedPage<T>>,
    ) -> ListResult<FetchOutcome> {
        let mut state = self.write();

        let superseded = pending.sequence != state.latest_sequence;
        if superseded || pending.query != self.compose_state(&state, None) {
            let latest = state.latest_sequence;
            if !superseded {
                // Nothing newer is in flight; the view stops loading.
                state.settled_sequence = pending.sequence;
            }
            drop(state);
            tracing::debug!(
                view = %self.entity(),
                sequence = pending.sequence,
                latest,
                "stale response discarded"
            );
            self.publish(ListEvent::FetchDiscarded {
                sequence: pending.sequence,
                latest,
            });
            return Ok(FetchOutcome::Discarded {
                sequence: pending.sequence,
                latest,
            });
        }

        state.settled_sequence = pending.sequence;

        match result {
            Ok(page) => {
                let requested = PageRequest::new(pending.query.page, pending.query.limit);
                let paginator = normalize(&page.raw, &requested);

                state.items = page.items;
                state.paginator = Some(paginator);
                state.applied_query = Some(pending.query);
                state.error = None;
                drop(state);

                tracing::debug!(
                    view = %self.entity(),
                    sequence = pending.sequence,
                    total = paginator.total,
                    "fetch applied"
                );
                self.publish(ListEvent::FetchApplied {
                    sequence: pending.sequence,
                    total: paginator.total,
                });
                Ok(FetchOutcome::Applied {
                    sequence: pending.sequence,
                })
            }
            Err(e) => {
                let err = ListError::Transport(TransportError::RequestFailed {
                    entity_type: self.entity().to_string(),
                    sequence: pending.sequence,
                    message: format!("{:#}", e),
                });
                state.error = Some(err.clone());
                drop(state);

                tracing::warn!(
                    view = %self.entity(),
                    sequence = pending.sequence,
                    error = %err,
                    "fetch failed, keeping previous page"
                );
                self.publish(ListEvent::FetchFailed {
                    sequence: pending.sequence,
                    code: err.error_code().to_string(),
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Fetch the page for the current state
    pub async fn refresh(&self) -> ListResult<FetchOutcome> {
        let pending = self.begin_fetch();
        let result = self.inner.source.fetch_page(&pending.query).await;
        self.complete_fetch(pending, result)
    }

    /// Fetch with overrides without touching the visible state
    ///
    /// Used for exports and other one-off requests.
    pub async fn fetch_once(&self, overrides: &QueryOverrides) -> ListResult<ListPage<T>> {
        let query = self.compose_with(overrides);
        let page = self.inner.source.fetch_page(&query).await.map_err(|e| {
            ListError::Transport(TransportError::OneOffFailed {
                entity_type: self.entity().to_string(),
                message: format!("{:#}", e),
            })
        })?;

        let requested = PageRequest::new(query.page, query.limit);
        Ok(ListPage {
            paginator: normalize(&page.raw, &requested),
            items: page.items,
            query,
        })
    }

    // === Helpers ===

    fn compose_state(&self, state: &ListState<T>, overrides: Option<&QueryOverrides>) -> ListQuery {
        self.inner
            .composer
            .compose(&state.sort, &state.filters, &state.page, overrides)
    }

    fn publish(&self, event: ListEvent) {
        if let Some(events) = &self.inner.events {
            events.publish(&self.inner.config.entity, event);
        }
    }

    // Lock poisoning is ignored; every write leaves the state consistent.
    fn read(&self) -> RwLockReadGuard<'_, ListState<T>> {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ListState<T>> {
        self.inner
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T, S> ListController<T, S>
where
    T: Clone + Send + Sync + 'static,
    S: DataSource<T>,
{
    /// Items of the visible page
    pub fn items(&self) -> Vec<T> {
        self.read().items.clone()
    }

    /// Snapshot for the rendering layer
    pub fn snapshot(&self) -> ListViewState<T> {
        let state = self.read();
        ListViewState {
            entity: self.inner.config.entity.clone(),
            items: state.items.clone(),
            paginator: state.paginator,
            sort: state.sort.clone(),
            filters: state.filters.clone(),
            page: state.page,
            loading: state.latest_sequence > state.settled_sequence,
            error: state.error.as_ref().map(ListError::to_response),
            text_direction: self.inner.config.text_direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sort::SortDirection;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use serde_json::json;

    struct EchoSource;

    #[async_trait]
    impl DataSource<u64> for EchoSource {
        async fn fetch_page(&self, query: &ListQuery) -> anyhow::Result<FetchedPage<u64>> {
            Ok(FetchedPage::new(
                vec![query.page],
                json!({ "total": 45, "current_page": query.page, "per_page": query.limit }),
            ))
        }
    }

    struct FailingSource;

    #[async_trait]
    impl DataSource<u64> for FailingSource {
        async fn fetch_page(&self, _query: &ListQuery) -> anyhow::Result<FetchedPage<u64>> {
            Err(anyhow!("connection refused"))
        }
    }

    fn controller() -> ListController<u64, EchoSource> {
        ListController::new(ListViewConfig::new("categories"), EchoSource).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let c = controller();
        assert_eq!(c.sort(), SortSpec::default());
        assert!(c.filters().is_empty());
        assert_eq!(c.page_request().page, 1);
        assert!(c.paginator().is_none());
        assert!(!c.is_loading());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ListViewConfig::new("types").with_page_size(0);
        let result = ListController::<u64, _>::new(config, EchoSource);
        assert!(matches!(result, Err(ListError::Config(_))));
    }

    #[test]
    fn test_locale_seeds_filter() {
        let config = ListViewConfig::new("products").with_locale("ar");
        let c = ListController::<u64, _>::new(config, EchoSource).unwrap();
        assert_eq!(c.current_query().filter(LOCALE_FILTER), Some("ar"));
    }

    #[test]
    fn test_toggle_sort_resets_page() {
        let c = controller();
        c.go_to_page(3);
        let query = c.toggle_sort("name");
        assert_eq!(query.page, 1);
        assert_eq!(query.order_by.as_deref(), Some("name"));
        assert_eq!(query.sorted_by, SortDirection::Desc);
        assert_eq!(c.toggle_sort("name").sorted_by, SortDirection::Asc);
    }

    #[test]
    fn test_same_filter_value_is_noop() {
        let c = controller();
        assert!(c.set_filter("category", Some("shoes")).is_some());
        c.go_to_page(2);
        assert!(c.set_filter("category", Some("shoes")).is_none());
        assert_eq!(c.page_request().page, 2);
    }

    #[test]
    fn test_go_to_page_clamps_and_dedupes() {
        let c = controller();
        assert!(c.go_to_page(-4).is_none());
        assert_eq!(c.page_request().page, 1);
        assert_eq!(c.go_to_page(99).map(|q| q.page), Some(99));
    }

    #[tokio::test]
    async fn test_refresh_applies_page() {
        let c = controller();
        c.go_to_page(2);
        let outcome = c.refresh().await.unwrap();
        assert_eq!(outcome, FetchOutcome::Applied { sequence: 1 });
        assert_eq!(c.items(), vec![2]);
        assert_eq!(c.paginator(), Some(NormalizedPaginatorInfo::new(45, 2, 20)));
        assert_eq!(c.applied_query().map(|q| q.page), Some(2));
    }

    #[test]
    fn test_stale_completion_discarded() {
        let c = controller();
        let first = c.begin_fetch();
        let second = c.begin_fetch();
        assert!(c.is_loading());

        let applied =
            c.complete_fetch(second, Ok(FetchedPage::new(vec![2], json!({ "total": 1 }))));
        assert!(applied.unwrap().is_applied());

        let stale = c.complete_fetch(first, Ok(FetchedPage::new(vec![1], json!({ "total": 1 }))));
        assert_eq!(stale.unwrap(), FetchOutcome::Discarded { sequence: 1, latest: 2 });
        assert_eq!(c.items(), vec![2]);
        assert!(!c.is_loading());
    }

    #[tokio::test]
    async fn test_failure_recorded() {
        let c = ListController::<u64, _>::new(ListViewConfig::new("types"), FailingSource).unwrap();
        let err = c.refresh().await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(c.error(), Some(err));
        assert!(!c.is_loading());
        assert_eq!(c.snapshot().error.map(|e| e.code), Some("TRANSPORT_FAILURE".to_string()));
    }
}
