//! Data source boundary

use crate::core::query::ListQuery;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// One page as returned by a data source
///
/// `raw` carries the source's pagination metadata as-is; it is
/// normalized by the controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage<T> {
    pub items: Vec<T>,

    #[serde(default)]
    pub raw: Value,
}

impl<T> FetchedPage<T> {
    pub fn new(items: Vec<T>, raw: Value) -> Self {
        Self { items, raw }
    }
}

/// Service trait for fetching pages of a collection
///
/// Implementations own transport, retries and caching. An out-of-range
/// page must come back as an empty page, not as an error.
#[async_trait]
pub trait DataSource<T>: Send + Sync {
    /// Fetch the page described by `query`
    async fn fetch_page(&self, query: &ListQuery) -> Result<FetchedPage<T>>;
}

#[async_trait]
impl<T, S> DataSource<T> for Arc<S>
where
    T: Send + 'static,
    S: DataSource<T> + ?Sized,
{
    async fn fetch_page(&self, query: &ListQuery) -> Result<FetchedPage<T>> {
        (**self).fetch_page(query).await
    }
}
