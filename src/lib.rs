//! # listview
//!
//! Sort, filter and pagination state for server-backed admin list views.
//!
//! ## Features
//!
//! - **One Controller per View**: generic over the row type and the data source
//! - **Toggle Sorting**: one active column, clicking it again flips direction
//! - **Filter Composition**: AND-ed named filters, blank values never sent
//! - **Page Resets**: any sort or filter change returns to page 1
//! - **Metadata Normalization**: `current_page`, `currentPage`, `meta.page`... all map to one shape
//! - **Latest Request Wins**: responses to superseded requests are dropped on arrival
//! - **Configuration-Based**: views defined in YAML, with catalog presets
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use listview::prelude::*;
//!
//! let source = InMemoryDataSource::new(products).with_search_filters(["name"]);
//! let controller = ListController::new(Product::list_view_config(), source)?;
//!
//! controller.refresh().await?;
//!
//! // Header click on "price"
//! controller.toggle_sort("price");
//! controller.refresh().await?;
//!
//! // Category picker
//! if controller.set_filter("categories", Some("fruits")).is_some() {
//!     controller.refresh().await?;
//! }
//!
//! let view = controller.snapshot();
//! if view.show_pagination() {
//!     // render page control from view.paginator
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod controller;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        error::{ConfigError, ErrorResponse, ListError, ListResult, TransportError},
        events::{EventBus, EventEnvelope, ListEvent},
        field::FieldValue,
        filter::FilterSet,
        icons::{Icon, IconRegistry},
        pagination::{NormalizedPaginatorInfo, PageRequest, normalize},
        query::{ListQuery, QueryComposer, QueryOverrides},
        sort::{SortDirection, SortIndicator, SortSpec},
        source::{DataSource, FetchedPage},
        store::Listable,
    };

    // === Controller ===
    pub use crate::controller::{
        FetchOutcome, ListController, ListPage, ListViewState, PendingFetch,
    };

    // === Config ===
    pub use crate::config::{
        Alignment, LOCALE_FILTER, ListViewConfig, ListViewsConfig, TextDirection,
    };

    // === Catalog ===
    pub use crate::catalog::{
        Attachment, CATEGORY_FILTER, CatalogEntity, Category, Product, ProductType,
        SEARCH_FILTER, TYPE_FILTER, catalog_views, localized,
    };

    // === Storage ===
    pub use crate::storage::InMemoryDataSource;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
