//! Page requests and pagination metadata normalization
//!
//! Data sources describe their pagination in whatever shape they like
//! (`current_page` vs `currentPage`, `per_page` vs `limit`, nested under
//! `meta`, numbers encoded as strings...). [`normalize`] folds all of
//! them into [`NormalizedPaginatorInfo`], the only pagination shape the
//! rest of the crate depends on.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Page size used when a view does not configure one
pub const DEFAULT_PAGE_SIZE: u64 = 20;

const TOTAL_KEYS: &[&str] = &[
    "total",
    "totalCount",
    "total_count",
    "totalItems",
    "total_items",
    "count",
];
const CURRENT_PAGE_KEYS: &[&str] = &["currentPage", "current_page", "page"];
const PER_PAGE_KEYS: &[&str] = &["perPage", "per_page", "pageSize", "page_size", "limit"];
const NESTED_KEYS: &[&str] = &["paginatorInfo", "paginator_info", "meta", "pagination"];

/// Page requested by a list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (starts at 1)
    pub page: u64,

    /// Number of items per page
    pub page_size: u64,
}

impl PageRequest {
    /// Create a request, clamping `page` and `page_size` to at least 1
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// First page with the given size
    pub fn first(page_size: u64) -> Self {
        Self::new(1, page_size)
    }

    /// Same page size, different page
    pub fn with_page(self, page: u64) -> Self {
        Self::new(page, self.page_size)
    }

    /// Offset of the first item of this page
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Pagination metadata in the one shape views rely on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPaginatorInfo {
    /// Total number of items (after filters)
    pub total: u64,

    /// Current page number (starts at 1)
    pub current_page: u64,

    /// Number of items per page
    pub per_page: u64,

    /// Total number of pages, 0 when there are no items
    pub total_pages: u64,
}

impl NormalizedPaginatorInfo {
    pub fn new(total: u64, current_page: u64, per_page: u64) -> Self {
        // Ensure per_page is at least 1 to avoid division by zero
        let per_page = per_page.max(1);
        Self {
            total,
            current_page: current_page.max(1),
            per_page,
            total_pages: total.div_ceil(per_page),
        }
    }

    /// Whether there is a page after the current one
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether there is a page before the current one
    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// The pagination control is only rendered for non-empty results
    pub fn should_render(&self) -> bool {
        self.total > 0
    }

    /// 1-based inclusive range of items on the current page
    ///
    /// `None` when the current page lies beyond the last item.
    pub fn item_range(&self) -> Option<(u64, u64)> {
        let start = (self.current_page - 1).saturating_mul(self.per_page);
        if start >= self.total {
            return None;
        }
        let end = start.saturating_add(self.per_page).min(self.total);
        Some((start + 1, end))
    }
}

/// Normalize raw pagination metadata
///
/// Missing or zero `per_page` falls back to the requested page size,
/// missing `total` means an empty result, and a missing current page
/// falls back to the requested page. None of this is an error.
pub fn normalize(raw: &Value, requested: &PageRequest) -> NormalizedPaginatorInfo {
    let containers = containers(raw);

    let total = lookup(&containers, TOTAL_KEYS);
    let current_page = lookup(&containers, CURRENT_PAGE_KEYS).filter(|p| *p > 0);
    let per_page = lookup(&containers, PER_PAGE_KEYS).filter(|p| *p > 0);

    if total.is_none() || current_page.is_none() || per_page.is_none() {
        tracing::debug!(
            has_total = total.is_some(),
            has_current_page = current_page.is_some(),
            has_per_page = per_page.is_some(),
            "paginator info incomplete, applying fallbacks"
        );
    }

    NormalizedPaginatorInfo::new(
        total.unwrap_or(0),
        current_page.unwrap_or(requested.page),
        per_page.unwrap_or(requested.page_size),
    )
}

/// Top-level object first, then any recognized nested paginator object
fn containers(raw: &Value) -> Vec<&Map<String, Value>> {
    let Some(root) = raw.as_object() else {
        return Vec::new();
    };

    let mut found = vec![root];
    for key in NESTED_KEYS {
        if let Some(nested) = root.get(*key).and_then(Value::as_object) {
            found.push(nested);
        }
    }
    found
}

/// Keys are tried in preference order across every container, so a
/// `total` anywhere beats a root-level `count`.
fn lookup(containers: &[&Map<String, Value>], keys: &[&str]) -> Option<u64> {
    keys.iter()
        .flat_map(|key| containers.iter().filter_map(move |obj| obj.get(*key)))
        .find_map(as_count)
}

/// Accept non-negative integers, integral floats and numeric strings
fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}
