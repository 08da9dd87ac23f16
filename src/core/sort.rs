//! Sort state for list views
//!
//! A list view sorts by at most one column at a time. Clicking a column
//! header toggles: the active column flips direction, any other column
//! becomes active with the view's default direction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first
    Asc,

    /// Largest (or newest) first
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Wire spelling (`asc` / `desc`)
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// Parse a direction, case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Some(SortDirection::Asc),
            "desc" | "descending" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header arrow state for one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortIndicator {
    /// The column is the one currently sorted
    pub active: bool,

    /// The column is sorted ascending (only meaningful when `active`)
    pub ascending: bool,
}

/// Active sort of a list view
///
/// `column = None` means no explicit sort: the data source applies its
/// own default ordering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(column: Option<String>, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Sort by `column` in `direction`
    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    /// Whether `column` is the active sort column
    pub fn is_active(&self, column: &str) -> bool {
        self.column.as_deref() == Some(column)
    }

    /// Arrow state for a column header
    pub fn indicator(&self, column: &str) -> SortIndicator {
        let active = self.is_active(column);
        SortIndicator {
            active,
            ascending: active && self.direction == SortDirection::Asc,
        }
    }

    /// Toggle the sort on `column`
    ///
    /// The active column flips direction. Any other column becomes active
    /// with `default_direction`. This is a toggle, not a setter: calling it
    /// twice with the same column always flips twice.
    pub fn toggle(&mut self, column: &str, default_direction: SortDirection) {
        if self.is_active(column) {
            self.direction = self.direction.flipped();
        } else {
            self.column = Some(column.to_string());
            self.direction = default_direction;
        }
    }
}
