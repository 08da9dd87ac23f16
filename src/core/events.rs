//! Event bus for list view state changes
//!
//! Every state mutation and every fetch lifecycle step of a
//! [`ListController`](crate::controller::ListController) is published as a
//! [`ListEvent`]. Renderers and loggers subscribe; the controller never
//! waits for them.
//!
//! # Usage
//!
//! ```rust,ignore
//! let bus = EventBus::new(256);
//! let mut rx = bus.subscribe();
//! let controller = ListController::with_events(config, source, bus.clone())?;
//!
//! controller.toggle_sort("name");
//! if let Ok(envelope) = rx.recv().await {
//!     println!("{} {}", envelope.view, envelope.event.action());
//! }
//! ```

use crate::core::query::ListQuery;
use crate::core::sort::SortDirection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Something that happened to a list view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ListEvent {
    /// A column header was toggled; the page was reset
    SortChanged {
        column: String,
        direction: SortDirection,
    },

    /// A filter was set or cleared; the page was reset
    FilterChanged { name: String, value: Option<String> },

    /// The user navigated to another page
    PageChanged { page: u64 },

    /// A fetch was issued to the data source
    FetchIssued { sequence: u64, query: ListQuery },

    /// A fetch result replaced the visible page
    FetchApplied { sequence: u64, total: u64 },

    /// A fetch result arrived after a newer request and was dropped
    FetchDiscarded { sequence: u64, latest: u64 },

    /// The latest fetch failed; previous data stays visible
    FetchFailed {
        sequence: u64,
        code: String,
        message: String,
    },
}

impl ListEvent {
    /// Action name, matching the serialized `action` tag
    pub fn action(&self) -> &'static str {
        match self {
            ListEvent::SortChanged { .. } => "sort_changed",
            ListEvent::FilterChanged { .. } => "filter_changed",
            ListEvent::PageChanged { .. } => "page_changed",
            ListEvent::FetchIssued { .. } => "fetch_issued",
            ListEvent::FetchApplied { .. } => "fetch_applied",
            ListEvent::FetchDiscarded { .. } => "fetch_discarded",
            ListEvent::FetchFailed { .. } => "fetch_failed",
        }
    }

    /// Whether this event invalidates the current page
    pub fn resets_page(&self) -> bool {
        matches!(
            self,
            ListEvent::SortChanged { .. } | ListEvent::FilterChanged { .. }
        )
    }

    /// Request sequence number for fetch events
    pub fn sequence(&self) -> Option<u64> {
        match self {
            ListEvent::FetchIssued { sequence, .. }
            | ListEvent::FetchApplied { sequence, .. }
            | ListEvent::FetchDiscarded { sequence, .. }
            | ListEvent::FetchFailed { sequence, .. } => Some(*sequence),
            _ => None,
        }
    }
}

/// Envelope wrapping a list event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Entity name of the view that emitted the event
    pub view: String,
    /// The actual event
    pub event: ListEvent,
}

impl EventEnvelope {
    pub fn new(view: impl Into<String>, event: ListEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            view: view.into(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone; one bus may be shared by every view of a console.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// Slow receivers lose events past `capacity` (lagged).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never fails. Returns the number of receivers that will get the event.
    pub fn publish(&self, view: &str, event: ListEvent) -> usize {
        // Err only when nobody is subscribed
        self.sender
            .send(EventEnvelope::new(view, event))
            .unwrap_or(0)
    }

    /// Subscribe to future events
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Get the current number of active subscribers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
