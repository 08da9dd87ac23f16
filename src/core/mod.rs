//! Core module containing the list view state types and traits

pub mod error;
pub mod events;
pub mod field;
pub mod filter;
pub mod icons;
pub mod pagination;
pub mod query;
pub mod sort;
pub mod source;
pub mod store;

pub use error::{ConfigError, ErrorResponse, ListError, ListResult, TransportError};
pub use events::{EventBus, EventEnvelope, ListEvent};
pub use field::FieldValue;
pub use filter::FilterSet;
pub use icons::{Icon, IconRegistry};
pub use pagination::{NormalizedPaginatorInfo, PageRequest, normalize};
pub use query::{ListQuery, QueryComposer, QueryOverrides};
pub use sort::{SortDirection, SortIndicator, SortSpec};
pub use source::{DataSource, FetchedPage};
pub use store::Listable;
