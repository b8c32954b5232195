//! In-memory ticker search for autocomplete.
//!
//! The index is built once from a static dataset and is read-only afterwards,
//! so a single instance can be shared across request handlers.

pub mod dataset;
pub mod error;
pub mod index;
pub mod source;

pub use dataset::{normalize_asset_type, prepare_records, TickerRecord};
pub use error::SearchError;
pub use index::{SearchResult, TickerIndex, DEFAULT_SEARCH_LIMIT};
pub use source::{BundledSource, JsonFileSource, TickerSource};
