//! Folio Core Library
//!
//! This crate holds the book collection state manager behind the Folio catalog
//! viewer: records are fetched page by page from a catalog API, merged into a
//! deduplicated collection, and projected into filtered or sorted frames for
//! whatever surface draws them.

pub mod catalog;
pub mod collection;
pub mod display;
pub mod error;
pub mod query;
pub mod source;
pub mod types;

pub use catalog::{Catalog, CatalogState, PageCursor, PageOutcome};
pub use collection::{ingest, CollectionStore};
pub use display::{render, DisplayRecord, RenderFrame};
pub use error::{FolioError, PageError, Result, SourceError};
pub use query::{filter_by_query, sort_by, ViewQuery};
pub use source::{DataSource, HttpSource, MemorySource};
pub use types::{ImageLinks, RawRecord, RecordId, SortKey, ViewMode, VolumeInfo};
