//! Core types for catalog records and view settings

mod record;
mod view;

pub use record::{ImageLinks, RawRecord, RecordId, VolumeInfo};
pub use view::{SortKey, ViewMode};
