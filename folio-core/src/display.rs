//! Projection of a derived view into what the gallery draws
//!
//! The sink always receives a whole frame and redraws from scratch.

use crate::types::{RawRecord, ViewMode};
use serde::{Deserialize, Serialize};

/// Thumbnail shown when a record has none
pub const PLACEHOLDER_THUMBNAIL: &str = "placeholder.jpg";

/// Text shown for a missing author, publisher or date
pub const NOT_AVAILABLE: &str = "N/A";

/// A record with every display fallback resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub id: String,
    pub thumbnail: String,
    pub title: String,
    pub authors: String,
    pub publisher: String,
    pub published_date: String,
    /// Details page; `None` when the record carries no link at all
    pub link: Option<String>,
}

impl From<&RawRecord> for DisplayRecord {
    fn from(record: &RawRecord) -> Self {
        let info = &record.volume_info;
        Self {
            id: record.id.to_string(),
            thumbnail: info
                .image_links
                .as_ref()
                .and_then(|links| links.thumbnail.clone())
                .unwrap_or_else(|| PLACEHOLDER_THUMBNAIL.to_string()),
            title: info.title.clone(),
            authors: record
                .joined_authors(", ")
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            publisher: non_empty_or_na(info.publisher.as_deref()),
            published_date: non_empty_or_na(info.published_date.as_deref()),
            link: record.link().map(str::to_string),
        }
    }
}

fn non_empty_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Everything the sink needs to draw the gallery once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub mode: ViewMode,

    /// Records in the whole collection
    pub total: usize,

    /// Records in this frame
    pub count: usize,

    pub records: Vec<DisplayRecord>,
}

impl RenderFrame {
    /// CSS class for the gallery container
    pub fn container_class(&self) -> &'static str {
        self.mode.css_class()
    }
}

/// Build the frame for a derived view
pub fn render(view: &[RawRecord], mode: ViewMode, total: usize) -> RenderFrame {
    let records: Vec<DisplayRecord> = view.iter().map(DisplayRecord::from).collect();
    RenderFrame {
        mode,
        total,
        count: records.len(),
        records,
    }
}
