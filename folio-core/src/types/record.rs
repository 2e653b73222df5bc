//! Catalog records as delivered by the books API

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Treat an explicit `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Opaque record identifier.
///
/// The API is not consistent about whether ids are strings or integers, so
/// both are accepted. A string id never equals an integer id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    /// Dedup key, stable across pages
    pub id: RecordId,

    /// Bibliographic details
    #[serde(default, deserialize_with = "null_as_default")]
    pub volume_info: VolumeInfo,

    /// Fallback link when `volume_info.info_link` is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
}

/// The `volumeInfo` block of a record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,

    /// Free-form date string ("2004", "2004-03", "2004-03-02", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_links: Option<ImageLinks>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_thumbnail: Option<String>,
}

impl RawRecord {
    /// Create a record with just an id and a title
    pub fn new(id: impl Into<RecordId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            volume_info: VolumeInfo {
                title: title.into(),
                ..VolumeInfo::default()
            },
            info_link: None,
        }
    }

    /// Add an author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.volume_info
            .authors
            .get_or_insert_with(Vec::new)
            .push(author.into());
        self
    }

    /// Set the publisher
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.volume_info.publisher = Some(publisher.into());
        self
    }

    /// Set the published date string
    pub fn with_published_date(mut self, date: impl Into<String>) -> Self {
        self.volume_info.published_date = Some(date.into());
        self
    }

    /// Set the thumbnail URL
    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.volume_info
            .image_links
            .get_or_insert_with(ImageLinks::default)
            .thumbnail = Some(url.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.volume_info.title
    }

    /// Authors joined with `sep`, if the record has any author list
    pub fn joined_authors(&self, sep: &str) -> Option<String> {
        self.volume_info.authors.as_ref().map(|a| a.join(sep))
    }

    /// Preferred details link: the volume's own, else the top-level one
    pub fn link(&self) -> Option<&str> {
        self.volume_info
            .info_link
            .as_deref()
            .or(self.info_link.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "id": "_ojXNuzgHRcC",
            "kind": "books#volume",
            "volumeInfo": {
                "title": "Flowers",
                "authors": ["Vijaya Khisty Bodach"],
                "publisher": "Capstone",
                "publishedDate": "2007-01-01",
                "imageLinks": {
                    "smallThumbnail": "http://example.com/s.jpg",
                    "thumbnail": "http://example.com/t.jpg"
                },
                "infoLink": "http://example.com/info",
                "pageCount": 24
            }
        }"#;

        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, RecordId::from("_ojXNuzgHRcC"));
        assert_eq!(record.title(), "Flowers");
        assert_eq!(
            record.joined_authors(", ").as_deref(),
            Some("Vijaya Khisty Bodach")
        );
        assert_eq!(record.volume_info.published_date.as_deref(), Some("2007-01-01"));
        assert_eq!(
            record
                .volume_info
                .image_links
                .as_ref()
                .and_then(|l| l.thumbnail.as_deref()),
            Some("http://example.com/t.jpg")
        );
        assert_eq!(record.link(), Some("http://example.com/info"));
    }

    #[test]
    fn test_numeric_and_text_ids_differ() {
        let a: RawRecord =
            serde_json::from_str(r#"{"id": 7, "volumeInfo": {"title": "A"}}"#).unwrap();
        let b: RawRecord =
            serde_json::from_str(r#"{"id": "7", "volumeInfo": {"title": "A"}}"#).unwrap();
        assert_eq!(a.id, RecordId::Number(7));
        assert_eq!(b.id, RecordId::Text("7".to_string()));
        assert_ne!(a.id, b.id);
        assert_eq!(a.id.to_string(), b.id.to_string());
    }

    #[test]
    fn test_missing_volume_info_still_parses() {
        let record: RawRecord = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert_eq!(record.title(), "");
        assert!(record.joined_authors(" ").is_none());
        assert!(record.link().is_none());
    }

    #[test]
    fn test_null_blocks_read_as_absent() {
        let record: RawRecord =
            serde_json::from_str(r#"{"id": "n", "volumeInfo": null}"#).unwrap();
        assert_eq!(record.volume_info, VolumeInfo::default());

        let record: RawRecord = serde_json::from_str(
            r#"{"id": "t", "volumeInfo": {"title": null, "authors": null, "imageLinks": null}}"#,
        )
        .unwrap();
        assert_eq!(record.title(), "");
        assert!(record.joined_authors(", ").is_none());
        assert!(record.volume_info.image_links.is_none());
    }

    #[test]
    fn test_link_falls_back_to_top_level() {
        let mut record = RawRecord::new("x", "Title");
        record.info_link = Some("http://top".to_string());
        assert_eq!(record.link(), Some("http://top"));

        record.volume_info.info_link = Some("http://volume".to_string());
        assert_eq!(record.link(), Some("http://volume"));
    }
}
