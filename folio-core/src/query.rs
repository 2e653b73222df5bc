//! Derived views over the collection: search and sort
//!
//! Everything here is pure. The input slice is never touched and every call
//! returns a fresh vector.

use crate::types::{RawRecord, SortKey};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Records whose title, or else space-joined author list, contains `query`
/// case-insensitively. The empty query keeps everything.
pub fn filter_by_query(records: &[RawRecord], query: &str) -> Vec<RawRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|record| matches_query(record, &needle))
        .cloned()
        .collect()
}

/// `needle` must already be lowercased
fn matches_query(record: &RawRecord, needle: &str) -> bool {
    if record.title().to_lowercase().contains(needle) {
        return true;
    }
    record
        .joined_authors(" ")
        .map(|authors| authors.to_lowercase().contains(needle))
        .unwrap_or(false)
}

/// Stable sort by `key`: titles ascending, dates newest first
pub fn sort_by(records: &[RawRecord], key: SortKey) -> Vec<RawRecord> {
    let mut sorted = records.to_vec();
    match key {
        SortKey::Title => sorted.sort_by_cached_key(|record| TitleKey::new(record.title())),
        SortKey::Date => {
            // Parse once per record rather than once per comparison
            let mut keyed: Vec<(DateTime<Utc>, RawRecord)> = sorted
                .into_iter()
                .map(|record| (date_key(&record), record))
                .collect();
            keyed.sort_by(|a, b| b.0.cmp(&a.0));
            sorted = keyed.into_iter().map(|(_, record)| record).collect();
        }
    }
    sorted
}

/// Title order used by the gallery.
///
/// Letters compare first with accents and case folded away, so "Éclair"
/// sorts between "Dune" and "Zebra". Remaining ties go unaccented before
/// accented, then lowercase before uppercase.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    TitleKey::new(a).cmp(&TitleKey::new(b))
}

/// Collation key for a title, compared field by field
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct TitleKey {
    /// Lowercased, decomposed, combining marks dropped
    base: String,
    /// Lowercased and decomposed
    accented: String,
    /// Reversed so lowercase code points win
    case: Reverse<String>,
}

impl TitleKey {
    fn new(title: &str) -> Self {
        let accented: String = title.nfd().flat_map(char::to_lowercase).collect();
        let base = accented
            .chars()
            .filter(|c| !is_combining_mark(*c))
            .collect();
        Self {
            base,
            accented,
            case: Reverse(title.to_string()),
        }
    }
}

/// Sort key for the date order. Missing or unreadable dates count as the
/// Unix epoch.
fn date_key(record: &RawRecord) -> DateTime<Utc> {
    record
        .volume_info
        .published_date
        .as_deref()
        .and_then(parse_published_date)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Parse the API's publication date strings.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD` (month and day may be unpadded),
/// `YYYY-MM-DDTHH:MM:SS` and RFC 3339.
/// Partial dates resolve to the first day of the period, in UTC.
pub fn parse_published_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return midnight(date);
    }

    let mut parts = raw.split('-');
    let year = parse_digits(parts.next()?, 4)?;
    let month = match parts.next() {
        Some(m) => parse_digits(m, 2)?,
        None => 1,
    };
    if parts.next().is_some() {
        return None;
    }
    midnight(NaiveDate::from_ymd_opt(year as i32, month, 1)?)
}

fn parse_digits(part: &str, len: usize) -> Option<u32> {
    if part.len() == len && part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

/// The active search and sort applied to the collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    /// Search text; absent or empty shows everything
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Sort key; absent keeps arrival order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
}

impl ViewQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Whether this query leaves the collection as is
    pub fn is_identity(&self) -> bool {
        self.sort.is_none() && self.search.as_deref().map_or(true, str::is_empty)
    }

    /// Filter, then sort
    pub fn apply(&self, records: &[RawRecord]) -> Vec<RawRecord> {
        let filtered = match self.search.as_deref() {
            Some(search) if !search.is_empty() => filter_by_query(records, search),
            _ => records.to_vec(),
        };
        match self.sort {
            Some(key) => sort_by(&filtered, key),
            None => filtered,
        }
    }
}
