//! The accumulated, deduplicated record collection

use crate::types::{RawRecord, RecordId};
use std::collections::HashSet;

/// Merge `incoming` into `existing`, dropping any record whose id is already
/// present. Both inputs keep their relative order.
pub fn ingest(existing: &[RawRecord], incoming: &[RawRecord]) -> Vec<RawRecord> {
    let mut store = CollectionStore::from_records(existing.to_vec());
    store.ingest(incoming.to_vec());
    store.into_records()
}

/// Append-only sequence of records, unique by id, in arrival order
#[derive(Debug, Clone, Default)]
pub struct CollectionStore {
    records: Vec<RawRecord>,
    seen: HashSet<RecordId>,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records that may contain duplicates; the first
    /// occurrence of each id wins
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        let mut store = Self::new();
        store.ingest(records);
        store
    }

    /// Append the records whose ids have not been seen yet.
    ///
    /// Returns how many were added.
    pub fn ingest(&mut self, incoming: Vec<RawRecord>) -> usize {
        let before = self.records.len();
        for record in incoming {
            if self.seen.insert(record.id.clone()) {
                self.records.push(record);
            }
        }
        self.records.len() - before
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<RawRecord> {
        self.records
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(records: &[RawRecord]) -> Vec<String> {
        records.iter().map(|r| r.id.to_string()).collect()
    }

    fn page(ids: &[&str]) -> Vec<RawRecord> {
        ids.iter().map(|id| RawRecord::new(*id, *id)).collect()
    }

    #[test]
    fn test_ingest_appends_unseen() {
        let merged = ingest(&page(&["A", "B"]), &page(&["B", "C"]));
        assert_eq!(ids(&merged), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_ingest_keeps_existing_version() {
        let existing = vec![RawRecord::new("A", "Original")];
        let incoming = vec![RawRecord::new("A", "Changed")];
        let merged = ingest(&existing, &incoming);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].title(), "Original");
    }

    #[test]
    fn test_duplicates_within_one_batch() {
        let mut store = CollectionStore::new();
        let added = store.ingest(page(&["A", "B", "A"]));
        assert_eq!(added, 2);
        assert_eq!(ids(store.records()), vec!["A", "B"]);
    }

    #[test]
    fn test_store_counts_and_lookup() {
        let mut store = CollectionStore::new();
        assert!(store.is_empty());

        assert_eq!(store.ingest(page(&["A", "B"])), 2);
        assert_eq!(store.ingest(page(&["B", "C"])), 1);
        assert_eq!(store.ingest(page(&["C"])), 0);

        assert_eq!(store.len(), 3);
        assert!(store.contains(&RecordId::from("C")));
        assert!(!store.contains(&RecordId::from("D")));
    }
}
