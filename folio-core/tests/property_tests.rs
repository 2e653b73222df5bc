//! Property tests for ingest, filter and sort

use folio_core::{filter_by_query, ingest, sort_by, RawRecord, SortKey};
use proptest::prelude::*;
use std::collections::HashSet;

/// Small id and title alphabets so collisions actually happen
fn arb_record() -> impl Strategy<Value = RawRecord> {
    (
        "[a-e]",
        "[A-Ca-c ]{0,4}",
        proptest::option::of(proptest::collection::vec("[a-cA-C]{1,3}", 0..3)),
        proptest::option::of("(19[5-9][0-9]|20[0-2][0-9])(-0[1-9])?"),
    )
        .prop_map(|(id, title, authors, date)| {
            let mut record = RawRecord::new(id, title);
            record.volume_info.authors = authors;
            record.volume_info.published_date = date;
            record
        })
}

fn arb_batch() -> impl Strategy<Value = Vec<RawRecord>> {
    proptest::collection::vec(arb_record(), 0..8)
}

fn matches(record: &RawRecord, query: &str) -> bool {
    let q = query.to_lowercase();
    record.title().to_lowercase().contains(&q)
        || record
            .joined_authors(" ")
            .map(|a| a.to_lowercase().contains(&q))
            .unwrap_or(false)
}

proptest! {
    #[test]
    fn ingest_is_idempotent(existing in arb_batch(), incoming in arb_batch()) {
        let once = ingest(&existing, &incoming);
        let twice = ingest(&once, &incoming);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn ids_stay_unique(batches in proptest::collection::vec(arb_batch(), 0..5)) {
        let mut store = Vec::new();
        for batch in &batches {
            store = ingest(&store, batch);
        }
        let unique: HashSet<_> = store.iter().map(|r| r.id.clone()).collect();
        prop_assert_eq!(unique.len(), store.len());
    }

    #[test]
    fn ingest_keeps_existing_prefix(existing in arb_batch(), incoming in arb_batch()) {
        let base = ingest(&[], &existing);
        let merged = ingest(&base, &incoming);
        prop_assert_eq!(&merged[..base.len()], &base[..]);
    }

    #[test]
    fn filter_returns_matching_subset(store in arb_batch(), query in "[a-cA-C ]{0,2}") {
        let filtered = filter_by_query(&store, &query);
        for record in &filtered {
            prop_assert!(store.contains(record));
            prop_assert!(matches(record, &query));
        }
        let expected = store.iter().filter(|r| matches(r, &query)).count();
        prop_assert_eq!(filtered.len(), expected);
    }

    #[test]
    fn empty_filter_is_identity(store in arb_batch()) {
        prop_assert_eq!(filter_by_query(&store, ""), store);
    }

    #[test]
    fn title_sort_is_idempotent(store in arb_batch()) {
        let once = sort_by(&store, SortKey::Title);
        let twice = sort_by(&once, SortKey::Title);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sorts_are_permutations(store in arb_batch()) {
        for key in [SortKey::Title, SortKey::Date] {
            let sorted = sort_by(&store, key);
            prop_assert_eq!(sorted.len(), store.len());
            for record in &store {
                prop_assert!(sorted.contains(record));
            }
        }
    }

    #[test]
    fn equal_titles_keep_input_order(store in arb_batch()) {
        // Tag each record with its input position through a unique id
        let tagged: Vec<RawRecord> = store
            .into_iter()
            .enumerate()
            .map(|(i, mut r)| {
                r.id = folio_core::RecordId::Number(i as i64);
                r
            })
            .collect();
        let sorted = sort_by(&tagged, SortKey::Title);
        for pair in sorted.windows(2) {
            if pair[0].title() == pair[1].title() {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }
}
