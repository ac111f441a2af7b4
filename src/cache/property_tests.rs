//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify stats accounting, pattern invalidation
//! exactness, and snapshot round-trip behavior.

use proptest::prelude::*;
use std::sync::Arc;

use serde_json::json;

use crate::cache::{CacheStore, ManualClock, TtlPolicy};

// == Strategies ==
/// Generates valid cache keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,32}"
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        key_strategy().prop_map(|key| CacheOp::Set { key }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

fn manual_store() -> CacheStore {
    CacheStore::with_clock(TtlPolicy::default(), Arc::new(ManualClock::new(1_000_000)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any sequence of operations, the counters reflect exactly the
    // operations that occurred and size equals the live entry count.
    #[test]
    fn prop_stats_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let mut store = manual_store();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut expected_sets: u64 = 0;
        let mut expected_deletes: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key } => {
                    store.set(&key, json!("v"), None).unwrap();
                    expected_sets += 1;
                }
                CacheOp::Get { key } => {
                    match store.get(&key) {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                }
                CacheOp::Delete { key } => {
                    if store.delete(&key) {
                        expected_deletes += 1;
                    }
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.sets, expected_sets, "Sets mismatch");
        prop_assert_eq!(stats.deletes, expected_deletes, "Deletes mismatch");
        prop_assert_eq!(stats.size, store.len(), "Size mismatch");
    }

    // clear_pattern removes exactly the matching keys and no others,
    // for any key set.
    #[test]
    fn prop_pattern_invalidation_exact(
        keys in prop::collection::hash_set(key_strategy(), 1..30)
    ) {
        let mut store = manual_store();
        for key in &keys {
            store.set(key, json!(1), None).unwrap();
        }

        let expected_removed = keys.iter().filter(|k| k.starts_with("tenant_5_")).count();
        let removed = store.clear_pattern("^tenant_5_").unwrap();
        prop_assert_eq!(removed, expected_removed);

        for key in &keys {
            let survives = store.get(key).is_some();
            prop_assert_eq!(survives, !key.starts_with("tenant_5_"),
                "key {} survival mismatch", key);
        }
    }

    // Importing an export with no time elapsed reproduces a store whose
    // reads are identical for every previously-live key.
    #[test]
    fn prop_export_import_round_trip(
        keys in prop::collection::hash_set(key_strategy(), 1..20)
    ) {
        let mut store = manual_store();
        for (i, key) in keys.iter().enumerate() {
            store.set(key, json!(i), None).unwrap();
        }

        let before: Vec<(String, Option<serde_json::Value>)> = keys
            .iter()
            .map(|k| (k.clone(), store.get(k)))
            .collect();

        let snapshot = store.export();
        store.import(snapshot.entries).unwrap();

        for (key, expected) in before {
            prop_assert_eq!(store.get(&key), expected);
        }
    }

    // Resolution always lands on a table entry or the fallback, and
    // table hits honor first-match order.
    #[test]
    fn prop_ttl_resolution_total(key in key_strategy()) {
        let policy = TtlPolicy::default();
        let resolved = policy.resolve(&key);

        let first_match = TtlPolicy::default_categories()
            .into_iter()
            .find(|(substr, _)| key.contains(substr.as_str()));

        match first_match {
            Some((_, ttl)) => prop_assert_eq!(resolved, ttl),
            None => prop_assert_eq!(resolved, policy.fallback_ttl_ms()),
        }
    }
}
