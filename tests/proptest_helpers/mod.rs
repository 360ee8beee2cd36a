#![allow(dead_code)]

use coco2roboflow::coco::CategoryRecord;
use coco2roboflow::split::Split;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Class names drawn from a small pool so splits overlap often.
pub fn arb_name() -> BoxedStrategy<String> {
    prop::sample::select(vec!["cat", "dog", "bird", "car", "bus", "person", "tree"])
        .prop_map(str::to_string)
        .boxed()
}

/// One split's categories: unique ids (as COCO requires within a file), names
/// freely repeated.
pub fn arb_split_categories(max: usize) -> BoxedStrategy<Vec<CategoryRecord>> {
    prop::collection::btree_map(-3i64..12, arb_name(), 0..=max)
        .prop_map(|by_id| {
            by_id
                .into_iter()
                .map(|(id, name)| CategoryRecord::new(id, name))
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
        .boxed()
}

/// A non-empty, ordered subset of splits, each with its own category table.
pub fn arb_split_tables(max: usize) -> BoxedStrategy<Vec<(Split, Vec<CategoryRecord>)>> {
    (
        prop::option::of(arb_split_categories(max)),
        prop::option::of(arb_split_categories(max)),
        prop::option::of(arb_split_categories(max)),
    )
        .prop_filter("at least one split", |(t, v, s)| {
            t.is_some() || v.is_some() || s.is_some()
        })
        .prop_map(|(train, val, test)| {
            Split::ALL
                .into_iter()
                .zip([train, val, test])
                .filter_map(|(split, cats)| cats.map(|cats| (split, cats)))
                .collect()
        })
        .boxed()
}
