//! Property-based tests for bucket extension and aggregation

use brv_results::aggregate::{aggregate, extend_and_filter};
use brv_results::classification::normalize;
use brv_results::grouping::{Grouping, GroupingBucket};
use brv_results::stats::BenchmarkSetStats;
use brv_results::ClassificationKey;
use proptest::prelude::*;

fn grouping() -> Grouping {
    Grouping::new(
        "Correctness",
        vec![
            GroupingBucket::new(
                "correct",
                "classif status-correct",
                vec![
                    ClassificationKey::new("true", "correct"),
                    ClassificationKey::new("false", "correct"),
                ],
            ),
            GroupingBucket::new(
                "never seen",
                "classif",
                vec![ClassificationKey::new("true", "unconfirmed")],
            ),
        ],
    )
}

fn run_stats() -> impl Strategy<Value = BenchmarkSetStats> {
    proptest::collection::vec(
        (
            prop_oneof![Just("true"), Just("FALSE(x)"), Just("timeout"), Just("crash")],
            proptest::option::of(prop_oneof![Just("correct"), Just("incorrect"), Just("")]),
            0u64..50,
            0u32..500,
        ),
        0..20,
    )
    .prop_map(|rows| {
        let mut stats = BenchmarkSetStats::overall();
        for (status, label, count, time) in rows {
            stats.add_stat(normalize(status, label), count, f64::from(time));
        }
        stats
    })
}

proptest! {
    /// Bucketing over the extended grouping accounts for every result
    #[test]
    fn extension_covers_all_counts(runs in proptest::collection::vec(run_stats(), 1..4)) {
        let buckets = extend_and_filter(&grouping(), &runs);
        for stats in &runs {
            let count: u64 = buckets.iter().map(|b| aggregate(b, Some(stats)).count).sum();
            let time: f64 = buckets.iter().map(|b| aggregate(b, Some(stats)).time).sum();
            let raw_time: f64 = stats.entries().map(|(_, s)| s.time).sum();
            prop_assert_eq!(count, stats.total_count());
            // zero-count buckets may be filtered with their time
            prop_assert!(time <= raw_time);
        }
    }

    /// Every kept bucket has data in at least one run
    #[test]
    fn kept_buckets_have_data(runs in proptest::collection::vec(run_stats(), 1..4)) {
        let buckets = extend_and_filter(&grouping(), &runs);
        for bucket in &buckets {
            prop_assert!(runs.iter().any(|s| aggregate(bucket, Some(s)).count > 0));
        }
        prop_assert!(buckets.iter().all(|b| b.display_name() != "never seen"));
    }

    /// Extension is deterministic across repeated renders
    #[test]
    fn extension_is_stable(runs in proptest::collection::vec(run_stats(), 1..4)) {
        prop_assert_eq!(
            extend_and_filter(&grouping(), &runs),
            extend_and_filter(&grouping(), &runs)
        );
    }
}
