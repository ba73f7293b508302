//! Property-based tests for benchmark-set stats accumulation

use brv_results::classification::ClassificationKey;
use brv_results::stats::BenchmarkSetStats;
use proptest::prelude::*;

fn key() -> impl Strategy<Value = ClassificationKey> {
    (
        prop_oneof![Just("true"), Just("false"), Just("timeout"), Just("unknown")],
        prop_oneof![
            Just(Some("correct")),
            Just(Some("incorrect")),
            Just(Some("error")),
            Just(None)
        ],
    )
        .prop_map(|(status, label)| ClassificationKey {
            status: status.to_string(),
            label: label.map(str::to_string),
        })
}

// f64 sums are order dependent in general; integral times keep them exact
fn contribution() -> impl Strategy<Value = (ClassificationKey, u64, f64)> {
    (key(), 0u64..1000, 0u32..10_000).prop_map(|(k, c, t)| (k, c, f64::from(t)))
}

fn fill(contributions: &[(ClassificationKey, u64, f64)]) -> BenchmarkSetStats {
    let mut stats = BenchmarkSetStats::new(1, "set");
    for (key, count, time) in contributions {
        stats.add_stat(key.clone(), *count, *time);
    }
    stats
}

proptest! {
    /// The final count and time per key do not depend on call order
    #[test]
    fn add_stat_is_order_invariant(
        contributions in proptest::collection::vec(contribution(), 0..40),
        seed in any::<u64>(),
    ) {
        let mut shuffled = contributions.clone();
        // deterministic rotation + reversal from the seed
        if !shuffled.is_empty() {
            let mid = (seed as usize) % shuffled.len();
            shuffled.rotate_left(mid);
        }
        if seed % 2 == 0 {
            shuffled.reverse();
        }

        let a = fill(&contributions);
        let b = fill(&shuffled);
        for (k, _, _) in &contributions {
            prop_assert_eq!(a.get_stat(k), b.get_stat(k));
        }
    }

    /// Solved-only time never exceeds total time
    #[test]
    fn solved_time_bounded_by_total(
        contributions in proptest::collection::vec(contribution(), 0..40)
    ) {
        let mut stats = fill(&contributions);
        let solved = stats.accumulate_time(true);
        let all = stats.accumulate_time(false);
        prop_assert!(solved <= all);
    }

    /// Pruning twice is the same as pruning once, and keeps the totals
    #[test]
    fn prune_is_idempotent(contributions in proptest::collection::vec(contribution(), 0..40)) {
        let mut stats = fill(&contributions);
        let total = stats.total_count();
        stats.prune();
        let once = stats.clone();
        stats.prune();
        prop_assert_eq!(&stats, &once);
        prop_assert_eq!(stats.total_count(), total);
    }
}
