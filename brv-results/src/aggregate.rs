//! Bucket aggregation and render-time grouping extension
//!
//! Buckets only claim the classifications that were configured for them.
//! Before rendering, the selected grouping is extended with one synthetic
//! bucket per observed classification that no bucket claims, so that no
//! result is ever hidden, and buckets without any result in the overall scope
//! are dropped.

use crate::classification::ClassificationKey;
use crate::grouping::{Grouping, GroupingBucket};
use crate::stats::{BenchmarkSetStats, Stat};
use tracing::debug;

/// Display name of a synthetic bucket whose classification has no label
pub const MISSING_CLASSIFICATION: &str = "<missing classification>";

/// Prefix of the display tag of synthetic buckets
pub const SYNTHETIC_CLASS_PREFIX: &str = "classif status-";

/// Sum of count and time over the classifications a bucket claims.
///
/// Absent stats contribute nothing.
#[must_use]
pub fn aggregate(bucket: &GroupingBucket, stats: Option<&BenchmarkSetStats>) -> Stat {
    let mut total = Stat::default();
    if let Some(stats) = stats {
        for key in bucket.classifications() {
            total.add(stats.get_stat(key));
        }
    }
    total
}

/// Every classification present in `stats`, in first-seen order
#[must_use]
pub fn observed_classifications<'a>(
    stats: impl IntoIterator<Item = &'a BenchmarkSetStats>,
) -> Vec<ClassificationKey> {
    let mut observed: Vec<ClassificationKey> = Vec::new();
    for s in stats {
        for (key, _) in s.entries() {
            if !observed.contains(key) {
                observed.push(key.clone());
            }
        }
    }
    observed
}

/// Synthetic single-classification bucket for an unclaimed key
#[must_use]
pub fn synthesize_bucket(key: &ClassificationKey) -> GroupingBucket {
    let display_name = match key.label() {
        Some(label) if !label.is_empty() => label,
        _ => MISSING_CLASSIFICATION,
    };
    GroupingBucket::synthetic(
        display_name,
        format!("{}{}", SYNTHETIC_CLASS_PREFIX, key.status),
        key.clone(),
    )
}

/// Working copy of the grouping's buckets with a synthetic bucket appended
/// for every observed classification no bucket claims
#[must_use]
pub fn extend_buckets(grouping: &Grouping, observed: &[ClassificationKey]) -> Vec<GroupingBucket> {
    let mut buckets = grouping.buckets().to_vec();
    for key in observed {
        if grouping.bucket_for(key).is_none() {
            debug!("Adding bucket for unclaimed classification {}", key);
            buckets.push(synthesize_bucket(key));
        }
    }
    buckets
}

/// Keep the buckets with a nonzero count for at least one run.
///
/// `overall` holds the all-sets stats of every rendered run; per-set
/// presence is deliberately not considered.
#[must_use]
pub fn filter_buckets(
    buckets: Vec<GroupingBucket>,
    overall: &[BenchmarkSetStats],
) -> Vec<GroupingBucket> {
    buckets
        .into_iter()
        .filter(|bucket| {
            overall
                .iter()
                .any(|stats| aggregate(bucket, Some(stats)).count != 0)
        })
        .collect()
}

/// Extend `grouping` with buckets for every classification observed in
/// `overall` and drop buckets without data
#[must_use]
pub fn extend_and_filter(
    grouping: &Grouping,
    overall: &[BenchmarkSetStats],
) -> Vec<GroupingBucket> {
    let observed = observed_classifications(overall);
    filter_buckets(extend_buckets(grouping, &observed), overall)
}
