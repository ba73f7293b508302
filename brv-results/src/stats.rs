//! Per benchmark-set result accumulation
//!
//! A [`BenchmarkSetStats`] holds, for one tool run on one benchmark set, the
//! number of results and the consumed time for every classification.

use crate::classification::ClassificationKey;
use crate::ordered::OrderedMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Numeric identifier of a benchmark set, as assigned by the result store
pub type BenchmarkSetId = i64;

/// Identifier used for the overall/all-sets scope
pub const OVERALL_SET_ID: BenchmarkSetId = -1;

/// Name used for the overall/all-sets scope
pub const OVERALL_SET_NAME: &str = "overall";

/// Labels (or raw statuses) that count as "solved" when accumulating time
pub const SOLVED_MARKERS: [&str; 2] = ["correct", "incorrect"];

/// Count and consumed time of one classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    /// Number of results
    pub count: u64,
    /// Consumed time in seconds
    pub time: f64,
}

impl Stat {
    /// Create a new stat
    #[must_use]
    pub fn new(count: u64, time: f64) -> Self {
        Self { count, time }
    }

    /// Element-wise addition; the count saturates at `u64::MAX`
    pub fn add(&mut self, other: Stat) {
        self.count = self.count.saturating_add(other.count);
        self.time += other.time;
    }
}

/// Result counts of one tool run on one benchmark set
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSetStats {
    name: String,
    id: BenchmarkSetId,
    stats: OrderedMap<ClassificationKey, Stat>,
    accumulated_time: f64,
}

impl BenchmarkSetStats {
    /// Create empty stats for the given benchmark set
    #[must_use]
    pub fn new(id: BenchmarkSetId, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id,
            stats: OrderedMap::new(),
            accumulated_time: 0.0,
        }
    }

    /// Create empty stats for the overall/all-sets scope
    #[must_use]
    pub fn overall() -> Self {
        Self::new(OVERALL_SET_ID, OVERALL_SET_NAME)
    }

    /// Benchmark set name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Benchmark set id
    #[must_use]
    pub fn id(&self) -> BenchmarkSetId {
        self.id
    }

    /// Add `count` results that took `time` seconds to `key`.
    ///
    /// Negative or non-finite times are counted as zero. Counts are exact
    /// whatever the order of additions, times only up to `f64` rounding.
    pub fn add_stat(&mut self, key: ClassificationKey, count: u64, time: f64) {
        let time = if time.is_finite() && time >= 0.0 {
            time
        } else {
            warn!(
                "Ignoring invalid time {} for {} in benchmark set {}",
                time, key, self.name
            );
            0.0
        };

        self.stats
            .get_or_insert_with(key, Stat::default)
            .add(Stat::new(count, time));
    }

    /// Raw lookup; `None` when the classification was never added
    #[must_use]
    pub fn stat(&self, key: &ClassificationKey) -> Option<Stat> {
        self.stats.get(key).copied()
    }

    /// Count and time of a classification, zero when absent
    #[must_use]
    pub fn get_stat(&self, key: &ClassificationKey) -> Stat {
        self.stat(key).unwrap_or_default()
    }

    /// Number of results with the given classification
    #[must_use]
    pub fn get_count(&self, key: &ClassificationKey) -> u64 {
        self.get_stat(key).count
    }

    /// Time consumed by results with the given classification
    #[must_use]
    pub fn get_time(&self, key: &ClassificationKey) -> f64 {
        self.get_stat(key).time
    }

    /// Classifications present, in insertion order
    #[must_use]
    pub fn get_classifications(&self) -> Vec<ClassificationKey> {
        self.stats.keys().cloned().collect()
    }

    /// All entries, in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&ClassificationKey, &Stat)> {
        self.stats.iter()
    }

    /// Whether no classification was added yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Number of results over all classifications, saturating at `u64::MAX`
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.stats
            .values()
            .map(|s| s.count)
            .fold(0, u64::saturating_add)
    }

    /// Recompute and cache the accumulated time.
    ///
    /// With `solved_only`, only entries whose label or status is one of
    /// [`SOLVED_MARKERS`] contribute.
    pub fn accumulate_time(&mut self, solved_only: bool) -> f64 {
        self.accumulated_time = self
            .stats
            .iter()
            .filter(|(key, _)| !solved_only || is_solved(key))
            .map(|(_, stat)| stat.time)
            .sum();
        self.accumulated_time
    }

    /// Time cached by the last [`accumulate_time`](Self::accumulate_time)
    #[must_use]
    pub fn accumulated_time(&self) -> f64 {
        self.accumulated_time
    }

    /// Add every entry of `other` into this object
    pub fn merge(&mut self, other: &BenchmarkSetStats) {
        for (key, stat) in other.entries() {
            self.stats
                .get_or_insert_with(key.clone(), Stat::default)
                .add(*stat);
        }
    }

    /// Canonicalize every key and merge the entries that collide
    pub fn prune(&mut self) {
        let mut pruned = OrderedMap::new();
        for (key, stat) in self.stats.iter() {
            pruned
                .get_or_insert_with(key.normalized(), Stat::default)
                .add(*stat);
        }
        self.stats = pruned;
    }
}

fn is_solved(key: &ClassificationKey) -> bool {
    SOLVED_MARKERS.contains(&key.status.as_str())
        || key.label().is_some_and(|label| SOLVED_MARKERS.contains(&label))
}
