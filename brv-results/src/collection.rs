//! Per tool-run collection of benchmark-set statistics

use crate::classification::normalize;
use crate::ordered::OrderedMap;
use crate::stats::{BenchmarkSetId, BenchmarkSetStats};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// One aggregated row as returned by the result store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRow {
    /// Benchmark set id
    pub benchmark_set_id: BenchmarkSetId,
    /// Benchmark set display name
    pub benchmark_set_name: String,
    /// Status as reported by the tool
    pub status: String,
    /// Classification label, if the run was classified
    pub label: Option<String>,
    /// Number of runs with this outcome
    pub count: u64,
    /// Time consumed by those runs, in seconds
    pub time: f64,
}

/// Statistics of one tool run, split by benchmark set
#[derive(Debug, Clone, Default)]
pub struct ToolRunStatsCollection {
    stats: OrderedMap<BenchmarkSetId, BenchmarkSetStats>,
    // benchmark set name -> ids it was seen under
    name_to_ids: OrderedMap<String, BTreeSet<BenchmarkSetId>>,
}

impl ToolRunStatsCollection {
    /// Create an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from store rows
    #[must_use]
    pub fn from_rows(rows: impl IntoIterator<Item = StoreRow>) -> Self {
        let mut collection = Self::new();
        for row in rows {
            collection.ingest(row);
        }
        collection
    }

    /// Normalize one store row and fold it into the stats of its set
    pub fn ingest(&mut self, row: StoreRow) {
        let key = normalize(&row.status, row.label.as_deref());
        self.get_or_create_stats(row.benchmark_set_id, &row.benchmark_set_name)
            .add_stat(key, row.count, row.time);
    }

    /// Stats of the given set, created on first use.
    ///
    /// `name` is only recorded when the set is created; later calls with a
    /// different name return the existing stats unchanged.
    pub fn get_or_create_stats(
        &mut self,
        benchmark_set_id: BenchmarkSetId,
        name: &str,
    ) -> &mut BenchmarkSetStats {
        if !self.stats.contains_key(&benchmark_set_id) {
            debug!("Creating stats for benchmark set {} ({})", name, benchmark_set_id);
            self.name_to_ids
                .get_or_insert_with(name.to_string(), BTreeSet::new)
                .insert(benchmark_set_id);
        }

        self.stats.get_or_insert_with(benchmark_set_id, || {
            BenchmarkSetStats::new(benchmark_set_id, name)
        })
    }

    /// All stats, in creation order
    pub fn get_all_stats(&self) -> impl Iterator<Item = (BenchmarkSetId, &BenchmarkSetStats)> {
        self.stats.iter().map(|(id, stats)| (*id, stats))
    }

    /// Mutable access to all stats, in creation order
    pub fn get_all_stats_mut(&mut self) -> impl Iterator<Item = &mut BenchmarkSetStats> {
        self.stats.values_mut()
    }

    /// Stats of one set; `None` means the run has no results there
    #[must_use]
    pub fn get_stats_by_id(&self, benchmark_set_id: BenchmarkSetId) -> Option<&BenchmarkSetStats> {
        self.stats.get(&benchmark_set_id)
    }

    /// Benchmark set names, in first-seen order
    pub fn get_benchmarks_sets_names(&self) -> impl Iterator<Item = &str> {
        self.name_to_ids.keys().map(String::as_str)
    }

    /// Ids seen under the given set name
    #[must_use]
    pub fn get_ids_for_name(&self, name: &str) -> Option<&BTreeSet<BenchmarkSetId>> {
        self.name_to_ids.get(name)
    }

    /// Benchmark set ids, in creation order
    pub fn get_benchmarks_sets(&self) -> impl Iterator<Item = BenchmarkSetId> + '_ {
        self.stats.keys().copied()
    }

    /// Number of benchmark sets
    #[must_use]
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Whether no set has been created
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Merge every set into one overall stats object with its accumulated
    /// time computed
    #[must_use]
    pub fn summary(&self, solved_only: bool) -> BenchmarkSetStats {
        let mut overall = BenchmarkSetStats::overall();
        for stats in self.stats.values() {
            overall.merge(stats);
        }
        overall.accumulate_time(solved_only);
        overall
    }
}
