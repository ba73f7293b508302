//! Typed result view for the presentation layer
//!
//! [`ResultsView::build`] does all computation a results page needs: it
//! resolves the selected grouping, extends it so no classification is hidden,
//! and aggregates every bucket for every tool run, per benchmark set and for
//! the overall scope. The presentation layer only formats the values.

use crate::aggregate::{aggregate, extend_and_filter};
use crate::collection::ToolRunStatsCollection;
use crate::grouping::{CatalogError, GroupingBucket, GroupingCatalog, GroupingChoice};
use crate::stats::{BenchmarkSetId, BenchmarkSetStats, OVERALL_SET_ID, OVERALL_SET_NAME, Stat};
use crate::tool_run::ToolRun;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Error type for view building
#[derive(Error, Debug)]
pub enum ViewError {
    /// No tool run was selected
    #[error("No runs of tools given")]
    NoRuns,
    /// Grouping lookup failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result type for view building
pub type ViewResult<T> = Result<T, ViewError>;

/// Options selected by the user for one results page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewOptions {
    /// Requested grouping index; `None` selects index 0
    pub grouping: Option<usize>,
    /// Show consumed times next to counts
    pub show_times: bool,
    /// Accumulate only the time of solved (correct or incorrect) results
    pub show_times_only_solved: bool,
    /// Render all sets in one table
    pub inline_view: bool,
}

impl ViewOptions {
    /// Create default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a grouping
    #[must_use]
    pub fn with_grouping(mut self, index: usize) -> Self {
        self.grouping = Some(index);
        self
    }

    /// Set whether to show times
    #[must_use]
    pub fn with_show_times(mut self, show: bool) -> Self {
        self.show_times = show;
        self
    }

    /// Set whether accumulated times count solved results only
    #[must_use]
    pub fn with_show_times_only_solved(mut self, solved_only: bool) -> Self {
        self.show_times_only_solved = solved_only;
        self
    }

    /// Set inline view
    #[must_use]
    pub fn with_inline_view(mut self, inline: bool) -> Self {
        self.inline_view = inline;
        self
    }
}

/// A tool run together with the stats queried for it
#[derive(Debug, Clone)]
pub struct ToolRunResults {
    /// Run metadata
    pub run: ToolRun,
    /// Per benchmark-set stats
    pub stats: ToolRunStatsCollection,
}

impl ToolRunResults {
    /// Pair a run with its stats
    #[must_use]
    pub fn new(run: ToolRun, stats: ToolRunStatsCollection) -> Self {
        Self { run, stats }
    }
}

/// Identity of a benchmark set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkSetRef {
    /// Set id
    pub id: BenchmarkSetId,
    /// Set name
    pub name: String,
}

/// Summary of one run in one scope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunTotal {
    /// Number of results over all classifications
    pub count: u64,
    /// Accumulated time, honoring the solved-only option
    pub accumulated_time: f64,
}

impl From<&BenchmarkSetStats> for RunTotal {
    fn from(stats: &BenchmarkSetStats) -> Self {
        Self {
            count: stats.total_count(),
            accumulated_time: stats.accumulated_time(),
        }
    }
}

/// Aggregates of one scope (a benchmark set or the overall scope)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSection {
    /// The set this section describes
    pub set: BenchmarkSetRef,
    /// `cells[bucket][run]`
    pub cells: Vec<Vec<Stat>>,
    /// Per run totals; `None` when the run has no results in this set
    pub totals: Vec<Option<RunTotal>>,
}

impl SetSection {
    fn build(
        set: BenchmarkSetRef,
        buckets: &[GroupingBucket],
        stats: &[Option<&BenchmarkSetStats>],
    ) -> Self {
        let cells = buckets
            .iter()
            .map(|bucket| stats.iter().map(|s| aggregate(bucket, *s)).collect())
            .collect();
        let totals = stats.iter().map(|s| s.map(RunTotal::from)).collect();
        Self { set, cells, totals }
    }

    /// Aggregate of bucket `bucket` for run `run`
    #[must_use]
    pub fn cell(&self, bucket: usize, run: usize) -> Stat {
        self.cells
            .get(bucket)
            .and_then(|row| row.get(run))
            .copied()
            .unwrap_or_default()
    }
}

/// Everything a results page renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsView {
    /// Grouping actually used, after fallback
    pub grouping_index: usize,
    /// Choices for the grouping selector
    pub groupings: Vec<GroupingChoice>,
    /// Extended and filtered buckets in display order
    pub buckets: Vec<GroupingBucket>,
    /// Rendered tool runs, in request order
    pub runs: Vec<ToolRun>,
    /// One section per benchmark set, in first-seen order
    pub sets: Vec<SetSection>,
    /// The overall/all-sets scope
    pub overall: SetSection,
    /// Options the view was built with
    pub options: ViewOptions,
}

impl ResultsView {
    /// Build the view for the given runs.
    ///
    /// Accumulated times of every set are recomputed according to
    /// `options.show_times_only_solved`. An unknown grouping index falls
    /// back to index 0.
    pub fn build(
        catalog: &GroupingCatalog,
        options: &ViewOptions,
        runs: &mut [ToolRunResults],
    ) -> ViewResult<Self> {
        if runs.is_empty() {
            return Err(ViewError::NoRuns);
        }

        let requested = options.grouping.unwrap_or(0);
        let (grouping_index, grouping) = match catalog.get_grouping(requested) {
            Ok(grouping) => (requested, grouping),
            Err(e) => {
                warn!("{}, falling back to the default grouping", e);
                (0, catalog.get_grouping(0)?)
            }
        };

        let solved_only = options.show_times_only_solved;
        let mut set_refs: Vec<BenchmarkSetRef> = Vec::new();
        for results in runs.iter_mut() {
            for stats in results.stats.get_all_stats_mut() {
                stats.accumulate_time(solved_only);
                if !set_refs.iter().any(|s| s.id == stats.id()) {
                    set_refs.push(BenchmarkSetRef {
                        id: stats.id(),
                        name: stats.name().to_string(),
                    });
                }
            }
        }

        let summaries: Vec<BenchmarkSetStats> =
            runs.iter().map(|r| r.stats.summary(solved_only)).collect();
        let buckets = extend_and_filter(grouping, &summaries);
        debug!(
            "Rendering {} bucket(s) of grouping {:?} for {} run(s) over {} set(s)",
            buckets.len(),
            grouping.display_name(),
            runs.len(),
            set_refs.len()
        );

        let sets = set_refs
            .into_iter()
            .map(|set| {
                let stats: Vec<_> = runs.iter().map(|r| r.stats.get_stats_by_id(set.id)).collect();
                SetSection::build(set, &buckets, &stats)
            })
            .collect();

        let overall_stats: Vec<_> = summaries.iter().map(Some).collect();
        let overall = SetSection::build(
            BenchmarkSetRef {
                id: OVERALL_SET_ID,
                name: OVERALL_SET_NAME.to_string(),
            },
            &buckets,
            &overall_stats,
        );

        Ok(Self {
            grouping_index,
            groupings: catalog.get_grouping_choices().to_vec(),
            buckets,
            runs: runs.iter().map(|r| r.run.clone()).collect(),
            sets,
            overall,
            options: options.clone(),
        })
    }
}
