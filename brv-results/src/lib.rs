//! BRV Results - Verification Tool Result Aggregation
//!
//! This crate aggregates per-benchmark results of verification tools into
//! summary statistics, groups them into configurable display buckets, and
//! aligns results of several tools for side-by-side comparison.
//!
//! # Features
//!
//! - Normalization of raw tool statuses into canonical classifications
//! - Per benchmark-set counting and time accumulation
//! - Configuration-driven groupings with render-time extension, so that
//!   unconfigured classifications are never hidden
//! - Typed results view for the presentation layer
//! - Dense alignment table of per-benchmark results across tools
//!
//! # Examples
//!
//! ## Aggregating Store Rows
//!
//! ```
//! use brv_results::{
//!     GroupingCatalog, ResultsView, StoreRow, ToolRun, ToolRunResults,
//!     ToolRunStatsCollection, ViewOptions,
//! };
//!
//! let catalog = GroupingCatalog::from_json_str(r#"{"groupings": []}"#)
//!     .expect("valid configuration");
//!
//! let stats = ToolRunStatsCollection::from_rows(vec![StoreRow {
//!     benchmark_set_id: 1,
//!     benchmark_set_name: "ReachSafety".to_string(),
//!     status: "TRUE".to_string(),
//!     label: Some("correct".to_string()),
//!     count: 10,
//!     time: 42.0,
//! }]);
//!
//! let mut runs = vec![ToolRunResults::new(
//!     ToolRun::new(1, "cpachecker", "1.6", "2017-01-10"),
//!     stats,
//! )];
//! let view = ResultsView::build(&catalog, &ViewOptions::new(), &mut runs)
//!     .expect("at least one run");
//! assert_eq!(view.buckets.len(), 1);
//! assert_eq!(view.overall.cell(0, 0).count, 10);
//! ```
//!
//! ## Aligning Results
//!
//! ```
//! use brv_results::{ResultAlignmentTable, RunResult};
//!
//! let mut table = ResultAlignmentTable::new();
//! table.add(vec![RunResult::new("a.c", "true", Some("correct"), 1.0)]);
//! table.add(vec![RunResult::new("b.c", "unknown", None, 2.0)]);
//!
//! for (benchmark, results) in table.get_rows() {
//!     assert_eq!(results.len(), 2);
//!     println!("{}: {:?}", benchmark, results);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod ordered;

pub mod aggregate;
pub mod alignment;
pub mod classification;
pub mod collection;
pub mod grouping;
pub mod report;
pub mod stats;
pub mod tool_run;
pub mod view;

pub use aggregate::{
    MISSING_CLASSIFICATION, aggregate, extend_and_filter, extend_buckets, filter_buckets,
    observed_classifications, synthesize_bucket,
};

pub use alignment::{BenchmarkKeyed, ResultAlignmentTable};

pub use classification::{CanonicalStatus, ClassificationKey, normalize};

pub use collection::{StoreRow, ToolRunStatsCollection};

pub use grouping::{
    BucketConfig, CatalogError, CatalogResult, ClassificationConfig, Grouping, GroupingBucket,
    GroupingCatalog, GroupingChoice, GroupingConfig, GroupingEntryConfig,
};

pub use report::{format_time, render_text};

pub use stats::{BenchmarkSetId, BenchmarkSetStats, OVERALL_SET_ID, Stat};

pub use tool_run::{RunResult, ToolRun, ToolRunId};

pub use view::{
    BenchmarkSetRef, ResultsView, RunTotal, SetSection, ToolRunResults, ViewError, ViewOptions,
    ViewResult,
};
