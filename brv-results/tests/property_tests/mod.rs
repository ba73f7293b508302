//! Property-based tests for brv-results
//!
//! These use proptest to check the invariants of normalization, stats
//! accumulation, bucket coverage and result alignment.

mod alignment_properties;
mod bucket_properties;
mod classification_properties;
mod stats_properties;
