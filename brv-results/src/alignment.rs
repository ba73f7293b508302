//! Side-by-side alignment of per-benchmark results
//!
//! ```text
//!              tool1  tool2  ...
//! benchmark1   r11    r12    ...
//! benchmark2   r21    --     ...
//! ```
//!
//! Tools are added one at a time. Every row always has one slot per tool
//! added so far, in insertion order; a tool that did not report a benchmark
//! leaves `None` in that slot.

use crate::ordered::OrderedMap;
use tracing::warn;

/// A result that belongs to one named benchmark
pub trait BenchmarkKeyed {
    /// Full benchmark name used as the row key
    fn benchmark_name(&self) -> &str;
}

/// Benchmark name -> per-tool results
#[derive(Debug, Clone)]
pub struct ResultAlignmentTable<T> {
    rows: OrderedMap<String, Vec<Option<T>>>,
    tools_num: usize,
}

impl<T: BenchmarkKeyed> ResultAlignmentTable<T> {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: OrderedMap::new(),
            tools_num: 0,
        }
    }

    /// Add the results of one tool as a new column.
    ///
    /// If the tool reports a benchmark more than once, the first result is
    /// kept.
    pub fn add(&mut self, results: impl IntoIterator<Item = T>) {
        let tools_num = self.tools_num;
        for result in results {
            let row = self
                .rows
                .get_or_insert_with(result.benchmark_name().to_string(), Vec::new);
            if row.len() > tools_num {
                warn!(
                    "Tool {} reported {} more than once, ignoring duplicate",
                    tools_num,
                    result.benchmark_name()
                );
                continue;
            }
            fill_blank(row, tools_num);
            row.push(Some(result));
        }
        self.tools_num += 1;
    }

    /// Number of tools added so far
    #[must_use]
    pub fn tools_num(&self) -> usize {
        self.tools_num
    }

    /// Number of benchmarks seen so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no tool reported any benchmark
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Padded row of one benchmark, `None` when no tool reported it
    pub fn get_run_infos(&mut self, benchmark: &str) -> Option<&[Option<T>]> {
        let tools_num = self.tools_num;
        let row = self.rows.get_mut(benchmark)?;
        fill_blank(row, tools_num);
        Some(row.as_slice())
    }

    /// All rows padded to the number of tools, in first-seen order
    pub fn get_rows(&mut self) -> impl Iterator<Item = (&str, &[Option<T>])> {
        let tools_num = self.tools_num;
        for row in self.rows.values_mut() {
            fill_blank(row, tools_num);
        }
        self.rows
            .iter()
            .map(|(name, row)| (name.as_str(), row.as_slice()))
    }
}

impl<T: BenchmarkKeyed> Default for ResultAlignmentTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn fill_blank<T>(row: &mut Vec<Option<T>>, tools_num: usize) {
    if row.len() < tools_num {
        row.resize_with(tools_num, || None);
    }
}
