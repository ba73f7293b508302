//! Tool run metadata and single benchmark results

use crate::alignment::BenchmarkKeyed;
use crate::classification::{ClassificationKey, normalize};
use serde::{Deserialize, Serialize};

/// Numeric identifier of a tool run, as assigned by the result store
pub type ToolRunId = i64;

/// One tool in a given version, run with given options and limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRun {
    /// Tool run id
    pub id: ToolRunId,
    /// Tool name
    pub tool: String,
    /// Tool version
    pub version: String,
    /// Date of the run
    pub date: String,
    /// Command-line options the tool ran with
    pub options: Option<String>,
    /// Time limit, as recorded by the store (e.g. `"900 s"`)
    pub time_limit: Option<String>,
    /// Memory limit, as recorded by the store (e.g. `"15 GB"`)
    pub memory_limit: Option<String>,
}

impl ToolRun {
    /// Create a run record without options or limits
    #[must_use]
    pub fn new(
        id: ToolRunId,
        tool: impl Into<String>,
        version: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            tool: tool.into(),
            version: version.into(),
            date: date.into(),
            options: None,
            time_limit: None,
            memory_limit: None,
        }
    }

    /// Set the options
    #[must_use]
    pub fn with_options(mut self, options: impl Into<String>) -> Self {
        self.options = Some(options.into());
        self
    }

    /// Set the time and memory limits
    #[must_use]
    pub fn with_limits(mut self, time: impl Into<String>, memory: impl Into<String>) -> Self {
        self.time_limit = Some(time.into());
        self.memory_limit = Some(memory.into());
        self
    }

    /// Time and memory limit joined by a space; missing limits are skipped
    #[must_use]
    pub fn limits(&self) -> String {
        [self.time_limit.as_deref(), self.memory_limit.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Short description for column headers: the options if any, else the
    /// version
    #[must_use]
    pub fn description(&self) -> &str {
        match self.options.as_deref() {
            Some(options) if !options.trim().is_empty() => options,
            _ => &self.version,
        }
    }
}

/// Outcome of one tool on one benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// Full benchmark name
    pub benchmark: String,
    /// Status as reported by the tool
    pub status: String,
    /// Classification label, if classified
    pub classification: Option<String>,
    /// CPU time in seconds
    pub cpu_time: f64,
    /// Peak memory in bytes, if tracked
    pub memory_bytes: Option<u64>,
}

impl RunResult {
    /// Create a result
    #[must_use]
    pub fn new(
        benchmark: impl Into<String>,
        status: impl Into<String>,
        classification: Option<&str>,
        cpu_time: f64,
    ) -> Self {
        Self {
            benchmark: benchmark.into(),
            status: status.into(),
            classification: classification.map(str::to_string),
            cpu_time,
            memory_bytes: None,
        }
    }

    /// Canonical classification of this result
    #[must_use]
    pub fn classification_key(&self) -> ClassificationKey {
        normalize(&self.status, self.classification.as_deref())
    }
}

impl BenchmarkKeyed for RunResult {
    fn benchmark_name(&self) -> &str {
        &self.benchmark
    }
}
