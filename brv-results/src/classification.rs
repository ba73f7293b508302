//! Classification keys and their normalization
//!
//! Tools report outcomes with free-form status strings such as
//! `"FALSE(unreach-call)"` or `"TIMEOUT"`. This module maps those raw
//! statuses onto a small canonical vocabulary so that results from different
//! tools and tool versions can be counted together.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label forced onto canonical keys whose raw label was absent
pub const ERROR_LABEL: &str = "error";

/// Canonical result status produced by [`normalize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalStatus {
    /// Property violated
    False,
    /// Property holds
    True,
    /// Tool gave up
    Unknown,
    /// Tool ran out of time
    Timeout,
    /// Tool crashed or reported an error
    Error,
    /// Anything that matches none of the above
    Other,
}

impl CanonicalStatus {
    /// Statuses tried by prefix, in priority order. `Other` is the fallback
    /// and never matches by prefix.
    pub const PRIORITY: [CanonicalStatus; 5] = [
        Self::False,
        Self::True,
        Self::Unknown,
        Self::Timeout,
        Self::Error,
    ];

    /// Lowercase string form, as stored in a [`ClassificationKey`]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::False => "false",
            Self::True => "true",
            Self::Unknown => "unknown",
            Self::Timeout => "timeout",
            Self::Error => "error",
            Self::Other => "other",
        }
    }

    /// Find the first canonical status that is a case-insensitive prefix of
    /// `raw`
    #[must_use]
    pub fn match_prefix(raw: &str) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|status| {
            let prefix = status.as_str();
            raw.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        })
    }
}

impl fmt::Display for CanonicalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(status, label)` pair identifying one kind of verification outcome
///
/// The status may be raw (as reported by a tool) or canonical (as produced by
/// [`normalize`]); callers decide which vocabulary a given stats object holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassificationKey {
    /// Result status, e.g. `"true"` or `"timeout"`
    pub status: String,
    /// Classification label, e.g. `"correct"` or `"incorrect"`
    pub label: Option<String>,
}

impl ClassificationKey {
    /// Create a key with a label
    #[must_use]
    pub fn new(status: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            label: Some(label.into()),
        }
    }

    /// Create a key without a label
    #[must_use]
    pub fn unlabeled(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            label: None,
        }
    }

    /// The fixed key used when no canonical status matches
    #[must_use]
    pub fn other() -> Self {
        Self::new(CanonicalStatus::Other.as_str(), ERROR_LABEL)
    }

    /// Label as a string slice, if present
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Re-derive the canonical form of this key
    #[must_use]
    pub fn normalized(&self) -> Self {
        normalize(&self.status, self.label())
    }
}

impl fmt::Display for ClassificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{} ({})", self.status, label),
            None => f.write_str(&self.status),
        }
    }
}

/// Map a raw `(status, label)` pair to its canonical key.
///
/// The first canonical status that prefixes `raw_status` (ignoring case)
/// wins; a missing label becomes [`ERROR_LABEL`]. When nothing matches the
/// result is `(other, error)` and `raw_label` is dropped.
#[must_use]
pub fn normalize(raw_status: &str, raw_label: Option<&str>) -> ClassificationKey {
    match CanonicalStatus::match_prefix(raw_status) {
        Some(status) => ClassificationKey::new(status.as_str(), raw_label.unwrap_or(ERROR_LABEL)),
        None => ClassificationKey::other(),
    }
}
