//! Classification groupings loaded from configuration
//!
//! A grouping lets several classifications be displayed on one line under a
//! custom description. The catalog is built once from a [`GroupingConfig`]
//! and is read-only afterwards, so it can be shared between requests.
//!
//! The configuration is JSON shaped like:
//!
//! ```json
//! {
//!   "groupings": [
//!     {
//!       "displayName": "Correctness",
//!       "buckets": [
//!         {
//!           "displayName": "correct",
//!           "nameClass": "classif status-correct",
//!           "classifications": [
//!             { "type": "true", "cat": "correct" },
//!             { "type": "false", "cat": "correct" }
//!           ]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use crate::classification::ClassificationKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Display name of the grouping used when the configuration has none
pub const DEFAULT_GROUPING_NAME: &str = "No grouping";

/// Error type for grouping catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Configuration could not be parsed or misses a required key
    #[error("Invalid grouping configuration: {0}")]
    Config(#[from] serde_json::Error),
    /// Requested grouping does not exist
    #[error("Grouping {index} out of range (catalog has {len})")]
    GroupingOutOfRange {
        /// Requested index
        index: usize,
        /// Number of groupings in the catalog
        len: usize,
    },
}

/// Result type for grouping catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Top-level grouping configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Configured groupings; absent or `null` means none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub groupings: Vec<GroupingEntryConfig>,
}

/// One grouping in the configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingEntryConfig {
    /// Human-readable name
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Buckets in display order
    pub buckets: Vec<BucketConfig>,
}

/// One bucket in the configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketConfig {
    /// Human-readable name
    #[serde(rename = "displayName")]
    pub display_name: String,
    /// Display tag (CSS class) for the cell
    #[serde(rename = "nameClass")]
    pub name_class: String,
    /// Classifications claimed by the bucket
    pub classifications: Vec<ClassificationConfig>,
}

/// One `(type, cat)` classification in the configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Result status
    #[serde(rename = "type")]
    pub status: String,
    /// Classification label; must be present, may be `null`
    #[serde(deserialize_with = "required_nullable")]
    pub cat: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// A field with `deserialize_with` and no `default` is required even when it
// is an `Option`.
fn required_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

impl From<&ClassificationConfig> for ClassificationKey {
    fn from(config: &ClassificationConfig) -> Self {
        Self {
            status: config.status.clone(),
            label: config.cat.clone(),
        }
    }
}

/// A named group of classifications shown as one cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingBucket {
    display_name: String,
    name_class: String,
    classifications: Vec<ClassificationKey>,
    synthetic: bool,
}

impl GroupingBucket {
    /// Create a configured bucket
    #[must_use]
    pub fn new(
        display_name: impl Into<String>,
        name_class: impl Into<String>,
        classifications: Vec<ClassificationKey>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            name_class: name_class.into(),
            classifications,
            synthetic: false,
        }
    }

    /// Create a render-time bucket that is never part of the catalog
    #[must_use]
    pub(crate) fn synthetic(
        display_name: impl Into<String>,
        name_class: impl Into<String>,
        key: ClassificationKey,
    ) -> Self {
        Self {
            synthetic: true,
            ..Self::new(display_name, name_class, vec![key])
        }
    }

    /// Human-readable name
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Display tag
    #[must_use]
    pub fn name_class(&self) -> &str {
        &self.name_class
    }

    /// Claimed classifications, in configuration order
    #[must_use]
    pub fn classifications(&self) -> &[ClassificationKey] {
        &self.classifications
    }

    /// Whether this bucket claims `key`
    #[must_use]
    pub fn claims(&self, key: &ClassificationKey) -> bool {
        self.classifications.contains(key)
    }

    /// Whether the bucket was created at render time
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.synthetic
    }
}

impl From<&BucketConfig> for GroupingBucket {
    fn from(config: &BucketConfig) -> Self {
        Self::new(
            config.display_name.clone(),
            config.name_class.clone(),
            config.classifications.iter().map(ClassificationKey::from).collect(),
        )
    }
}

/// An ordered, named collection of buckets
///
/// Bucket order is both display order and first-match precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grouping {
    display_name: String,
    buckets: Vec<GroupingBucket>,
}

impl Grouping {
    /// Create a grouping
    #[must_use]
    pub fn new(display_name: impl Into<String>, buckets: Vec<GroupingBucket>) -> Self {
        Self {
            display_name: display_name.into(),
            buckets,
        }
    }

    /// The implicit grouping that claims nothing
    #[must_use]
    pub fn no_grouping() -> Self {
        Self::new(DEFAULT_GROUPING_NAME, Vec::new())
    }

    /// Human-readable name
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Buckets in display order
    #[must_use]
    pub fn buckets(&self) -> &[GroupingBucket] {
        &self.buckets
    }

    /// First bucket claiming `key`
    #[must_use]
    pub fn bucket_for(&self, key: &ClassificationKey) -> Option<&GroupingBucket> {
        self.buckets.iter().find(|b| b.claims(key))
    }
}

impl From<&GroupingEntryConfig> for Grouping {
    fn from(config: &GroupingEntryConfig) -> Self {
        Self::new(
            config.display_name.clone(),
            config.buckets.iter().map(GroupingBucket::from).collect(),
        )
    }
}

/// Entry of the grouping selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingChoice {
    /// Human-readable name
    pub display_name: String,
    /// Index to pass to [`GroupingCatalog::get_grouping`]
    pub index: usize,
}

/// Read-only catalog of the available groupings
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingCatalog {
    groupings: Vec<Grouping>,
    choices: Vec<GroupingChoice>,
}

impl GroupingCatalog {
    /// Build the catalog from a parsed configuration.
    ///
    /// An empty configuration yields a single implicit
    /// [`DEFAULT_GROUPING_NAME`] grouping with no buckets.
    #[must_use]
    pub fn from_config(config: &GroupingConfig) -> Self {
        let mut groupings: Vec<Grouping> = config.groupings.iter().map(Grouping::from).collect();
        if groupings.is_empty() {
            groupings.push(Grouping::no_grouping());
        }

        let choices = groupings
            .iter()
            .enumerate()
            .map(|(index, g)| GroupingChoice {
                display_name: g.display_name().to_string(),
                index,
            })
            .collect();

        info!("Loaded {} classification grouping(s)", groupings.len());

        Self { groupings, choices }
    }

    /// Parse a JSON configuration and build the catalog
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let config: GroupingConfig = serde_json::from_str(json)?;
        Ok(Self::from_config(&config))
    }

    /// Build the catalog from an already parsed JSON value
    pub fn from_json_value(value: serde_json::Value) -> CatalogResult<Self> {
        let config: GroupingConfig = serde_json::from_value(value)?;
        Ok(Self::from_config(&config))
    }

    /// `(display name, index)` pairs for the grouping selector
    #[must_use]
    pub fn get_grouping_choices(&self) -> &[GroupingChoice] {
        &self.choices
    }

    /// Grouping at `index`; out of range is an error, not clamped
    pub fn get_grouping(&self, index: usize) -> CatalogResult<&Grouping> {
        self.groupings
            .get(index)
            .ok_or(CatalogError::GroupingOutOfRange {
                index,
                len: self.groupings.len(),
            })
    }

    /// Number of groupings, including the implicit default
    #[must_use]
    pub fn len(&self) -> usize {
        self.groupings.len()
    }

    /// Always `false`: index 0 is reachable in every catalog
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groupings.is_empty()
    }
}

impl Default for GroupingCatalog {
    fn default() -> Self {
        Self::from_config(&GroupingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "groupings": [
            {
                "displayName": "Correctness",
                "buckets": [
                    {
                        "displayName": "correct",
                        "nameClass": "classif status-correct",
                        "classifications": [
                            { "type": "true", "cat": "correct" },
                            { "type": "false", "cat": "correct" }
                        ]
                    },
                    {
                        "displayName": "wrong",
                        "nameClass": "classif status-incorrect",
                        "classifications": [
                            { "type": "true", "cat": "incorrect" },
                            { "type": "false", "cat": "incorrect" }
                        ]
                    }
                ]
            },
            {
                "displayName": "Unclassified",
                "buckets": [
                    {
                        "displayName": "no label",
                        "nameClass": "classif",
                        "classifications": [ { "type": "unknown", "cat": null } ]
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_load_catalog() {
        let catalog = GroupingCatalog::from_json_str(CONFIG).unwrap();
        assert_eq!(catalog.len(), 2);

        let choices = catalog.get_grouping_choices();
        assert_eq!(choices[0].display_name, "Correctness");
        assert_eq!(choices[0].index, 0);
        assert_eq!(choices[1].display_name, "Unclassified");
        assert_eq!(choices[1].index, 1);

        let grouping = catalog.get_grouping(0).unwrap();
        assert_eq!(grouping.buckets().len(), 2);
        let correct = &grouping.buckets()[0];
        assert_eq!(correct.display_name(), "correct");
        assert_eq!(correct.name_class(), "classif status-correct");
        assert_eq!(
            correct.classifications(),
            &[
                ClassificationKey::new("true", "correct"),
                ClassificationKey::new("false", "correct")
            ]
        );
        assert!(!correct.is_synthetic());

        let unclassified = catalog.get_grouping(1).unwrap();
        assert_eq!(
            unclassified.buckets()[0].classifications(),
            &[ClassificationKey::unlabeled("unknown")]
        );
    }

    #[test]
    fn test_out_of_range_is_lookup_failure() {
        let catalog = GroupingCatalog::from_json_str(CONFIG).unwrap();
        let err = catalog.get_grouping(2).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::GroupingOutOfRange { index: 2, len: 2 }
        ));
    }

    #[test]
    fn test_empty_config_has_implicit_default() {
        for json in [r#"{}"#, r#"{"groupings": null}"#, r#"{"groupings": []}"#] {
            let catalog = GroupingCatalog::from_json_str(json).unwrap();
            assert_eq!(catalog.len(), 1);
            assert!(!catalog.is_empty());
            let grouping = catalog.get_grouping(0).unwrap();
            assert_eq!(grouping.display_name(), DEFAULT_GROUPING_NAME);
            assert!(grouping.buckets().is_empty());
            assert!(catalog.get_grouping(1).is_err());
        }
    }

    #[test]
    fn test_missing_keys_fail_fast() {
        let missing = [
            r#"{"groupings": [{"buckets": []}]}"#,
            r#"{"groupings": [{"displayName": "g"}]}"#,
            r#"{"groupings": [{"displayName": "g", "buckets": [
                {"nameClass": "c", "classifications": []}]}]}"#,
            r#"{"groupings": [{"displayName": "g", "buckets": [
                {"displayName": "b", "classifications": []}]}]}"#,
            r#"{"groupings": [{"displayName": "g", "buckets": [
                {"displayName": "b", "nameClass": "c"}]}]}"#,
            r#"{"groupings": [{"displayName": "g", "buckets": [
                {"displayName": "b", "nameClass": "c",
                 "classifications": [{"cat": "correct"}]}]}]}"#,
            r#"{"groupings": [{"displayName": "g", "buckets": [
                {"displayName": "b", "nameClass": "c",
                 "classifications": [{"type": "true"}]}]}]}"#,
        ];

        for json in missing {
            let err = GroupingCatalog::from_json_str(json).unwrap_err();
            assert!(matches!(err, CatalogError::Config(_)), "accepted {}", json);
        }
    }

    #[test]
    fn test_bucket_for_uses_first_match() {
        let grouping = Grouping::new(
            "g",
            vec![
                GroupingBucket::new("first", "a", vec![ClassificationKey::new("true", "correct")]),
                GroupingBucket::new("second", "b", vec![ClassificationKey::new("true", "correct")]),
            ],
        );
        let bucket = grouping
            .bucket_for(&ClassificationKey::new("true", "correct"))
            .unwrap();
        assert_eq!(bucket.display_name(), "first");
        assert!(grouping.bucket_for(&ClassificationKey::other()).is_none());
    }

    #[test]
    fn test_from_json_value() {
        let value: serde_json::Value = serde_json::from_str(CONFIG).unwrap();
        let catalog = GroupingCatalog::from_json_value(value).unwrap();
        assert_eq!(catalog.get_grouping(1).unwrap().display_name(), "Unclassified");
    }
}
