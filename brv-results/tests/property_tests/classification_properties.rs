//! Property-based tests for classification normalization

use brv_results::classification::{CanonicalStatus, ClassificationKey, normalize};
use proptest::prelude::*;

fn raw_status() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z()_ -]{0,20}",
        "(FALSE|false|True|TIMEOUT|unknown|Error)[a-z()_-]{0,10}",
        ".{0,12}",
    ]
}

proptest! {
    /// Normalization never fails and always yields a canonical status
    #[test]
    fn normalize_is_total(status in raw_status(), label in proptest::option::of(".{0,8}")) {
        let key = normalize(&status, label.as_deref());
        let canonical: Vec<_> = CanonicalStatus::PRIORITY
            .iter()
            .chain(std::iter::once(&CanonicalStatus::Other))
            .map(CanonicalStatus::as_str)
            .collect();
        prop_assert!(canonical.contains(&key.status.as_str()));
        prop_assert!(key.label.is_some());
    }

    /// Re-normalizing a normalized key changes nothing
    #[test]
    fn normalize_is_idempotent(status in raw_status(), label in proptest::option::of(".{0,8}")) {
        let once = normalize(&status, label.as_deref());
        let twice = normalize(&once.status, once.label());
        prop_assert_eq!(once, twice);
    }

    /// A matching canonical prefix keeps the label, no match discards it
    #[test]
    fn label_kept_only_on_match(status in raw_status(), label in "[a-z]{1,8}") {
        let key = normalize(&status, Some(label.as_str()));
        if CanonicalStatus::match_prefix(&status).is_some() {
            prop_assert_eq!(key.label(), Some(label.as_str()));
        } else {
            prop_assert_eq!(key, ClassificationKey::other());
        }
    }
}
