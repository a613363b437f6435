#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

use serde_json::Value;

pub mod catalogue;
mod contract;
mod extract;
pub mod fetch;
mod normalize;
pub mod runner;
pub mod shapes;
pub mod snapshot;
mod types;

pub use contract::{diff_contract, Shape};
pub use extract::{extract, path_set};
pub use normalize::normalize_key;
pub use types::*;

/// Compare two JSON snapshots of the same endpoint by their path sets.
///
/// `previous` is the stored snapshot, `current` the live response. Paths in
/// only one of the two are classified as removed or added; paths in both are
/// reported as unchanged, with the previously captured entry.
pub fn diff_snapshots(previous: &Value, current: &Value) -> SnapshotDiff {
    let mut removed = path_set(previous);
    let mut diff = SnapshotDiff::default();

    for (path, entry) in path_set(current) {
        match removed.remove(&path) {
            Some(previous_entry) => {
                diff.unchanged.insert(path, previous_entry);
            }
            None => {
                diff.added.insert(path, entry);
            }
        }
    }
    diff.removed = removed;

    diff
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn identical_documents_have_no_drift() {
        for document in [
            json!({}),
            json!({"a": 1, "b": {"c": null}}),
            json!({"results": [{"id": 1}, {"id": 2, "name": "x"}]}),
            json!([{"deep": {"nested": [{"leaf": true}]}}]),
        ] {
            let diff = diff_snapshots(&document, &document);
            assert!(diff.is_same(), "unexpected drift for {document}");
        }
    }

    #[test]
    fn added_and_removed_paths_are_classified() {
        let previous = json!({"a": 1});
        let current = json!({"a": 1, "b": 2});

        let diff = diff_snapshots(&previous, &current);

        assert!(!diff.is_same());
        assert_eq!(diff.added.keys().collect::<Vec<_>>(), vec!["b"]);
        assert!(diff.removed.is_empty());
        assert_eq!(diff.unchanged.keys().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn drift_inside_arrays_uses_the_collapsed_marker() {
        let previous = json!({"results": [{"id": 1}]});
        let current = json!({"results": [{"id": 1, "rank": 3}]});

        let diff = diff_snapshots(&previous, &current);

        assert_eq!(
            diff.added.keys().collect::<Vec<_>>(),
            vec!["results[array].rank"]
        );
    }

    #[test]
    fn unchanged_paths_keep_the_previous_entry() {
        let previous = json!({"a": "old"});
        let current = json!({"a": "new"});

        let diff = diff_snapshots(&previous, &current);
        assert_eq!(diff.unchanged["a"].value, json!("old"));
    }

    #[test]
    fn array_length_differences_are_not_drift() {
        let previous = json!({"results": [{"id": 1}]});
        let current = json!({"results": [{"id": 1}, {"id": 2}, {"id": 3}]});

        assert!(diff_snapshots(&previous, &current).is_same());
    }
}
