use std::collections::{BTreeMap, HashSet};

use serde_json::Value;

use crate::{JsonKind, PathEntry};

/// Walk a JSON document and yield one [`PathEntry`] per property, in
/// depth-first pre-order: a parent's entry comes before its children's.
///
/// Object keys are visited in document order. Arrays do not yield an entry of
/// their own at the traversal level; instead the `[array]` marker is appended
/// to the current prefix and all object elements are merged into one
/// representative shape.
pub fn extract(value: &Value) -> Vec<PathEntry> {
    let mut entries = Vec::new();
    walk("", value, &mut entries);
    entries
}

/// Build the deduplicated path set for one document: the first entry observed
/// per unique field path, keyed by path.
pub fn path_set(value: &Value) -> BTreeMap<String, PathEntry> {
    let mut set = BTreeMap::new();
    for entry in extract(value) {
        set.entry(entry.path.clone()).or_insert(entry);
    }
    set
}

fn walk(prefix: &str, value: &Value, entries: &mut Vec<PathEntry>) {
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                let path = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };

                entries.push(PathEntry {
                    path: path.clone(),
                    name: name.clone(),
                    kind: JsonKind::from(child),
                    value: child.clone(),
                });

                walk(&path, child, entries);
            }
        }
        Value::Array(elements) => {
            // No separator before the marker: `results` becomes `results[array]`.
            let marker = format!("{prefix}[array]");
            merge_array_elements(&marker, elements, entries);
        }
        // Scalars and null are terminal; the parent already yielded their entry.
        _ => {}
    }
}

/// Merge the entries of every object element of an array into one shape.
///
/// Elements are deduplicated by field path, first seen wins: a 100-item result
/// array collapses into one representative shape, and scanning every element
/// still picks up fields that element 0 happens to lack. A later element that
/// disagrees on a field's kind is silently ignored.
///
/// Non-object elements (scalars, nested arrays) are not traversed and yield no
/// entries.
fn merge_array_elements(marker: &str, elements: &[Value], entries: &mut Vec<PathEntry>) {
    let mut seen: HashSet<String> = HashSet::new();

    for element in elements {
        if !element.is_object() {
            continue;
        }

        let mut child_entries = Vec::new();
        walk(marker, element, &mut child_entries);

        for entry in child_entries {
            if seen.insert(entry.path.clone()) {
                entries.push(entry);
            }
        }
    }
}
