use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// The kind of a JSON value, as observed at one path during a traversal.
#[derive(Serialize, Copy, Clone, Ord, Eq, PartialEq, PartialOrd, Debug)]
#[allow(missing_docs)]
pub enum JsonKind {
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "array")]
    Array,
    #[serde(rename = "object")]
    Object,
}

impl From<&Value> for JsonKind {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => JsonKind::Null,
            Value::Bool(_) => JsonKind::Boolean,
            Value::Number(_) => JsonKind::Number,
            Value::String(_) => JsonKind::String,
            Value::Array(_) => JsonKind::Array,
            Value::Object(_) => JsonKind::Object,
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JsonKind::Null => "null",
            JsonKind::Boolean => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        };
        f.write_str(name)
    }
}

/// One JSON property observed during a document traversal.
///
/// `path` is the fully-qualified field path: object keys joined by `.`, with
/// every array traversal contributing the literal `[array]` marker instead of
/// a numeric index.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct PathEntry {
    /// Fully-qualified field path, e.g. `results[array].id`.
    pub path: String,
    /// The last path segment (the property name itself).
    pub name: String,
    /// The kind of the value observed at this path.
    pub kind: JsonKind,
    /// The value observed at this path.
    pub value: Value,
}

/// Result of comparing two JSON snapshots by their path sets.
///
/// Keys iterate in sorted order, so report output is reproducible.
#[derive(Serialize, Clone, PartialEq, Debug, Default)]
pub struct SnapshotDiff {
    /// Paths present only in the current snapshot.
    pub added: BTreeMap<String, PathEntry>,
    /// Paths present only in the previous snapshot.
    pub removed: BTreeMap<String, PathEntry>,
    /// Paths present in both snapshots. Informational only.
    pub unchanged: BTreeMap<String, PathEntry>,
}

impl SnapshotDiff {
    /// Whether the two snapshots have identical path sets.
    pub fn is_same(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// The kind of a field-level contract violation.
#[derive(Serialize, Copy, Clone, Ord, Eq, PartialEq, PartialOrd, Debug)]
pub enum FieldErrorKind {
    /// The contract declares a field the document no longer contains.
    MissingField,
    /// The document contains a property the contract does not declare.
    UnknownField,
}

/// One field-level contract violation.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct FieldError {
    /// Normalized error key: `<containing object path>/<field>`, with array
    /// indices collapsed to `[array]`. Bare field name at the document root.
    pub key: String,
    /// The offending field's name.
    pub field: String,
    /// Whether the field is missing from the document or unknown to the contract.
    pub kind: FieldErrorKind,
    /// Human-readable description of the violation.
    pub message: String,
}

/// Result of validating a JSON document against a declared [`Shape`].
///
/// [`Shape`]: crate::Shape
#[derive(Serialize, Clone, PartialEq, Debug, Default)]
pub struct ContractDiff {
    /// Declared fields absent from the document.
    pub missing: Vec<FieldError>,
    /// Document properties not declared by the contract.
    pub unknown: Vec<FieldError>,
}

impl ContractDiff {
    /// Whether the document matched the contract exactly.
    pub fn is_same(&self) -> bool {
        self.missing.is_empty() && self.unknown.is_empty()
    }
}

/// The errors that can happen in this crate's diff operations.
///
/// All of these are fatal for the document being diffed, as opposed to
/// field-level violations, which are accumulated in [`ContractDiff`].
#[derive(Error, Debug)]
pub enum Error {
    /// The document is not well-formed JSON.
    #[error("failed to parse document")]
    Parse(#[from] serde_json::Error),
    /// The document root has a different kind than the contract expects.
    #[error("expected an object or array at the document root, got {found}")]
    Root {
        /// The kind actually found at the root.
        found: JsonKind,
    },
}
