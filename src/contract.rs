//! Validation of a live JSON document against a declared contract.
//!
//! A [`Shape`] is the statically-known field set of one logical resource type.
//! Every declared field is implicitly required, and every document property
//! must be declared; both kinds of violation are accumulated across the whole
//! document rather than failing fast. Only a malformed document or a root-level
//! kind mismatch aborts the operation.

use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value};

use crate::normalize::normalize_key;
use crate::{ContractDiff, Error, FieldError, FieldErrorKind, JsonKind};

/// The declared field set of one resource type.
///
/// Built with the chained constructors:
///
/// ```
/// use schema_drift::Shape;
///
/// let movie = Shape::new()
///     .field("id")
///     .field("title")
///     .array("genres", Shape::new().field("id").field("name"));
/// ```
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Shape {
    fields: BTreeMap<String, FieldShape>,
}

/// What the contract declares about one field's structure.
///
/// Value kinds are deliberately not modeled beyond this: the differ validates
/// field presence, not types.
#[derive(Clone, PartialEq, Debug)]
enum FieldShape {
    /// A terminal field; nothing below it is declared.
    Scalar,
    /// A nested object with its own declared field set.
    Object(Shape),
    /// An array of objects, each validated against the element shape.
    Array(Shape),
}

impl Shape {
    /// An empty shape declaring no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a terminal field.
    pub fn field(mut self, name: &str) -> Self {
        self.fields.insert(name.to_owned(), FieldShape::Scalar);
        self
    }

    /// Declare a nested object field.
    pub fn object(mut self, name: &str, shape: Shape) -> Self {
        self.fields.insert(name.to_owned(), FieldShape::Object(shape));
        self
    }

    /// Declare an array-of-objects field whose elements follow `element`.
    pub fn array(mut self, name: &str, element: Shape) -> Self {
        self.fields.insert(name.to_owned(), FieldShape::Array(element));
        self
    }

    /// Whether the shape declares a field with this name.
    pub fn declares(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

/// Validate a JSON document against a declared shape.
///
/// Field-level violations are collected into the returned [`ContractDiff`];
/// the `Err` cases are reserved for conditions under which no field can be
/// classified at all: malformed JSON, or a scalar where the contract expects
/// the document root to be an object (or array of objects).
pub fn diff_contract(text: &str, shape: &Shape) -> Result<ContractDiff, Error> {
    let document: Value = serde_json::from_str(text)?;

    let mut walker = ShapeWalker::default();
    match &document {
        Value::Object(map) => walker.check_object("", map, shape),
        Value::Array(elements) => walker.check_elements("", elements, shape),
        other => {
            return Err(Error::Root {
                found: JsonKind::from(other),
            })
        }
    }

    Ok(walker.diff)
}

/// Accumulates field errors over one document traversal, retaining only the
/// first error observed per normalized key. Later duplicates, typically the
/// same violation repeating across array elements, are dropped.
#[derive(Default)]
struct ShapeWalker {
    diff: ContractDiff,
    seen: HashSet<String>,
}

impl ShapeWalker {
    fn check_object(&mut self, path: &str, map: &Map<String, Value>, shape: &Shape) {
        for (name, field_shape) in &shape.fields {
            match map.get(name) {
                None => self.record(
                    path,
                    name,
                    FieldErrorKind::MissingField,
                    format!("required field '{name}' not found at '{path}'"),
                ),
                Some(value) => match field_shape {
                    FieldShape::Scalar => {}
                    // Presence only: a declared container whose value has the
                    // wrong kind is not descended into.
                    FieldShape::Object(nested) => {
                        if let Value::Object(child) = value {
                            self.check_object(&child_path(path, name), child, nested);
                        }
                    }
                    FieldShape::Array(element) => {
                        if let Value::Array(elements) = value {
                            self.check_elements(&child_path(path, name), elements, element);
                        }
                    }
                },
            }
        }

        for name in map.keys() {
            if !shape.declares(name) {
                self.record(
                    path,
                    name,
                    FieldErrorKind::UnknownField,
                    format!("undeclared field '{name}' at '{path}'"),
                );
            }
        }
    }

    fn check_elements(&mut self, path: &str, elements: &[Value], shape: &Shape) {
        for (index, element) in elements.iter().enumerate() {
            if let Value::Object(map) = element {
                self.check_object(&format!("{path}[{index}]"), map, shape);
            }
        }
    }

    fn record(&mut self, container: &str, field: &str, kind: FieldErrorKind, message: String) {
        let raw = if container.is_empty() {
            field.to_owned()
        } else {
            format!("{container}/{field}")
        };
        let key = normalize_key(&raw);

        if !self.seen.insert(key.clone()) {
            return;
        }

        let error = FieldError {
            key,
            field: field.to_owned(),
            kind,
            message,
        };
        match kind {
            FieldErrorKind::MissingField => self.diff.missing.push(error),
            FieldErrorKind::UnknownField => self.diff.unknown.push(error),
        }
    }
}

fn child_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie() -> Shape {
        Shape::new().field("id").field("title")
    }

    #[test]
    fn undeclared_property_is_a_new_field() {
        let diff = diff_contract(r#"{"id": 1, "title": "x", "extra": true}"#, &movie()).unwrap();

        assert!(diff.missing.is_empty());
        assert_eq!(diff.unknown.len(), 1);
        assert_eq!(diff.unknown[0].field, "extra");
        assert_eq!(diff.unknown[0].key, "extra");
    }

    #[test]
    fn absent_declared_field_is_missing() {
        let diff = diff_contract(r#"{"id": 1}"#, &movie()).unwrap();

        assert!(diff.unknown.is_empty());
        assert_eq!(diff.missing.len(), 1);
        assert_eq!(diff.missing[0].field, "title");
        assert_eq!(diff.missing[0].key, "title");
    }

    #[test]
    fn exact_match_has_no_violations() {
        let diff = diff_contract(r#"{"id": 1, "title": "x"}"#, &movie()).unwrap();
        assert!(diff.is_same());
    }

    #[test]
    fn violations_accumulate_across_the_document() {
        let shape = Shape::new()
            .field("page")
            .array("results", Shape::new().field("id").field("name"));
        let text = r#"{"results": [{"id": 1, "poster": "p.png"}], "total": 2}"#;

        let diff = diff_contract(text, &shape).unwrap();

        let missing: Vec<_> = diff.missing.iter().map(|e| e.key.as_str()).collect();
        let unknown: Vec<_> = diff.unknown.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(missing, vec!["page", "results[array]/name"]);
        assert_eq!(unknown, vec!["results[array]/poster", "total"]);
    }

    #[test]
    fn duplicate_violations_collapse_to_first_per_normalized_key() {
        let shape = Shape::new().array("results", Shape::new().field("name"));
        let text = r#"{"results": [{"id": 0}, {"id": 1}]}"#;

        let diff = diff_contract(text, &shape).unwrap();

        assert_eq!(diff.missing.len(), 1);
        assert_eq!(diff.missing[0].key, "results[array]/name");
        // The retained message is the one from element 0.
        assert!(diff.missing[0].message.contains("results[0]"));
        assert_eq!(diff.unknown.len(), 1);
        assert_eq!(diff.unknown[0].key, "results[array]/id");
    }

    #[test]
    fn nested_objects_use_dotted_container_paths() {
        let shape = Shape::new().object(
            "credits",
            Shape::new().array("cast", Shape::new().field("name")),
        );
        let text = r#"{"credits": {"cast": [{"order": 3}]}}"#;

        let diff = diff_contract(text, &shape).unwrap();

        assert_eq!(diff.missing[0].key, "credits.cast[array]/name");
        assert_eq!(diff.unknown[0].key, "credits.cast[array]/order");
    }

    #[test]
    fn wrong_kind_container_is_not_descended() {
        let shape = Shape::new().object("credits", Shape::new().field("cast"));
        let diff = diff_contract(r#"{"credits": 7}"#, &shape).unwrap();
        assert!(diff.is_same());
    }

    #[test]
    fn root_array_elements_are_validated() {
        let shape = Shape::new().field("id");
        let diff = diff_contract(r#"[{"id": 1}, {"name": "x"}]"#, &shape).unwrap();

        assert_eq!(diff.missing[0].key, "[array]/id");
        assert_eq!(diff.unknown[0].key, "[array]/name");
    }

    #[test]
    fn malformed_document_is_fatal() {
        assert!(matches!(
            diff_contract("{not json", &movie()),
            Err(Error::Parse(_))
        ));
    }

    #[test]
    fn scalar_root_is_fatal() {
        assert!(matches!(
            diff_contract("42", &movie()),
            Err(Error::Root {
                found: JsonKind::Number
            })
        ));
    }
}
