//! Namespace IRIs and helpers for writing nodes in expanded JSON-LD form.
//!
//! Every node produced by this crate uses absolute IRIs as keys and arrays
//! as property values; shortening is left to the compactor.

use serde_json::{json, Map, Value};

/// Evaluation and Report Language.
pub const EARL: &str = "http://www.w3.org/ns/earl#";
/// Dublin Core terms.
pub const DCT: &str = "http://purl.org/dc/terms/";
/// schema.org.
pub const SCH: &str = "https://schema.org/";
/// Description of a Project.
pub const DOAP: &str = "http://usefulinc.com/ns/doap#";
/// Pointer methods in RDF.
pub const PTR: &str = "http://www.w3.org/2009/pointers#";

/// A JSON-LD node object.
pub type Node = Map<String, Value>;

/// Full IRI of an EARL term.
#[must_use]
pub fn earl(local: &str) -> String {
    format!("{EARL}{local}")
}

/// Full IRI of a Dublin Core term.
#[must_use]
pub fn dct(local: &str) -> String {
    format!("{DCT}{local}")
}

/// Full IRI of a schema.org term.
#[must_use]
pub fn sch(local: &str) -> String {
    format!("{SCH}{local}")
}

/// Full IRI of a DOAP term.
#[must_use]
pub fn doap(local: &str) -> String {
    format!("{DOAP}{local}")
}

/// Full IRI of a pointer term.
#[must_use]
pub fn ptr(local: &str) -> String {
    format!("{PTR}{local}")
}

/// A node reference, `{"@id": iri}`.
#[must_use]
pub fn id_ref(iri: &str) -> Value {
    json!({ "@id": iri })
}

/// A plain literal, `{"@value": value}`.
#[must_use]
pub fn literal(value: impl Into<Value>) -> Value {
    json!({ "@value": value.into() })
}

/// A typed literal, `{"@value": value, "@type": datatype}`.
#[must_use]
pub fn typed_literal(value: impl Into<Value>, datatype: &str) -> Value {
    json!({ "@value": value.into(), "@type": datatype })
}

/// Starts a node with the given `@id` (if any) and `@type`s.
#[must_use]
pub fn node(id: Option<&str>, types: &[String]) -> Node {
    let mut node = Node::new();
    if let Some(id) = id {
        node.insert("@id".to_owned(), Value::String(id.to_owned()));
    }
    if !types.is_empty() {
        node.insert(
            "@type".to_owned(),
            Value::Array(types.iter().cloned().map(Value::String).collect()),
        );
    }
    node
}

/// Appends `value` to the values of `property`.
pub fn push_value(node: &mut Node, property: &str, value: Value) {
    match node.get_mut(property) {
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let prev = std::mem::replace(existing, Value::Null);
            *existing = Value::Array(vec![prev, value]);
        }
        None => {
            node.insert(property.to_owned(), Value::Array(vec![value]));
        }
    }
}

/// The `@id` of a node, if it has one.
#[must_use]
pub fn node_id(node: &Node) -> Option<&str> {
    node.get("@id").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_value_builds_arrays() {
        let mut n = node(Some("https://example.org/"), &[earl("TestSubject")]);
        push_value(&mut n, &dct("title"), literal("a"));
        push_value(&mut n, &dct("title"), literal("b"));
        assert_eq!(n[&dct("title")].as_array().map(Vec::len), Some(2));
        assert_eq!(node_id(&n), Some("https://example.org/"));
    }

    #[test]
    fn push_value_promotes_scalars() {
        let mut n = Node::new();
        n.insert(earl("mode"), id_ref(&earl("automatic")));
        push_value(&mut n, &earl("mode"), id_ref(&earl("manual")));
        assert_eq!(n[&earl("mode")].as_array().map(Vec::len), Some(2));
    }
}
