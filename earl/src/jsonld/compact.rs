//! JSON-LD compaction of expanded nodes against a [`Context`].
//!
//! Covers what EARL reports need: term selection with `@id` and datatype
//! coercion, `@vocab`-relative IRIs, compact IRIs, reverse terms, and
//! collapsing single-element arrays.

use std::collections::BTreeMap;

use serde_json::{json, Map, Value};

use crate::context::{Context, TermDefinition, TypeMapping};
use crate::error::JsonLdError;

/// What a value looks like, for term selection.
#[derive(Debug, Clone, Copy)]
enum ValueKind<'a> {
    /// `{"@id": ...}` and nothing else.
    Reference,
    /// `{"@value": ..., "@type": datatype}`.
    Typed(&'a str),
    /// Plain literals and embedded nodes.
    Other,
}

impl<'a> ValueKind<'a> {
    fn of(value: &'a Value) -> Self {
        match value.as_object() {
            Some(map) if is_reference(map) => ValueKind::Reference,
            Some(map) if map.contains_key("@value") => match map.get("@type").and_then(Value::as_str) {
                Some(datatype) => ValueKind::Typed(datatype),
                None => ValueKind::Other,
            },
            _ => ValueKind::Other,
        }
    }
}

pub(crate) fn is_reference(map: &Map<String, Value>) -> bool {
    map.len() == 1 && map.get("@id").is_some_and(Value::is_string)
}

/// Returns true for keys that may appear in expanded node objects.
pub(crate) fn is_absolute_iri(key: &str) -> bool {
    key.split_once(':').is_some_and(|(scheme, _)| !scheme.is_empty())
}

pub(crate) struct Compaction<'c> {
    ctx: &'c Context,
}

impl<'c> Compaction<'c> {
    pub(crate) fn new(ctx: &'c Context) -> Self {
        Self { ctx }
    }

    /// Compacts a list of top-level nodes into one document.
    pub(crate) fn document(&self, nodes: &[Value]) -> Result<Value, JsonLdError> {
        let mut compacted = Vec::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            let map = node.as_object().ok_or_else(|| JsonLdError::InvalidNode {
                index,
                reason: "not a JSON object".to_owned(),
            })?;
            compacted.push(self.node(map)?);
        }

        let mut document = Map::new();
        document.insert("@context".to_owned(), self.ctx.source().clone());
        match compacted.len() {
            0 => {}
            1 => {
                for (key, value) in compacted.remove(0) {
                    document.insert(key, value);
                }
            }
            _ => {
                document.insert(
                    "@graph".to_owned(),
                    Value::Array(compacted.into_iter().map(Value::Object).collect()),
                );
            }
        }
        Ok(Value::Object(document))
    }

    fn node(&self, node: &Map<String, Value>) -> Result<Map<String, Value>, JsonLdError> {
        let mut out = Map::new();
        let mut grouped: BTreeMap<String, Vec<Value>> = BTreeMap::new();
        let mut reverse_fallback = Map::new();

        for (key, value) in node {
            match key.as_str() {
                "@context" => {
                    tracing::debug!("ignoring embedded @context on an expanded node");
                }
                "@id" => {
                    let id = value.as_str().ok_or_else(|| {
                        JsonLdError::UnresolvableTerm(format!("non-string @id {value}"))
                    })?;
                    out.insert("@id".to_owned(), Value::String(self.iri(id, false)));
                }
                "@type" => {
                    let types: Vec<Value> = values(value)
                        .iter()
                        .filter_map(|t| t.as_str())
                        .map(|t| Value::String(self.iri(t, true)))
                        .collect();
                    out.insert("@type".to_owned(), collapse(types));
                }
                "@reverse" => {
                    let reverse = value.as_object().ok_or_else(|| {
                        JsonLdError::UnresolvableTerm("@reverse is not an object".to_owned())
                    })?;
                    for (property, values_) in reverse {
                        for value in values(values_) {
                            match self.select_term(property, ValueKind::of(value), true) {
                                Some((term, def)) => grouped
                                    .entry(term.to_owned())
                                    .or_default()
                                    .push(self.value(value, Some(def))?),
                                None => {
                                    let compacted = self.value(value, None)?;
                                    let key = self.iri(property, true);
                                    crate::vocab::push_value(&mut reverse_fallback, &key, compacted);
                                }
                            }
                        }
                    }
                }
                keyword if keyword.starts_with('@') => {
                    out.insert(keyword.to_owned(), value.clone());
                }
                property => {
                    if !is_absolute_iri(property) {
                        return Err(JsonLdError::UnresolvableTerm(property.to_owned()));
                    }
                    for value in values(value) {
                        let compacted = match self.select_term(property, ValueKind::of(value), false) {
                            Some((term, def)) => (term.to_owned(), self.value(value, Some(def))?),
                            None => (self.fallback_iri(property), self.value(value, None)?),
                        };
                        grouped.entry(compacted.0).or_default().push(compacted.1);
                    }
                }
            }
        }

        for (term, values) in grouped {
            out.insert(term, collapse(values));
        }
        if !reverse_fallback.is_empty() {
            let reverse = reverse_fallback
                .into_iter()
                .map(|(k, v)| match v {
                    Value::Array(items) => (k, collapse(items)),
                    other => (k, other),
                })
                .collect();
            out.insert("@reverse".to_owned(), Value::Object(reverse));
        }
        Ok(out)
    }

    fn value(&self, value: &Value, def: Option<&TermDefinition>) -> Result<Value, JsonLdError> {
        let Some(map) = value.as_object() else {
            return Ok(value.clone());
        };
        let coercion = def.and_then(|d| d.type_mapping.as_ref());

        if let Some(literal) = map.get("@value") {
            let datatype = map.get("@type").and_then(Value::as_str);
            return Ok(match (datatype, coercion) {
                (Some(dt), Some(TypeMapping::Datatype(mapped))) if mapped == dt => literal.clone(),
                (None, None) if map.len() == 1 => literal.clone(),
                (Some(dt), _) => json!({ "@value": literal, "@type": self.iri(dt, true) }),
                (None, _) => value.clone(),
            });
        }

        if is_reference(map) {
            let id = map["@id"].as_str().unwrap_or_default();
            return Ok(match coercion {
                Some(TypeMapping::Id) => Value::String(self.iri(id, false)),
                Some(TypeMapping::Vocab) => Value::String(self.iri(id, true)),
                _ => json!({ "@id": self.iri(id, false) }),
            });
        }

        Ok(Value::Object(self.node(map)?))
    }

    /// Picks the term for `iri` holding a value of the given kind: a term
    /// whose coercion matches first, then an uncoerced one. Among equals,
    /// the shortest term wins, then the lexicographically least.
    fn select_term(
        &self,
        iri: &str,
        kind: ValueKind<'_>,
        reverse: bool,
    ) -> Option<(&'c str, &'c TermDefinition)> {
        let candidates = || {
            self.ctx
                .terms()
                .filter(move |(_, def)| def.reverse == reverse && def.iri == iri)
        };
        let best = |matches: &dyn Fn(&TermDefinition) -> bool| {
            candidates()
                .filter(|(_, def)| matches(def))
                .min_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
        };

        let preferred = match kind {
            ValueKind::Reference => best(&|d| {
                matches!(d.type_mapping, Some(TypeMapping::Id | TypeMapping::Vocab))
            }),
            ValueKind::Typed(datatype) => best(&|d| {
                matches!(&d.type_mapping, Some(TypeMapping::Datatype(mapped)) if mapped == datatype)
            }),
            ValueKind::Other => None,
        };
        preferred.or_else(|| best(&|d| d.type_mapping.is_none()))
    }

    /// Compacts an IRI. In vocabulary position (`vocab`), terms and `@vocab`
    /// apply; otherwise only compact IRIs do.
    fn iri(&self, iri: &str, vocab: bool) -> String {
        if iri.starts_with('@') {
            return iri.to_owned();
        }
        if vocab {
            if let Some((term, _)) = self.select_term(iri, ValueKind::Other, false) {
                return term.to_owned();
            }
            return self.fallback_iri(iri);
        }
        self.compact_iri(iri).unwrap_or_else(|| iri.to_owned())
    }

    /// The `@vocab`-relative form, else a compact IRI, else the IRI itself.
    fn fallback_iri(&self, iri: &str) -> String {
        if let Some(suffix) = self.ctx.vocab().and_then(|v| iri.strip_prefix(v)) {
            if !suffix.is_empty() && self.ctx.term(suffix).is_none() {
                return suffix.to_owned();
            }
        }
        self.compact_iri(iri).unwrap_or_else(|| iri.to_owned())
    }

    fn compact_iri(&self, iri: &str) -> Option<String> {
        self.ctx
            .terms()
            .filter(|(_, def)| def.prefix && !def.reverse)
            .filter_map(|(term, def)| {
                let suffix = iri.strip_prefix(def.iri.as_str())?;
                if suffix.is_empty() {
                    return None;
                }
                let candidate = format!("{term}:{suffix}");
                self.ctx.term(&candidate).is_none().then_some(candidate)
            })
            .min_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)))
    }
}

/// Values of a property, whether or not they are wrapped in an array.
fn values(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        other => std::slice::from_ref(other),
    }
}

fn collapse(mut values: Vec<Value>) -> Value {
    if values.len() == 1 {
        values.remove(0)
    } else {
        Value::Array(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::{dct, earl, id_ref, literal, ptr, sch, typed_literal};

    fn compact_one(node: Value) -> Value {
        let ctx = Context::act().expect("embedded context parses");
        let mut doc = Compaction::new(&ctx).document(&[node]).expect("compacts");
        if let Some(map) = doc.as_object_mut() {
            map.remove("@context");
        }
        doc
    }

    #[test]
    fn types_use_terms_then_vocab() {
        let doc = compact_one(json!({
            "@id": "https://example.org/",
            "@type": [earl("TestSubject"), sch("WebPage")]
        }));
        assert_eq!(doc["@type"], json!(["TestSubject", "WebPage"]));
    }

    #[test]
    fn shortest_term_wins_among_aliases() {
        let doc = compact_one(json!({
            "@id": "https://example.org/",
            (dct("source")): [literal("https://example.org/")]
        }));
        assert_eq!(doc["url"], "https://example.org/");
    }

    #[test]
    fn id_coerced_terms_take_references_as_strings() {
        let doc = compact_one(json!({
            "@id": "_:a",
            (earl("mode")): [id_ref(&earl("automatic"))],
            (dct("isPartOf")): [id_ref("https://www.w3.org/TR/WCAG21/#non-text-content")]
        }));
        assert_eq!(doc["mode"], "earl:automatic");
        assert_eq!(doc["isPartOf"], "WCAG21:non-text-content");
    }

    #[test]
    fn uncoerced_references_stay_objects() {
        let doc = compact_one(json!({
            "@id": "_:a",
            (earl("subject")): [id_ref("https://example.org/")]
        }));
        assert_eq!(doc["subject"], json!({ "@id": "https://example.org/" }));
    }

    #[test]
    fn datatype_coercion_unwraps_matching_literals() {
        let doc = compact_one(json!({
            "@id": "_:r",
            (earl("pointer")): [typed_literal("main > img", &ptr("CSSSelectorPointer"))]
        }));
        assert_eq!(doc["pointer"], "main > img");
    }

    #[test]
    fn coerced_term_name_is_not_reused_for_literals() {
        let doc = compact_one(json!({
            "@id": "_:r",
            (earl("outcome")): [literal("passed")]
        }));
        assert_eq!(doc["earl:outcome"], "passed");
        assert!(doc.get("outcome").is_none());
    }

    #[test]
    fn reverse_properties_use_reverse_terms() {
        let doc = compact_one(json!({
            "@id": "https://example.org/",
            "@reverse": { (earl("subject")): [{ "@id": "_:assertion" }] }
        }));
        assert_eq!(doc["assertions"], json!({ "@id": "_:assertion" }));
    }

    #[test]
    fn unknown_iris_stay_absolute() {
        let doc = compact_one(json!({
            "@id": "https://example.org/",
            "https://example.org/vocab#p": [literal(1)]
        }));
        assert_eq!(doc["https://example.org/vocab#p"], 1);
    }

    #[test]
    fn relative_property_is_unresolvable() {
        let ctx = Context::act().expect("embedded context parses");
        let err = Compaction::new(&ctx)
            .document(&[json!({ "title": [literal("x")] })])
            .expect_err("relative keys are rejected");
        assert_eq!(err, JsonLdError::UnresolvableTerm("title".to_owned()));
    }

    #[test]
    fn several_nodes_go_under_graph() {
        let ctx = Context::act().expect("embedded context parses");
        let doc = Compaction::new(&ctx)
            .document(&[json!({ "@id": "https://a/" }), json!({ "@id": "https://b/" })])
            .expect("compacts");
        assert_eq!(doc["@graph"].as_array().map(Vec::len), Some(2));
        assert!(doc["@context"].is_object());
    }
}
