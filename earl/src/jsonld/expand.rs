//! JSON-LD expansion of compacted documents against a [`Context`].
//!
//! The inverse of compaction for the same feature set; used to check that
//! compacted reports lose nothing and to read produced reports back.

use serde_json::{json, Map, Value};

use crate::context::{Context, TermDefinition, TypeMapping};
use crate::error::JsonLdError;
use crate::jsonld::compact::is_absolute_iri;
use crate::vocab::push_value;

/// Expands a compacted document to a list of top-level nodes.
///
/// The document's own `@context` must be embedded; a context given by URL is
/// refused. Terms are resolved against `context`.
///
/// # Errors
///
/// Returns [`JsonLdError::RemoteContext`] for a remote `@context` and
/// [`JsonLdError::InvalidNode`] for top-level values that are not objects.
pub fn expand(document: &Value, context: &Context) -> Result<Vec<Value>, JsonLdError> {
    let top: Vec<&Value> = match document {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => {
            if let Some(Value::String(url)) = map.get("@context") {
                return Err(JsonLdError::RemoteContext(url.clone()));
            }
            match map.get("@graph") {
                Some(Value::Array(graph)) => graph.iter().collect(),
                Some(other) => vec![other],
                None => vec![document],
            }
        }
        other => {
            return Err(JsonLdError::InvalidNode {
                index: 0,
                reason: format!("expected an object or array, found {other}"),
            })
        }
    };

    let expander = Expander { ctx: context };
    let mut nodes = Vec::with_capacity(top.len());
    for (index, value) in top.into_iter().enumerate() {
        let map = value.as_object().ok_or_else(|| JsonLdError::InvalidNode {
            index,
            reason: "not a JSON object".to_owned(),
        })?;
        let node = expander.node(map)?;
        if !node.is_empty() {
            nodes.push(Value::Object(node));
        }
    }
    Ok(nodes)
}

struct Expander<'c> {
    ctx: &'c Context,
}

impl Expander<'_> {
    fn node(&self, node: &Map<String, Value>) -> Result<Map<String, Value>, JsonLdError> {
        let mut out = Map::new();
        let mut reverse = Map::new();

        for (key, value) in node {
            match key.as_str() {
                "@context" | "@graph" => {}
                "@id" => {
                    let id = value.as_str().ok_or_else(|| {
                        JsonLdError::UnresolvableTerm(format!("non-string @id {value}"))
                    })?;
                    out.insert("@id".to_owned(), Value::String(self.ctx.expand_iri(id, false)));
                }
                "@type" => {
                    let types = as_slice(value)
                        .iter()
                        .filter_map(Value::as_str)
                        .map(|t| Value::String(self.ctx.expand_iri(t, true)))
                        .collect();
                    out.insert("@type".to_owned(), Value::Array(types));
                }
                "@reverse" => {
                    let map = value.as_object().ok_or_else(|| {
                        JsonLdError::UnresolvableTerm("@reverse is not an object".to_owned())
                    })?;
                    for (property, values) in map {
                        let def = self.ctx.term(property);
                        let iri = self.ctx.expand_iri(property, true);
                        for v in self.values(values, def)? {
                            push_value(&mut reverse, &iri, v);
                        }
                    }
                }
                keyword if keyword.starts_with('@') => {
                    out.insert(keyword.to_owned(), value.clone());
                }
                term => {
                    let def = self.ctx.term(term);
                    let iri = match def {
                        Some(def) => def.iri.clone(),
                        None => self.ctx.expand_iri(term, true),
                    };
                    if !is_absolute_iri(&iri) {
                        tracing::debug!(term, "dropping key that does not expand to an IRI");
                        continue;
                    }
                    let target = if def.is_some_and(|d| d.reverse) {
                        &mut reverse
                    } else {
                        &mut out
                    };
                    for v in self.values(value, def)? {
                        push_value(target, &iri, v);
                    }
                }
            }
        }

        if !reverse.is_empty() {
            out.insert("@reverse".to_owned(), Value::Object(reverse));
        }
        Ok(out)
    }

    fn values(&self, value: &Value, def: Option<&TermDefinition>) -> Result<Vec<Value>, JsonLdError> {
        let coercion = def.and_then(|d| d.type_mapping.as_ref());
        let mut out = Vec::new();
        for item in as_slice(value) {
            let expanded = match item {
                Value::Null => continue,
                Value::Array(_) => {
                    out.extend(self.values(item, def)?);
                    continue;
                }
                Value::String(s) => match coercion {
                    Some(TypeMapping::Id) => json!({ "@id": self.ctx.expand_iri(s, false) }),
                    Some(TypeMapping::Vocab) => json!({ "@id": self.ctx.expand_iri(s, true) }),
                    Some(TypeMapping::Datatype(dt)) => json!({ "@value": s, "@type": dt }),
                    None => json!({ "@value": s }),
                },
                Value::Number(_) | Value::Bool(_) => match coercion {
                    Some(TypeMapping::Datatype(dt)) => json!({ "@value": item, "@type": dt }),
                    _ => json!({ "@value": item }),
                },
                Value::Object(map) => {
                    if let Some(literal) = map.get("@value") {
                        let mut expanded = Map::new();
                        expanded.insert("@value".to_owned(), literal.clone());
                        if let Some(dt) = map.get("@type").and_then(Value::as_str) {
                            expanded.insert("@type".to_owned(), Value::String(self.ctx.expand_iri(dt, true)));
                        }
                        if let Some(language) = map.get("@language") {
                            expanded.insert("@language".to_owned(), language.clone());
                        }
                        Value::Object(expanded)
                    } else {
                        Value::Object(self.node(map)?)
                    }
                }
            };
            out.push(expanded);
        }
        Ok(out)
    }
}

fn as_slice(value: &Value) -> &[Value] {
    match value {
        Value::Array(items) => items,
        other => std::slice::from_ref(other),
    }
}
