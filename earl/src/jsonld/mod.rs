//! JSON-LD compaction and expansion over embedded contexts.

mod compact;
mod expand;

use std::collections::BTreeSet;

use serde_json::Value;

use crate::context::Context;
use crate::error::JsonLdError;
use crate::graph::LinkedDataGraph;
use crate::vocab::earl;

pub use expand::expand;

/// Turns an assertion graph into a compacted JSON-LD document.
pub trait Compactor {
    /// Compacts `graph`.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonLdError`] if the graph is not well formed or a
    /// property cannot be compacted.
    fn compact(&self, graph: &LinkedDataGraph) -> Result<Value, JsonLdError>;
}

/// A [`Compactor`] that works entirely in memory against one context.
#[derive(Debug, Clone)]
pub struct LocalCompactor {
    context: Context,
}

impl LocalCompactor {
    /// A compactor for `context`.
    #[must_use]
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    /// A compactor for the ACT rules EARL context.
    ///
    /// # Errors
    ///
    /// Returns [`JsonLdError::InvalidContext`] if the embedded context does
    /// not parse.
    pub fn act() -> Result<Self, JsonLdError> {
        Context::act().map(Self::new)
    }

    /// The context compacted against.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }
}

impl Compactor for LocalCompactor {
    fn compact(&self, graph: &LinkedDataGraph) -> Result<Value, JsonLdError> {
        validate(graph.nodes())?;
        let document = compact::Compaction::new(&self.context).document(graph.nodes())?;
        tracing::debug!(nodes = graph.len(), "compacted graph");
        Ok(document)
    }
}

/// Checks that every node is an object and every `earl:subject` reference
/// names a top-level node.
fn validate(nodes: &[Value]) -> Result<(), JsonLdError> {
    let mut ids = BTreeSet::new();
    for (index, node) in nodes.iter().enumerate() {
        let map = node.as_object().ok_or_else(|| JsonLdError::InvalidNode {
            index,
            reason: "not a JSON object".to_owned(),
        })?;
        if let Some(id) = map.get("@id").and_then(Value::as_str) {
            ids.insert(id);
        }
    }

    let subject = earl("subject");
    for (index, node) in nodes.iter().enumerate() {
        let Some(references) = node.get(&subject) else {
            continue;
        };
        let references = match references {
            Value::Array(items) => items.as_slice(),
            other => std::slice::from_ref(other),
        };
        for reference in references {
            let id = reference
                .as_object()
                .filter(|map| compact::is_reference(map))
                .and_then(|map| map.get("@id"))
                .and_then(Value::as_str)
                .ok_or_else(|| JsonLdError::InvalidNode {
                    index,
                    reason: format!("{subject} is not a node reference"),
                })?;
            if !ids.contains(id) {
                return Err(JsonLdError::DanglingReference {
                    property: "earl:subject".to_owned(),
                    id: id.to_owned(),
                });
            }
        }
    }
    Ok(())
}
