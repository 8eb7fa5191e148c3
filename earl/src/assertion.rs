//! EARL rendering traits and the assertion builder.

use serde_json::Value;

use crate::error::GraphError;
use crate::vocab::{earl, id_ref, node_id, Node};

/// Anything that renders itself as an expanded JSON-LD node.
pub trait ToEarl {
    /// The EARL node for this value.
    fn to_earl(&self) -> Node;
}

impl<T: ToEarl + ?Sized> ToEarl for &T {
    fn to_earl(&self) -> Node {
        (**self).to_earl()
    }
}

/// The result of asserting one rule against one subject.
///
/// The outcome does not know its subject; the graph builder links the two.
pub trait Outcome: ToEarl {
    /// The rule that was tested.
    type Rule: ToEarl;

    /// The rule this outcome asserts.
    fn rule(&self) -> &Self::Rule;
}

impl<T: Outcome + ?Sized> Outcome for &T {
    type Rule = T::Rule;

    fn rule(&self) -> &Self::Rule {
        (**self).rule()
    }
}

/// An assertion node whose test and subject edges are set.
#[derive(Debug, Clone, PartialEq)]
pub struct Assertion {
    node: Node,
}

impl Assertion {
    /// The expanded node.
    #[must_use]
    pub fn as_node(&self) -> &Node {
        &self.node
    }

    /// Consumes the assertion, returning the expanded node.
    #[must_use]
    pub fn into_node(self) -> Node {
        self.node
    }

    /// The `@id` of the asserted subject.
    #[must_use]
    pub fn subject_id(&self) -> Option<&str> {
        self.node
            .get(&earl("subject"))
            .and_then(Value::as_array)
            .and_then(|values| values.first())
            .and_then(Value::as_object)
            .and_then(node_id)
    }
}

/// Collects the edges of an assertion before producing it.
#[derive(Debug, Clone)]
pub struct AssertionBuilder {
    node: Node,
    test: Option<Node>,
    subject: Option<String>,
    asserted_by: Option<String>,
}

impl AssertionBuilder {
    /// Starts from the node an outcome renders.
    #[must_use]
    pub fn new(node: Node) -> Self {
        Self {
            node,
            test: None,
            subject: None,
            asserted_by: None,
        }
    }

    /// Embeds the tested rule's node as `earl:test`.
    #[must_use]
    pub fn test(mut self, rule: Node) -> Self {
        self.test = Some(rule);
        self
    }

    /// References the subject by `@id` as `earl:subject`.
    #[must_use]
    pub fn subject(mut self, id: impl Into<String>) -> Self {
        self.subject = Some(id.into());
        self
    }

    /// References the assertor by `@id` as `earl:assertedBy`.
    #[must_use]
    pub fn asserted_by(mut self, id: impl Into<String>) -> Self {
        self.asserted_by = Some(id.into());
        self
    }

    /// Produces the assertion.
    ///
    /// Edges already present on the outcome node are replaced.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingEdge`] if the test or subject is unset.
    pub fn build(self) -> Result<Assertion, GraphError> {
        let test = self.test.ok_or(GraphError::MissingEdge { edge: "test" })?;
        let subject = self.subject.ok_or(GraphError::MissingEdge { edge: "subject" })?;

        let mut node = self.node;
        node.insert(earl("test"), Value::Array(vec![Value::Object(test)]));
        node.insert(earl("subject"), Value::Array(vec![id_ref(&subject)]));
        if let Some(assertor) = self.asserted_by {
            node.insert(earl("assertedBy"), Value::Array(vec![id_ref(&assertor)]));
        }
        Ok(Assertion { node })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::node;

    fn outcome_node() -> Node {
        node(None, &[earl("Assertion")])
    }

    #[test]
    fn build_requires_test_and_subject() {
        let err = AssertionBuilder::new(outcome_node())
            .subject("https://example.org/")
            .build()
            .expect_err("test edge missing");
        assert_eq!(err, GraphError::MissingEdge { edge: "test" });

        let err = AssertionBuilder::new(outcome_node())
            .test(node(Some("https://example.org/rule"), &[]))
            .build()
            .expect_err("subject edge missing");
        assert_eq!(err, GraphError::MissingEdge { edge: "subject" });
    }

    #[test]
    fn subject_is_a_reference() {
        let assertion = AssertionBuilder::new(outcome_node())
            .test(node(Some("https://example.org/rule"), &[earl("TestCase")]))
            .subject("https://example.org/")
            .build()
            .expect("complete assertion");
        assert_eq!(assertion.subject_id(), Some("https://example.org/"));
        let subject = &assertion.as_node()[&earl("subject")][0];
        assert_eq!(subject.as_object().map(|o| o.len()), Some(1));
    }

    #[test]
    fn assertor_is_optional() {
        let assertion = AssertionBuilder::new(outcome_node())
            .test(Node::new())
            .subject("s")
            .asserted_by("https://alfa.siteimprove.com/")
            .build()
            .expect("complete assertion");
        assert_eq!(
            assertion.as_node()[&earl("assertedBy")][0]["@id"],
            "https://alfa.siteimprove.com/"
        );
    }
}
