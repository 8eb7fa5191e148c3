//! Flat assertion graphs built from (subject, outcome) pairs.

use serde_json::Value;

use crate::assertion::{Assertion, AssertionBuilder, Outcome, ToEarl};
use crate::error::GraphError;
use crate::vocab::{doap, earl, id_ref, literal, node, node_id, push_value, Node};

/// An append-only list of expanded JSON-LD nodes, in construction order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkedDataGraph {
    nodes: Vec<Value>,
}

impl LinkedDataGraph {
    /// An empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a subject (or any standalone) node.
    pub fn push_node(&mut self, node: Node) {
        self.nodes.push(Value::Object(node));
    }

    /// Appends an assertion node.
    pub fn push_assertion(&mut self, assertion: Assertion) {
        self.nodes.push(Value::Object(assertion.into_node()));
    }

    /// The nodes, in the order they were appended.
    #[must_use]
    pub fn nodes(&self) -> &[Value] {
        &self.nodes
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the graph has no node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// The tool that made the assertions, rendered as a `doap:Project`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertor {
    /// Project name, e.g. `Alfa`.
    pub name: String,
    /// Project homepage; also its `@id`.
    pub homepage: String,
    /// License IRI.
    pub license: Option<String>,
    /// Released version.
    pub version: Option<String>,
}

impl ToEarl for Assertor {
    fn to_earl(&self) -> Node {
        let mut project = node(Some(self.homepage.as_str()), &[doap("Project"), earl("Assertor")]);
        push_value(&mut project, &doap("name"), literal(self.name.as_str()));
        push_value(&mut project, &doap("homepage"), id_ref(&self.homepage));
        if let Some(license) = &self.license {
            push_value(&mut project, &doap("license"), id_ref(license));
        }
        if let Some(version) = &self.version {
            let mut release = node(None, &[doap("Version")]);
            push_value(&mut release, &doap("revision"), literal(version.as_str()));
            push_value(&mut project, &doap("release"), Value::Object(release));
        }
        project
    }
}

/// Builds assertion graphs.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    assertor: Option<Assertor>,
}

impl GraphBuilder {
    /// A builder producing one subject node and one assertion per pair.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assertor node ahead of the pairs and links every assertion
    /// to it through `earl:assertedBy`.
    #[must_use]
    pub fn with_assertor(mut self, assertor: Assertor) -> Self {
        self.assertor = Some(assertor);
        self
    }

    /// Builds the graph, preserving input order: for each pair, the subject
    /// node is followed by its assertion.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MissingSubjectId`] if a subject node has no `@id`.
    pub fn build<S, O, I>(&self, outcomes: I) -> Result<LinkedDataGraph, GraphError>
    where
        S: ToEarl,
        O: Outcome,
        I: IntoIterator<Item = (S, O)>,
    {
        let mut graph = LinkedDataGraph::new();

        if let Some(assertor) = &self.assertor {
            graph.push_node(assertor.to_earl());
        }

        for (index, (subject, outcome)) in outcomes.into_iter().enumerate() {
            let subject = subject.to_earl();
            let subject_id = node_id(&subject)
                .ok_or(GraphError::MissingSubjectId { index })?
                .to_owned();
            graph.push_node(subject);

            let mut builder = AssertionBuilder::new(outcome.to_earl())
                .test(outcome.rule().to_earl())
                .subject(subject_id);
            if let Some(assertor) = &self.assertor {
                builder = builder.asserted_by(assertor.homepage.as_str());
            }
            graph.push_assertion(builder.build()?);
        }

        tracing::info!(nodes = graph.len(), "built assertion graph");
        Ok(graph)
    }
}

/// Builds a graph without assertor; see [`GraphBuilder::build`].
///
/// # Errors
///
/// Returns [`GraphError::MissingSubjectId`] if a subject node has no `@id`.
pub fn build<S, O, I>(outcomes: I) -> Result<LinkedDataGraph, GraphError>
where
    S: ToEarl,
    O: Outcome,
    I: IntoIterator<Item = (S, O)>,
{
    GraphBuilder::new().build(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{Mode, OutcomeKind, OutcomeRecord, Rule};
    use crate::page::Page;

    fn outcome(rule: &str) -> OutcomeRecord {
        OutcomeRecord {
            rule: Rule {
                uri: rule.to_owned(),
                requirements: Vec::new(),
            },
            outcome: OutcomeKind::Passed,
            mode: Mode::Automatic,
            target: None,
        }
    }

    struct Anonymous;

    impl ToEarl for Anonymous {
        fn to_earl(&self) -> Node {
            node(None, &[earl("TestSubject")])
        }
    }

    #[test]
    fn subjects_precede_their_assertions_in_input_order() {
        let pairs = vec![
            (Page::new("https://s1.example/"), outcome("https://r/1")),
            (Page::new("https://s2.example/"), outcome("https://r/2")),
        ];
        let graph = build(pairs).expect("graph builds");
        let ids: Vec<Option<&str>> = graph.nodes().iter().map(|n| n["@id"].as_str()).collect();
        assert_eq!(
            ids,
            [Some("https://s1.example/"), None, Some("https://s2.example/"), None]
        );
        assert_eq!(graph.nodes()[1][&earl("subject")][0]["@id"], "https://s1.example/");
        assert_eq!(graph.nodes()[3][&earl("test")][0]["@id"], "https://r/2");
    }

    #[test]
    fn pairs_may_be_borrowed() {
        let page = Page::new("https://example.org/");
        let record = outcome("https://r/1");
        let graph = build([(&page, &record), (&page, &record)]).expect("graph builds");
        assert_eq!(graph.len(), 4);
    }

    #[test]
    fn subject_without_id_is_rejected() {
        let err = build([(Anonymous, outcome("https://r/1"))]).expect_err("no @id");
        assert_eq!(err, GraphError::MissingSubjectId { index: 0 });
    }

    #[test]
    fn assertor_comes_first_and_is_referenced() {
        let assertor = Assertor {
            name: "Alfa".to_owned(),
            homepage: "https://alfa.siteimprove.com/".to_owned(),
            license: Some("https://spdx.org/licenses/MIT".to_owned()),
            version: Some("0.98.0".to_owned()),
        };
        let graph = GraphBuilder::new()
            .with_assertor(assertor)
            .build([(Page::new("https://example.org/"), outcome("https://r/1"))])
            .expect("graph builds");
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.nodes()[0]["@id"], "https://alfa.siteimprove.com/");
        assert_eq!(
            graph.nodes()[2][&earl("assertedBy")][0]["@id"],
            "https://alfa.siteimprove.com/"
        );
    }

    #[test]
    fn empty_input_gives_empty_graph() {
        let graph = build(Vec::<(Page, OutcomeRecord)>::new()).expect("graph builds");
        assert!(graph.is_empty());
    }
}
