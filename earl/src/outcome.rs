//! Rule outcomes as EARL assertions.
//!
//! Outcome records are the serialized form of what the rule engine reports:
//! one record per rule and subject, tagged with the EARL outcome value.

use serde::{Deserialize, Serialize};

use crate::assertion::{Outcome, ToEarl};
use crate::page::Page;
use crate::vocab::{dct, earl, id_ref, node, ptr, push_value, typed_literal, Node};

/// A rule, identified by its URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Rule URI, e.g. `https://alfa.siteimprove.com/rules/sia-r1`.
    pub uri: String,
    /// IRIs of the success criteria the rule is part of.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
}

impl ToEarl for Rule {
    fn to_earl(&self) -> Node {
        let mut rule = node(Some(self.uri.as_str()), &[earl("TestCriterion"), earl("TestCase")]);
        for requirement in &self.requirements {
            push_value(&mut rule, &dct("isPartOf"), id_ref(requirement));
        }
        rule
    }
}

/// EARL outcome values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeKind {
    /// The subject satisfies the rule.
    Passed,
    /// The subject violates the rule.
    Failed,
    /// The rule does not apply to the subject.
    Inapplicable,
    /// The rule could not decide.
    CantTell,
}

impl OutcomeKind {
    /// Local name in the EARL vocabulary.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeKind::Passed => "passed",
            OutcomeKind::Failed => "failed",
            OutcomeKind::Inapplicable => "inapplicable",
            OutcomeKind::CantTell => "cantTell",
        }
    }
}

/// How the outcome was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    /// Without human input.
    #[default]
    Automatic,
    /// With answers to assisted questions.
    SemiAuto,
    /// By a human.
    Manual,
}

impl Mode {
    /// Local name in the EARL vocabulary.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Automatic => "automatic",
            Mode::SemiAuto => "semiAuto",
            Mode::Manual => "manual",
        }
    }
}

/// One rule's outcome on one target of a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// The tested rule.
    pub rule: Rule,
    /// The outcome value.
    pub outcome: OutcomeKind,
    /// How the outcome was reached.
    #[serde(default)]
    pub mode: Mode,
    /// CSS selector of the test target, absent for inapplicable outcomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl ToEarl for OutcomeRecord {
    fn to_earl(&self) -> Node {
        let mut result = node(None, &[earl("TestResult")]);
        push_value(&mut result, &earl("outcome"), id_ref(&earl(self.outcome.as_str())));
        if let Some(target) = &self.target {
            push_value(
                &mut result,
                &earl("pointer"),
                typed_literal(target.as_str(), &ptr("CSSSelectorPointer")),
            );
        }

        let mut assertion = node(None, &[earl("Assertion")]);
        push_value(&mut assertion, &earl("mode"), id_ref(&earl(self.mode.as_str())));
        push_value(&mut assertion, &earl("result"), serde_json::Value::Object(result));
        assertion
    }
}

impl Outcome for OutcomeRecord {
    type Rule = Rule;

    fn rule(&self) -> &Rule {
        &self.rule
    }
}

/// A subject paired with one of its outcomes, as read from an outcome file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomePair {
    /// The evaluated page.
    pub subject: Page,
    /// The outcome of one rule on that page.
    pub outcome: OutcomeRecord,
}

impl OutcomePair {
    /// Splits the pair for the graph builder.
    #[must_use]
    pub fn into_tuple(self) -> (Page, OutcomeRecord) {
        (self.subject, self.outcome)
    }
}
