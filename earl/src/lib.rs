//! EARL assertion graphs for Alfa outcomes.
//!
//! Pairs of (subject, outcome) become a flat graph of expanded JSON-LD
//! nodes: each subject node followed by the `earl:Assertion` that links it
//! to its rule and result. The graph is then compacted against the ACT
//! Rules EARL context, which is embedded and never fetched.
//!
//! # Entry Point
//!
//! ```
//! use alfa_act_earl::{report, GraphBuilder, LocalCompactor, Mode, OutcomeKind, OutcomeRecord, Page, Rule};
//!
//! let page = Page::new("https://example.org/");
//! let outcome = OutcomeRecord {
//!     rule: Rule { uri: "https://alfa.siteimprove.com/rules/sia-r1".into(), requirements: vec![] },
//!     outcome: OutcomeKind::Passed,
//!     mode: Mode::Automatic,
//!     target: None,
//! };
//! let compactor = LocalCompactor::act().unwrap();
//! let document = report(&GraphBuilder::new(), &compactor, [(page, outcome)]).unwrap();
//! assert_eq!(document["@graph"][0]["@id"], "https://example.org/");
//! assert_eq!(document["@graph"][1]["result"]["outcome"], "earl:passed");
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod assertion;
pub mod context;
pub mod error;
pub mod graph;
pub mod jsonld;
pub mod outcome;
pub mod page;
pub mod vocab;

use serde_json::Value;

pub use assertion::{Assertion, AssertionBuilder, Outcome, ToEarl};
pub use context::{act_context, Context, ACT_CONTEXT_URL};
pub use error::{EarlError, GraphError, JsonLdError};
pub use graph::{build, Assertor, GraphBuilder, LinkedDataGraph};
pub use jsonld::{expand, Compactor, LocalCompactor};
pub use outcome::{Mode, OutcomeKind, OutcomePair, OutcomeRecord, Rule};
pub use page::Page;

/// Builds the assertion graph for `outcomes` and compacts it.
///
/// # Errors
///
/// Returns [`EarlError::Graph`] if a subject has no `@id` and
/// [`EarlError::JsonLd`] if compaction fails.
pub fn report<S, O, I, C>(builder: &GraphBuilder, compactor: &C, outcomes: I) -> Result<Value, EarlError>
where
    S: ToEarl,
    O: Outcome,
    I: IntoIterator<Item = (S, O)>,
    C: Compactor + ?Sized,
{
    let graph = builder.build(outcomes)?;
    Ok(compactor.compact(&graph)?)
}
