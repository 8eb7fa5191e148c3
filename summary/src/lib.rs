//! ACT rule mapping summaries for Alfa.
//!
//! Classifies every ACT rule of a mapping report into one status bucket
//! (broken, not implemented, partial, complete, ignored), orders each bucket,
//! and renders the buckets as markdown tables with test-case coverage.
//!
//! # Entry Point
//!
//! ```
//! use std::collections::BTreeSet;
//! use alfa_act_summary::{classify, ImplementationReport, SummaryDocument, Flavor};
//!
//! let report = ImplementationReport::from_json(r#"{"actRuleMapping": [
//!     {"ruleId": "R1", "ruleName": "Rule one", "procedureNames": [], "consistency": "complete"}
//! ]}"#).unwrap();
//! let buckets = classify(&report.act_rule_mapping, &BTreeSet::new());
//! assert_eq!(buckets.not_implemented.len(), 1);
//!
//! let date = chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//! let markdown = SummaryDocument::new(Flavor::Automated, &buckets).render(date);
//! assert!(markdown.contains("## Rules without implementation (1)"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod classify;
pub mod document;
pub mod error;
pub mod mapping;
pub mod order;
pub mod source;
pub mod table;

pub use classify::{classify, Buckets, StatusBucket};
pub use document::{Flavor, SummaryDocument};
pub use error::SummaryError;
pub use mapping::{Consistency, Coverage, ImplementationReport, RuleMappingEntry};
pub use source::{JsonMappingSource, MappingSource};
