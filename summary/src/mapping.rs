//! Mapping report model: ACT rules, their implementing procedures, and the
//! per-rule coverage counters.
//!
//! The report is produced whole by the external mapping computation and is
//! read-only here. Deserialization is where the data contract is enforced:
//! an unknown consistency value fails the load, while malformed coverage is
//! tolerated and defaulted to zero.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::SummaryError;

/// The mapping report for one implementation flavor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationReport {
    /// Vendor of the implementation (e.g. `"Siteimprove"`).
    #[serde(default)]
    pub vendor: Option<String>,
    /// Implementation name (e.g. `"Alfa (automated)"`).
    #[serde(default)]
    pub name: Option<String>,
    /// Implementation version.
    #[serde(default)]
    pub version: Option<String>,
    /// One entry per ACT rule in the test-case corpus.
    #[serde(default)]
    pub act_rule_mapping: Vec<RuleMappingEntry>,
}

impl ImplementationReport {
    /// Parses a mapping report from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error if the text is not valid JSON or
    /// an entry violates the data contract.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// One ACT rule under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMappingEntry {
    /// Stable ACT rule identifier (e.g. `"23a2a8"`).
    pub rule_id: String,
    /// Human-readable rule name.
    pub rule_name: String,
    /// Implementing procedures, in declared order. Empty means not implemented.
    #[serde(default)]
    pub procedure_names: Vec<String>,
    /// Whether the implementing procedures agree with the rule.
    #[serde(default)]
    pub consistency: Consistency,
    /// Test-case coverage counters, when the mapping computed them.
    #[serde(
        default,
        deserialize_with = "lenient_coverage",
        skip_serializing_if = "Option::is_none"
    )]
    pub coverage: Option<Coverage>,
}

impl RuleMappingEntry {
    /// First implementing procedure, the one an ACT rule maps to one-to-one.
    #[must_use]
    pub fn first_procedure(&self) -> Option<&str> {
        self.procedure_names.first().map(String::as_str)
    }

    /// Returns true if at least one procedure implements this rule.
    #[must_use]
    pub fn is_implemented(&self) -> bool {
        !self.procedure_names.is_empty()
    }

    /// Coverage counters, all-zero when absent.
    #[must_use]
    pub fn coverage_or_default(&self) -> Coverage {
        self.coverage.unwrap_or_default()
    }
}

/// Consistency verdict of a rule mapping.
///
/// Serialized as `"complete"`, `"partial"` or `null`. A missing field is
/// read as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "Option<String>")]
pub enum Consistency {
    /// Every test case is handled consistently.
    Complete,
    /// Some test cases are handled consistently.
    Partial,
    /// The mapping itself is inconsistent.
    #[default]
    Broken,
}

impl Consistency {
    /// Returns the string rendered in summary tables.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Consistency::Complete => "complete",
            Consistency::Partial => "partial",
            Consistency::Broken => "null",
        }
    }
}

impl fmt::Display for Consistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<Option<String>> for Consistency {
    type Error = SummaryError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value.as_deref() {
            None => Ok(Consistency::Broken),
            Some("complete") => Ok(Consistency::Complete),
            Some("partial") => Ok(Consistency::Partial),
            Some(other) => Err(SummaryError::UnknownConsistency(other.to_owned())),
        }
    }
}

impl From<Consistency> for Option<String> {
    fn from(value: Consistency) -> Self {
        match value {
            Consistency::Complete => Some("complete".to_owned()),
            Consistency::Partial => Some("partial".to_owned()),
            Consistency::Broken => None,
        }
    }
}

/// Test-case coverage counters for one rule.
///
/// `covered + untested + cant_tell <= test_case_total` is expected but not
/// enforced; the remainder is the number of incorrect test cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    /// Test cases whose expected and actual outcomes match.
    pub covered: u32,
    /// Test cases not exercised by the implementation.
    pub untested: u32,
    /// Test cases the implementation could not decide.
    pub cant_tell: u32,
    /// Number of test cases for the rule.
    pub test_case_total: u32,
}

impl Coverage {
    /// Test cases whose outcome mismatches, `total - covered - untested - cantTell`.
    ///
    /// Negative when upstream counters are inconsistent; never clamped.
    #[must_use]
    pub fn incorrect(&self) -> i64 {
        i64::from(self.test_case_total)
            - i64::from(self.covered)
            - i64::from(self.untested)
            - i64::from(self.cant_tell)
    }
}

fn lenient_coverage<'de, D>(deserializer: D) -> Result<Option<Coverage>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(Coverage {
            covered: counter(&map, "covered"),
            untested: counter(&map, "untested"),
            cant_tell: counter(&map, "cantTell"),
            test_case_total: counter(&map, "testCaseTotal"),
        }),
        Some(other) => {
            tracing::warn!(coverage = %other, "coverage is not an object; using zero counters");
            None
        }
    })
}

fn counter(map: &serde_json::Map<String, Value>, key: &str) -> u32 {
    match map.get(key) {
        Some(value) => match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => n,
            None => {
                tracing::warn!(counter = key, value = %value, "malformed coverage counter; using 0");
                0
            }
        },
        None => {
            tracing::warn!(counter = key, "missing coverage counter; using 0");
            0
        }
    }
}
