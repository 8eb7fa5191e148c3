//! Where mapping reports come from.
//!
//! Computing the rule-to-procedure mapping from an EARL report and the ACT
//! test-case corpus is done upstream; this crate only consumes its output.

use std::path::PathBuf;

use crate::document::Flavor;
use crate::error::SummaryError;
use crate::mapping::ImplementationReport;

/// A provider of mapping reports, one per flavor.
pub trait MappingSource {
    /// Loads the mapping report of the given flavor.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be obtained or violates the
    /// data contract.
    fn mapping_report(&self, flavor: Flavor) -> Result<ImplementationReport, SummaryError>;
}

/// Reads precomputed mapping reports (`alfa-<flavor>-mapping.json`) from a
/// directory.
#[derive(Debug, Clone)]
pub struct JsonMappingSource {
    dir: PathBuf,
}

impl JsonMappingSource {
    /// Creates a source reading from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl MappingSource for JsonMappingSource {
    fn mapping_report(&self, flavor: Flavor) -> Result<ImplementationReport, SummaryError> {
        let path = self.dir.join(flavor.mapping_file());
        let text = std::fs::read_to_string(&path).map_err(|source| SummaryError::Io {
            path: path.clone(),
            source,
        })?;
        let report = ImplementationReport::from_json(&text)
            .map_err(|source| SummaryError::Json { path: path.clone(), source })?;
        tracing::info!(
            path = %path.display(),
            rules = report.act_rule_mapping.len(),
            "loaded mapping report"
        );
        Ok(report)
    }
}
