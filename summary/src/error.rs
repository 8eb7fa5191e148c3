//! Error type for loading and classifying mapping reports.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a mapping report.
///
/// Coverage problems are never reported here: malformed counters are
/// defaulted to zero and logged instead.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The mapping report could not be read from disk.
    #[error("failed to read mapping report {path}")]
    Io {
        /// Path of the report that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The mapping report is not valid JSON, or violates the data contract
    /// (for example an unknown consistency value).
    #[error("failed to parse mapping report {path}")]
    Json {
        /// Path of the report that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A rule carries a consistency verdict outside `complete`, `partial`, `null`.
    #[error("unknown consistency value {0:?}; expected \"complete\", \"partial\" or null")]
    UnknownConsistency(String),
}
