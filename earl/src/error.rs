//! Error types for graph construction and JSON-LD processing.

use thiserror::Error;

/// Errors raised while building the assertion graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// A subject rendered itself without an `@id`, so assertions cannot
    /// reference it.
    #[error("subject #{index} has no @id")]
    MissingSubjectId {
        /// Position of the outcome pair in the input.
        index: usize,
    },

    /// An assertion was built before one of its required edges was set.
    #[error("assertion is missing its {edge} edge")]
    MissingEdge {
        /// Name of the missing edge (`test` or `subject`).
        edge: &'static str,
    },
}

/// Errors raised while processing JSON-LD contexts and documents.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JsonLdError {
    /// The context refers to a remote document. Contexts must be held
    /// locally; nothing is ever fetched.
    #[error("remote context {0} is not loaded; contexts must be embedded")]
    RemoteContext(String),

    /// The context could not be interpreted.
    #[error("invalid context: {0}")]
    InvalidContext(String),

    /// A graph node is not a well-formed node object.
    #[error("invalid node #{index}: {reason}")]
    InvalidNode {
        /// Position of the node in the graph.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// A property key is neither a keyword nor an absolute IRI.
    #[error("property {0:?} does not resolve to an absolute IRI")]
    UnresolvableTerm(String),

    /// A reference points to a node that is not in the graph.
    #[error("{property} references {id}, which is not a node of the graph")]
    DanglingReference {
        /// The referencing property.
        property: String,
        /// The unresolved `@id`.
        id: String,
    },
}

/// Any error of the EARL report pipeline.
#[derive(Debug, Error)]
pub enum EarlError {
    /// Graph construction failed.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Compaction failed.
    #[error(transparent)]
    JsonLd(#[from] JsonLdError),
}
