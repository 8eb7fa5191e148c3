//! Shared plumbing for the Alfa ACT client binaries: configuration loading,
//! log initialisation, and atomic file output.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod config;
pub mod logging;
pub mod writer;

pub use config::Config;
pub use logging::init_tracing;
pub use writer::write_atomic;
