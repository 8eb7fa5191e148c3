//! `alfa-earl`: Writes an EARL report for a set of rule outcomes.
//!
//! **Inputs:**
//! - `<input>`: JSON array of `{ "subject": page, "outcome": record }` pairs
//!
//! **Outputs:**
//! - `<out>`: JSON-LD report compacted against the ACT Rules EARL context
//!
//! **Usage:**
//! ```
//! alfa-earl --input <path> --out <path> [--config <path>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::path::PathBuf;

use alfa_act_clients::{init_tracing, write_atomic, Config};
use alfa_act_earl::{report, Assertor, GraphBuilder, LocalCompactor, OutcomePair};
use anyhow::{Context, Result};
use clap::Parser;

/// Write an EARL report for rule outcomes.
#[derive(Parser)]
#[command(
    name = "alfa-earl",
    about = "Write an EARL JSON-LD report for Alfa rule outcomes"
)]
struct Args {
    /// Outcome file to report on.
    #[arg(long)]
    input: PathBuf,

    /// Path of the report to write.
    #[arg(long, default_value = "reports/earl.json")]
    out: PathBuf,

    /// Configuration file (default: alfa-act.toml, if present).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let pairs: Vec<OutcomePair> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;
    let count = pairs.len();

    let mut builder = GraphBuilder::new();
    if let Some(assertor) = config.assertor {
        builder = builder.with_assertor(Assertor::from(assertor));
    }
    let compactor = LocalCompactor::act().context("Failed to load the ACT EARL context")?;

    let document = report(&builder, &compactor, pairs.into_iter().map(OutcomePair::into_tuple))
        .context("Failed to build the EARL report")?;
    let json = serde_json::to_string_pretty(&document).context("Failed to serialize the report")?;
    write_atomic(&args.out, json.as_bytes())?;

    tracing::info!(outcomes = count, path = %args.out.display(), "wrote EARL report");
    println!("EARL report written to {}", args.out.display());

    Ok(())
}
