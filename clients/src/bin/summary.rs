//! `alfa-summary`: Renders ACT rule mapping summaries for each Alfa flavor.
//!
//! **Inputs:**
//! - `<reports>/alfa-{flavor}-mapping.json`: ACT rule mapping report
//!
//! **Outputs:**
//! - `<reports>/summary-{flavor}.md`: Markdown summary, one per flavor
//!
//! **Usage:**
//! ```
//! alfa-summary [--config <path>] [--reports <path>] [--flavor automated|assisted]...
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use alfa_act_clients::{init_tracing, write_atomic, Config};
use alfa_act_summary::{classify, Flavor, JsonMappingSource, MappingSource, SummaryDocument};
use anyhow::{Context, Result};
use clap::Parser;

/// Render ACT rule mapping summaries.
#[derive(Parser)]
#[command(
    name = "alfa-summary",
    about = "Render ACT rule mapping summaries for Alfa"
)]
struct Args {
    /// Configuration file (default: alfa-act.toml, if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the mapping reports; overrides the configuration.
    #[arg(long)]
    reports: Option<PathBuf>,

    /// Flavor to summarise; repeat for several (default: all).
    #[arg(long = "flavor")]
    flavors: Vec<Flavor>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let reports = args.reports.unwrap_or(config.reports_dir);
    let flavors = if args.flavors.is_empty() {
        Flavor::ALL.to_vec()
    } else {
        args.flavors
    };

    let source = JsonMappingSource::new(&reports);
    let today = chrono::Local::now().date_naive();

    for flavor in flavors {
        let report = source
            .mapping_report(flavor)
            .with_context(|| format!("Failed to load the {flavor} mapping report"))?;
        let buckets = classify(&report.act_rule_mapping, &config.ignored_rules);
        let markdown = SummaryDocument::new(flavor, &buckets).render(today);

        let out = reports.join(flavor.summary_file());
        write_atomic(&out, markdown.as_bytes())?;
        tracing::info!(%flavor, rules = buckets.len(), path = %out.display(), "wrote summary");
        println!("  {flavor}: {}", out.display());
    }

    Ok(())
}
