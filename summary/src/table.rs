//! Markdown table rendering for one status bucket.

use std::fmt::Write as _;

use crate::mapping::RuleMappingEntry;

const BASE_COLUMNS: &[&str] = &["Id", "Name", "Alfa", "Consistency"];
const COVERAGE_COLUMNS: &[&str] = &["Total", "Covered", "Untested", "CantTell", "Incorrect"];

/// Renders a bucket as a heading followed by a markdown table.
///
/// Rows are emitted in the order given; callers sort buckets beforehand.
/// Missing coverage renders as zeros, and a negative incorrect count is
/// printed as-is so inconsistent upstream data stays visible.
#[must_use]
pub fn render(bucket: &[RuleMappingEntry], heading: &str, with_coverage: bool) -> String {
    let mut columns: Vec<&str> = BASE_COLUMNS.to_vec();
    if with_coverage {
        columns.extend_from_slice(COVERAGE_COLUMNS);
    }

    let mut out = String::new();
    let _ = write!(out, "{heading} ({})\n\n", bucket.len());
    out.push_str(&row(columns.iter().map(|c| (*c).to_owned())));
    out.push_str(&row(columns.iter().map(|_| "---".to_owned())));

    for rule in bucket {
        let mut cells = vec![
            escape_cell(&rule.rule_id),
            escape_cell(&rule.rule_name),
            escape_cell(&rule.procedure_names.join(", ")),
            rule.consistency.to_string(),
        ];
        if with_coverage {
            let coverage = rule.coverage_or_default();
            cells.extend([
                coverage.test_case_total.to_string(),
                coverage.covered.to_string(),
                coverage.untested.to_string(),
                coverage.cant_tell.to_string(),
                coverage.incorrect().to_string(),
            ]);
        }
        out.push_str(&row(cells.into_iter()));
    }

    out.push('\n');
    out
}

fn row(cells: impl Iterator<Item = String>) -> String {
    let mut line = String::from("|");
    for cell in cells {
        line.push(' ');
        line.push_str(&cell);
        line.push_str(" |");
    }
    line.push('\n');
    line
}

/// Escapes characters that would break the table structure.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
