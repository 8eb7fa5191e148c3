//! The per-flavor summary document: banner, generation date, and the five
//! bucket tables in a fixed order.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::classify::Buckets;
use crate::table;

/// Which Alfa rule set produced the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavor {
    /// Fully automated rules only.
    Automated,
    /// Automated rules plus those answered through assisted questions.
    Assisted,
}

impl Flavor {
    /// Both flavors, in the order summaries are produced.
    pub const ALL: [Flavor; 2] = [Flavor::Automated, Flavor::Assisted];

    /// Lowercase name used in titles and file names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Flavor::Automated => "automated",
            Flavor::Assisted => "assisted",
        }
    }

    /// Implementation name as reported to the mapping computation.
    #[must_use]
    pub fn implementation_name(self) -> String {
        format!("Alfa ({})", self.as_str())
    }

    /// File name of the mapping report for this flavor.
    #[must_use]
    pub fn mapping_file(self) -> String {
        format!("alfa-{}-mapping.json", self.as_str())
    }

    /// File name of the rendered summary for this flavor.
    #[must_use]
    pub fn summary_file(self) -> String {
        format!("summary-{}.md", self.as_str())
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "automated" => Ok(Flavor::Automated),
            "assisted" => Ok(Flavor::Assisted),
            other => Err(format!("unknown flavor {other:?}; expected automated or assisted")),
        }
    }
}

/// Name of the binary that writes summaries, quoted in the banner.
pub const GENERATOR: &str = "alfa-summary";

/// A classified report ready to be rendered for one flavor.
#[derive(Debug, Clone)]
pub struct SummaryDocument<'a> {
    flavor: Flavor,
    buckets: &'a Buckets,
}

impl<'a> SummaryDocument<'a> {
    /// Wraps classified buckets for rendering.
    #[must_use]
    pub fn new(flavor: Flavor, buckets: &'a Buckets) -> Self {
        Self { flavor, buckets }
    }

    /// Renders the whole document in memory.
    ///
    /// Apart from the `Last generated` line, the output depends only on the
    /// buckets, so two renders of the same report differ only in that line.
    #[must_use]
    pub fn render(&self, generated: NaiveDate) -> String {
        let mut out = format!(
            "# Summary for Alfa {flavor}\n\n\
             This file is auto-generated by `{GENERATOR}`; do not edit.\n\n\
             Last generated: {date}\n\n",
            flavor = self.flavor,
            date = generated.format("%a %b %d %Y"),
        );
        for (bucket, entries) in self.buckets.iter_sections() {
            out.push_str(&table::render(entries, bucket.heading(), bucket.with_coverage()));
        }
        out
    }
}
