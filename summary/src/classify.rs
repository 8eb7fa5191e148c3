//! Partitions rule mappings into status buckets.

use std::collections::BTreeSet;

use crate::mapping::{Consistency, RuleMappingEntry};
use crate::order::sort_bucket;

/// Implementation status of a rule. Every rule lands in exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBucket {
    /// Listed in the ignore-list; no implementation intended.
    Ignored,
    /// No implementing procedure.
    NotImplemented,
    /// Implemented, consistent on some test cases.
    Partial,
    /// Implemented, consistent on every test case.
    Complete,
    /// Implemented, but the mapping is inconsistent.
    Broken,
}

impl StatusBucket {
    /// Section order of the rendered summary.
    pub const SECTIONS: [StatusBucket; 5] = [
        StatusBucket::Broken,
        StatusBucket::NotImplemented,
        StatusBucket::Partial,
        StatusBucket::Complete,
        StatusBucket::Ignored,
    ];

    /// Decides the bucket of a single entry. First match wins.
    #[must_use]
    pub fn of(entry: &RuleMappingEntry, ignored: &BTreeSet<String>) -> Self {
        if ignored.contains(&entry.rule_id) {
            return StatusBucket::Ignored;
        }
        if !entry.is_implemented() {
            return StatusBucket::NotImplemented;
        }
        match entry.consistency {
            Consistency::Complete => StatusBucket::Complete,
            Consistency::Partial => StatusBucket::Partial,
            Consistency::Broken => StatusBucket::Broken,
        }
    }

    /// Heading of the summary section for this bucket.
    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            StatusBucket::Broken => "## Rules with a broken implementation",
            StatusBucket::NotImplemented => "## Rules without implementation",
            StatusBucket::Partial => "## Rules with a partial implementation",
            StatusBucket::Complete => "## Rules with a complete implementation",
            StatusBucket::Ignored => "## Ignored rules (no implementation intended)",
        }
    }

    /// Whether the section for this bucket shows coverage columns.
    #[must_use]
    pub fn with_coverage(self) -> bool {
        !matches!(self, StatusBucket::NotImplemented | StatusBucket::Ignored)
    }
}

/// The five status buckets of one mapping report, each in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buckets {
    /// Rules in the ignore-list.
    pub ignored: Vec<RuleMappingEntry>,
    /// Rules without implementing procedures.
    pub not_implemented: Vec<RuleMappingEntry>,
    /// Rules with a complete implementation.
    pub complete: Vec<RuleMappingEntry>,
    /// Rules with a partial implementation.
    pub partial: Vec<RuleMappingEntry>,
    /// Rules with a broken mapping.
    pub broken: Vec<RuleMappingEntry>,
}

impl Buckets {
    /// Entries of a single bucket.
    #[must_use]
    pub fn get(&self, bucket: StatusBucket) -> &[RuleMappingEntry] {
        match bucket {
            StatusBucket::Ignored => &self.ignored,
            StatusBucket::NotImplemented => &self.not_implemented,
            StatusBucket::Complete => &self.complete,
            StatusBucket::Partial => &self.partial,
            StatusBucket::Broken => &self.broken,
        }
    }

    fn get_mut(&mut self, bucket: StatusBucket) -> &mut Vec<RuleMappingEntry> {
        match bucket {
            StatusBucket::Ignored => &mut self.ignored,
            StatusBucket::NotImplemented => &mut self.not_implemented,
            StatusBucket::Complete => &mut self.complete,
            StatusBucket::Partial => &mut self.partial,
            StatusBucket::Broken => &mut self.broken,
        }
    }

    /// Total number of classified entries.
    #[must_use]
    pub fn len(&self) -> usize {
        StatusBucket::SECTIONS.iter().map(|b| self.get(*b).len()).sum()
    }

    /// Returns true if no entry was classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sections in summary order, paired with their entries.
    pub fn iter_sections(&self) -> impl Iterator<Item = (StatusBucket, &[RuleMappingEntry])> {
        StatusBucket::SECTIONS.into_iter().map(move |b| (b, self.get(b)))
    }

    /// Bucket holding the given rule id, if any.
    #[must_use]
    pub fn bucket_of(&self, rule_id: &str) -> Option<StatusBucket> {
        self.iter_sections()
            .find(|(_, entries)| entries.iter().any(|e| e.rule_id == rule_id))
            .map(|(bucket, _)| bucket)
    }
}

/// Classifies every entry into exactly one bucket, then sorts each bucket.
///
/// The ignore-list wins over any implementation state; then rules without
/// procedures are not implemented; the rest follow their consistency.
#[must_use]
pub fn classify(entries: &[RuleMappingEntry], ignored: &BTreeSet<String>) -> Buckets {
    let mut buckets = Buckets::default();

    for entry in entries {
        let bucket = StatusBucket::of(entry, ignored);
        tracing::debug!(rule = %entry.rule_id, ?bucket, "classified rule");
        buckets.get_mut(bucket).push(entry.clone());
    }

    for bucket in StatusBucket::SECTIONS {
        sort_bucket(buckets.get_mut(bucket));
    }

    tracing::info!(
        broken = buckets.broken.len(),
        not_implemented = buckets.not_implemented.len(),
        partial = buckets.partial.len(),
        complete = buckets.complete.len(),
        ignored = buckets.ignored.len(),
        "classified rule mapping"
    );

    buckets
}
