//! Ordering of rules within a bucket.
//!
//! Rules are ordered by their first implementing procedure, the one-to-one
//! counterpart of the ACT rule; rules without procedures are ordered by name.
//! Remaining ties are broken by rule id so the order is total.

use std::cmp::Ordering;

use crate::mapping::RuleMappingEntry;

/// Compares two strings the way a case-insensitive collation would, falling
/// back to code points so distinct strings never compare equal.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

/// Pairwise comparator between two rules.
///
/// If either side has no procedure the names decide; otherwise the first
/// procedure identifiers do. Ties fall back to the rule id.
#[must_use]
pub fn compare(a: &RuleMappingEntry, b: &RuleMappingEntry) -> Ordering {
    let primary = match (a.first_procedure(), b.first_procedure()) {
        (Some(pa), Some(pb)) => collate(pa, pb),
        _ => collate(&a.rule_name, &b.rule_name),
    };
    primary.then_with(|| collate(&a.rule_id, &b.rule_id))
}

fn compare_by_name(a: &RuleMappingEntry, b: &RuleMappingEntry) -> Ordering {
    collate(&a.rule_name, &b.rule_name).then_with(|| collate(&a.rule_id, &b.rule_id))
}

/// Sorts one bucket in place.
///
/// A bucket mixing implemented and procedure-less rules (only the ignored
/// bucket can) is ordered by name throughout, since the pairwise comparator
/// is not transitive over such a mix.
pub fn sort_bucket(bucket: &mut [RuleMappingEntry]) {
    let implemented = bucket.iter().filter(|e| e.is_implemented()).count();
    if implemented == 0 || implemented == bucket.len() {
        bucket.sort_by(compare);
    } else {
        bucket.sort_by(compare_by_name);
    }
}
