//! Deterministic ordering of scored matches: score descending, listing id
//! ascending on ties, duplicate ids collapsed to their best entry.

use std::collections::BTreeSet;

use super::domain::MatchResult;

pub(crate) fn rank(mut results: Vec<MatchResult>) -> Vec<MatchResult> {
    results.sort_by(|a, b| {
        b.score_percent
            .total_cmp(&a.score_percent)
            .then_with(|| a.listing_id.cmp(&b.listing_id))
    });

    let mut seen = BTreeSet::new();
    results.retain(|result| seen.insert(result.listing_id.clone()));
    results
}
