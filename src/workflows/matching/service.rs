use std::sync::Arc;

use tracing::debug;

use crate::config::{ConfigError, MatchingConfig};

use super::cache::{CacheKey, MatchCache};
use super::domain::{ApplicantPreferences, ListingCandidate, MatchResult};
use super::{filters, ranking, scoring};

/// Stateless matcher applying the configured rubric to one applicant and a
/// bounded candidate set.
pub struct MatchingEngine {
    config: MatchingConfig,
}

impl MatchingEngine {
    /// Fails fast on malformed configuration; per-call scoring is total.
    pub fn new(config: MatchingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Filter, score, and rank the candidate set. Returns an empty sequence
    /// when the strict-mode gate demands a more complete profile; callers
    /// distinguish that from "nothing matched" by checking the profile, not
    /// an error code.
    pub fn ranked_matches(
        &self,
        preferences: &ApplicantPreferences,
        listings: &[ListingCandidate],
    ) -> Vec<MatchResult> {
        if filters::strict_gate_blocks(preferences) {
            debug!("strict mode set with incomplete profile, returning no matches");
            return Vec::new();
        }

        let survivors = filters::apply_hard_filters(preferences, listings, &self.config);
        debug!(
            candidates = listings.len(),
            survivors = survivors.len(),
            "hard filters applied"
        );

        let scored = survivors
            .into_iter()
            .map(|listing| scoring::score_listing(preferences, listing, &self.config))
            .collect();

        ranking::rank(scored)
    }
}

/// Engine plus an injected advisory cache. The cache only saves
/// recomputation; results are identical either way.
pub struct MatchingService {
    engine: MatchingEngine,
    cache: Arc<MatchCache>,
}

impl MatchingService {
    pub fn new(engine: MatchingEngine, cache: Arc<MatchCache>) -> Self {
        Self { engine, cache }
    }

    pub fn engine(&self) -> &MatchingEngine {
        &self.engine
    }

    pub fn cache(&self) -> &MatchCache {
        &self.cache
    }

    pub fn ranked_matches(
        &self,
        preferences: &ApplicantPreferences,
        listings: &[ListingCandidate],
    ) -> Arc<[MatchResult]> {
        let key = CacheKey::new(preferences, listings);
        if let Some(cached) = self.cache.get(&key) {
            debug!("match cache hit");
            return cached;
        }

        debug!("match cache miss, recomputing");
        let computed = self.engine.ranked_matches(preferences, listings);
        self.cache.store(key, computed)
    }

    /// Convenience for dashboard-style callers that only show the best few.
    pub fn top(
        &self,
        preferences: &ApplicantPreferences,
        listings: &[ListingCandidate],
        limit: usize,
    ) -> Vec<MatchResult> {
        self.ranked_matches(preferences, listings)
            .iter()
            .take(limit)
            .cloned()
            .collect()
    }
}
