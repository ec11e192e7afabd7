//! Apartment matching: preference normalization, hard filtering, weighted
//! scoring, and deterministic ranking with an advisory result cache.

pub mod cache;
pub mod domain;
pub(crate) mod filters;
pub mod import;
pub mod normalizer;
pub(crate) mod ranking;
pub(crate) mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use cache::{CacheKey, MatchCache};
pub use domain::{
    AmenityId, ApplicantPreferences, BedroomRange, ListingCandidate, ListingId, MatchLevel,
    MatchResult, NeighborhoodId, PetPolicy, PetRecord, PetSpecies, PriorityLevel, ScoreFactor,
};
pub use import::{listings_from_path, listings_from_reader, ImportError};
pub use normalizer::{
    normalize, RawAmenityRating, RawApplicantRecord, RawNeighborhoodPreference, RawPetRecord,
};
pub use service::{MatchingEngine, MatchingService};
