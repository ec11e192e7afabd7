//! Advisory result cache keyed by content fingerprints of both inputs.
//!
//! The cache never changes output, only latency: a read either returns a
//! complete previously-ranked sequence or the caller recomputes in full. Any
//! mutation to the preferences or the candidate set changes the fingerprint,
//! so stale entries are simply never addressed again. Concurrent
//! recomputation for the same key is tolerated; the computation is pure, so
//! racing writers store identical values.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Datelike, NaiveDate};

use super::domain::{ApplicantPreferences, ListingCandidate, MatchResult, PetPolicy, PetSpecies};

/// Composite key: (preferences fingerprint, listing-set fingerprint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    profile: u64,
    listings: u64,
}

impl CacheKey {
    pub fn new(preferences: &ApplicantPreferences, listings: &[ListingCandidate]) -> Self {
        Self {
            profile: preferences_fingerprint(preferences),
            listings: listings_fingerprint(listings),
        }
    }
}

/// Injected keyed store for ranked match sequences.
#[derive(Debug, Default)]
pub struct MatchCache {
    entries: Mutex<HashMap<CacheKey, Arc<[MatchResult]>>>,
}

impl MatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<[MatchResult]>> {
        self.lock().get(key).cloned()
    }

    pub fn store(&self, key: CacheKey, results: Vec<MatchResult>) -> Arc<[MatchResult]> {
        let shared: Arc<[MatchResult]> = results.into();
        self.lock().insert(key, Arc::clone(&shared));
        shared
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, Arc<[MatchResult]>>> {
        // A poisoned lock only means a panicking reader; the map itself is
        // never left mid-write by the operations above.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn preferences_fingerprint(preferences: &ApplicantPreferences) -> u64 {
    let mut hasher = DefaultHasher::new();
    hash_opt_f64(&mut hasher, preferences.max_rent_budget);
    preferences.bedroom_range.min.hash(&mut hasher);
    preferences.bedroom_range.max.hash(&mut hasher);
    hash_f64(&mut hasher, preferences.min_bathrooms);
    for neighborhood in &preferences.neighborhood_ranking {
        neighborhood.hash(&mut hasher);
    }
    for pet in &preferences.pets {
        match &pet.species {
            PetSpecies::Cat => hasher.write_u8(0),
            PetSpecies::Dog => hasher.write_u8(1),
            PetSpecies::Other(name) => {
                hasher.write_u8(2);
                name.hash(&mut hasher);
            }
        }
        hash_opt_f64(&mut hasher, pet.weight_lbs);
        pet.breed.hash(&mut hasher);
    }
    for (amenity, priority) in &preferences.building_amenity_preferences {
        amenity.hash(&mut hasher);
        hasher.write_u8(*priority as u8);
    }
    for (amenity, priority) in &preferences.unit_amenity_preferences {
        amenity.hash(&mut hasher);
        hasher.write_u8(*priority as u8);
    }
    hash_opt_date(&mut hasher, preferences.desired_move_in);
    preferences.studio_acceptable.hash(&mut hasher);
    preferences.strict_mode.hash(&mut hasher);
    hasher.finish()
}

fn listings_fingerprint(listings: &[ListingCandidate]) -> u64 {
    let mut hasher = DefaultHasher::new();
    hasher.write_usize(listings.len());
    for listing in listings {
        listing.id.hash(&mut hasher);
        hash_f64(&mut hasher, listing.rent_price);
        hasher.write_u8(listing.bedrooms);
        hash_f64(&mut hasher, listing.bathrooms);
        listing.neighborhood.hash(&mut hasher);
        match &listing.pet_policy {
            PetPolicy::NoPets => hasher.write_u8(0),
            PetPolicy::AllPetsAllowed => hasher.write_u8(1),
            PetPolicy::CatsOnly => hasher.write_u8(2),
            PetPolicy::PetFee => hasher.write_u8(3),
            PetPolicy::CaseByCase => hasher.write_u8(4),
            PetPolicy::SmallPetsOnly { weight_limit_lbs } => {
                hasher.write_u8(5);
                hash_opt_f64(&mut hasher, *weight_limit_lbs);
            }
        }
        for amenity in &listing.building_amenities {
            amenity.hash(&mut hasher);
        }
        for amenity in &listing.unit_amenities {
            amenity.hash(&mut hasher);
        }
        hash_opt_date(&mut hasher, listing.available_date);
    }
    hasher.finish()
}

fn hash_f64(hasher: &mut impl Hasher, value: f64) {
    hasher.write_u64(value.to_bits());
}

fn hash_opt_f64(hasher: &mut impl Hasher, value: Option<f64>) {
    match value {
        Some(value) => {
            hasher.write_u8(1);
            hash_f64(hasher, value);
        }
        None => hasher.write_u8(0),
    }
}

fn hash_opt_date(hasher: &mut impl Hasher, value: Option<NaiveDate>) {
    match value {
        Some(date) => {
            hasher.write_u8(1);
            hasher.write_i32(date.num_days_from_ce());
        }
        None => hasher.write_u8(0),
    }
}
