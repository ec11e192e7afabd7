use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::MatchingConfig;
use crate::workflows::matching::cache::MatchCache;
use crate::workflows::matching::domain::{
    AmenityId, ApplicantPreferences, BedroomRange, ListingCandidate, ListingId, NeighborhoodId,
    PetPolicy, PetRecord, PetSpecies,
};
use crate::workflows::matching::service::{MatchingEngine, MatchingService};

pub(super) fn preferences() -> ApplicantPreferences {
    ApplicantPreferences {
        max_rent_budget: Some(3000.0),
        bedroom_range: BedroomRange {
            min: Some(1),
            max: Some(2),
        },
        min_bathrooms: 1.0,
        neighborhood_ranking: vec![
            NeighborhoodId("astoria".to_string()),
            NeighborhoodId("greenpoint".to_string()),
        ],
        pets: Vec::new(),
        building_amenity_preferences: Default::default(),
        unit_amenity_preferences: Default::default(),
        desired_move_in: Some(date(2026, 9, 1)),
        studio_acceptable: false,
        strict_mode: true,
    }
}

pub(super) fn listing(id: &str) -> ListingCandidate {
    ListingCandidate {
        id: ListingId(id.to_string()),
        rent_price: 2800.0,
        bedrooms: 1,
        bathrooms: 1.0,
        neighborhood: NeighborhoodId("astoria".to_string()),
        pet_policy: PetPolicy::AllPetsAllowed,
        building_amenities: BTreeSet::new(),
        unit_amenities: BTreeSet::new(),
        available_date: Some(date(2026, 8, 15)),
    }
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn amenities(names: &[&str]) -> BTreeSet<AmenityId> {
    names
        .iter()
        .map(|name| AmenityId(name.to_string()))
        .collect()
}

pub(super) fn cat(weight_lbs: Option<f64>) -> PetRecord {
    PetRecord {
        species: PetSpecies::Cat,
        weight_lbs,
        breed: None,
    }
}

pub(super) fn dog(weight_lbs: Option<f64>) -> PetRecord {
    PetRecord {
        species: PetSpecies::Dog,
        weight_lbs,
        breed: None,
    }
}

pub(super) fn engine() -> MatchingEngine {
    MatchingEngine::new(MatchingConfig::default()).expect("default config validates")
}

pub(super) fn service() -> MatchingService {
    MatchingService::new(engine(), Arc::new(MatchCache::new()))
}
