//! Converts loosely-typed applicant profile data into the canonical
//! [`ApplicantPreferences`] scoring input. Total: malformed optional fields
//! degrade to defaults instead of failing.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{
    AmenityId, ApplicantPreferences, BedroomRange, NeighborhoodId, PetRecord, PetSpecies,
    PriorityLevel, DEFAULT_MIN_BATHROOMS,
};

/// Raw profile snapshot as the intake layer stores it: bedroom bounds arrive
/// as free-form strings ("studio", "2"), ratings as repeated rows, and every
/// field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RawApplicantRecord {
    pub max_rent_budget: Option<f64>,
    pub min_bedrooms: Option<String>,
    pub max_bedrooms: Option<String>,
    pub min_bathrooms: Option<f64>,
    pub neighborhood_preferences: Vec<RawNeighborhoodPreference>,
    pub pets: Vec<RawPetRecord>,
    pub building_amenity_ratings: Vec<RawAmenityRating>,
    pub unit_amenity_ratings: Vec<RawAmenityRating>,
    pub desired_move_in: Option<NaiveDate>,
    pub studio_acceptable: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNeighborhoodPreference {
    pub neighborhood: String,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RawPetRecord {
    pub species: Option<String>,
    pub weight_lbs: Option<f64>,
    pub breed: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAmenityRating {
    pub amenity: String,
    /// 0 = don't care .. 3 = must have; later rows override earlier ones.
    pub rating: u8,
}

/// Produce the canonical preferences struct with all defaults applied.
pub fn normalize(raw: &RawApplicantRecord) -> ApplicantPreferences {
    let max_rent_budget = raw.max_rent_budget.filter(|budget| *budget > 0.0);

    let mut min = raw.min_bedrooms.as_deref().and_then(parse_bedroom_bound);
    let mut max = raw.max_bedrooms.as_deref().and_then(parse_bedroom_bound);
    if let (Some(lo), Some(hi)) = (min, max) {
        if lo > hi {
            debug!(lo, hi, "bedroom bounds inverted, swapping");
            (min, max) = (Some(hi), Some(lo));
        }
    }

    let min_bathrooms = raw
        .min_bathrooms
        .filter(|baths| *baths > 0.0)
        .unwrap_or(DEFAULT_MIN_BATHROOMS);

    let mut ranked = raw.neighborhood_preferences.clone();
    ranked.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.neighborhood.cmp(&b.neighborhood)));
    let mut neighborhood_ranking: Vec<NeighborhoodId> = Vec::with_capacity(ranked.len());
    for preference in ranked {
        let id = NeighborhoodId(preference.neighborhood);
        if !neighborhood_ranking.contains(&id) {
            neighborhood_ranking.push(id);
        }
    }

    let pets = raw.pets.iter().map(normalize_pet).collect::<Vec<_>>();

    let strict_mode =
        !neighborhood_ranking.is_empty() && max_rent_budget.is_some() && min.is_some();

    ApplicantPreferences {
        max_rent_budget,
        bedroom_range: BedroomRange { min, max },
        min_bathrooms,
        neighborhood_ranking,
        pets,
        building_amenity_preferences: normalize_ratings(&raw.building_amenity_ratings),
        unit_amenity_preferences: normalize_ratings(&raw.unit_amenity_ratings),
        desired_move_in: raw.desired_move_in,
        studio_acceptable: raw.studio_acceptable.unwrap_or(false),
        strict_mode,
    }
}

fn parse_bedroom_bound(value: &str) -> Option<u8> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.eq_ignore_ascii_case("studio") {
        return Some(0);
    }
    match trimmed.parse::<u8>() {
        Ok(count) => Some(count),
        Err(_) => {
            debug!(value = trimmed, "unparseable bedroom preference discarded");
            None
        }
    }
}

fn normalize_pet(raw: &RawPetRecord) -> PetRecord {
    let species = match raw.species.as_deref().map(str::trim) {
        Some(species) if !species.is_empty() => {
            let lowered = species.to_ascii_lowercase();
            if lowered.contains("cat") {
                PetSpecies::Cat
            } else if lowered.contains("dog") {
                PetSpecies::Dog
            } else {
                PetSpecies::Other(species.to_string())
            }
        }
        _ => PetSpecies::Other("unspecified".to_string()),
    };

    PetRecord {
        species,
        weight_lbs: raw.weight_lbs.filter(|weight| *weight > 0.0),
        breed: raw
            .breed
            .as_deref()
            .map(str::trim)
            .filter(|breed| !breed.is_empty())
            .map(str::to_string),
    }
}

fn normalize_ratings(ratings: &[RawAmenityRating]) -> BTreeMap<AmenityId, PriorityLevel> {
    let mut preferences = BTreeMap::new();
    for rating in ratings {
        preferences.insert(
            AmenityId(rating.amenity.clone()),
            PriorityLevel::from_rating(rating.rating),
        );
    }
    preferences
}
