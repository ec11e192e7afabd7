//! Weighted scoring stage: blends six bounded sub-scores into a 0-100 match
//! percentage. Pure function of preferences, listing, and configuration.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::MatchingConfig;

use super::domain::{
    AmenityId, ApplicantPreferences, ListingCandidate, MatchResult, PetPolicy, PriorityLevel,
    ScoreFactor,
};
use super::filters::{household_pets, HouseholdPets};

pub(crate) fn score_listing(
    preferences: &ApplicantPreferences,
    listing: &ListingCandidate,
    config: &MatchingConfig,
) -> MatchResult {
    let bedrooms = bedroom_score(preferences, listing, config);
    let bathrooms = bathroom_score();
    let price = price_score(preferences, listing, config);
    let neighborhood = neighborhood_score(preferences, listing, config);
    let pets = pet_score(preferences, listing, config);

    let weights = &config.basic_weights;
    let basic = weights.bedrooms * bedrooms
        + weights.bathrooms * bathrooms
        + weights.price * price
        + weights.neighborhood * neighborhood
        + weights.pets * pets;

    let building = amenity_score(
        &preferences.building_amenity_preferences,
        &listing.building_amenities,
        config,
    );
    let unit = amenity_score(
        &preferences.unit_amenity_preferences,
        &listing.unit_amenities,
        config,
    );

    let categories = &config.category_weights;
    let total = categories.basic_requirements * basic
        + categories.building_amenities * building
        + categories.unit_amenities * unit;

    let mut sub_scores = BTreeMap::new();
    sub_scores.insert(ScoreFactor::Bedrooms, round2(bedrooms));
    sub_scores.insert(ScoreFactor::Bathrooms, round2(bathrooms));
    sub_scores.insert(ScoreFactor::Price, round2(price));
    sub_scores.insert(ScoreFactor::Neighborhood, round2(neighborhood));
    sub_scores.insert(ScoreFactor::Pets, round2(pets));
    sub_scores.insert(ScoreFactor::BasicRequirements, round2(basic));
    sub_scores.insert(ScoreFactor::BuildingAmenities, round2(building));
    sub_scores.insert(ScoreFactor::UnitAmenities, round2(unit));

    MatchResult {
        listing_id: listing.id.clone(),
        score_percent: round2(total.clamp(0.0, 100.0)),
        sub_scores,
        passed_hard_filters: true,
    }
}

fn bedroom_score(
    preferences: &ApplicantPreferences,
    listing: &ListingCandidate,
    config: &MatchingConfig,
) -> f64 {
    if let Some(min) = preferences.bedroom_range.min {
        // The only under-minimum listing the filter admits is a studio
        // accepted under a one-bedroom request.
        if listing.bedrooms < min {
            return config.studio_fit_score;
        }
    }
    100.0
}

// The hard filter already guarantees the bathroom minimum; the factor is kept
// explicit so the weight table stays tunable.
fn bathroom_score() -> f64 {
    100.0
}

fn price_score(
    preferences: &ApplicantPreferences,
    listing: &ListingCandidate,
    config: &MatchingConfig,
) -> f64 {
    let Some(budget) = preferences.max_rent_budget else {
        return 100.0;
    };
    if listing.rent_price <= budget {
        return 100.0;
    }

    let overage = (listing.rent_price - budget) / budget;
    for bucket in &config.budget.buckets {
        if overage <= bucket.max_overage {
            return bucket.score;
        }
    }
    0.0
}

fn neighborhood_score(
    preferences: &ApplicantPreferences,
    listing: &ListingCandidate,
    config: &MatchingConfig,
) -> f64 {
    if preferences.neighborhood_ranking.is_empty() {
        return 100.0;
    }

    let position = preferences
        .neighborhood_ranking
        .iter()
        .position(|preferred| *preferred == listing.neighborhood);

    match position {
        Some(index) => {
            let policy = &config.neighborhood;
            match policy.rank_scores.get(index) {
                Some(score) => *score,
                None => {
                    let rank = (index + 1) as f64;
                    (100.0 - 10.0 * rank).max(policy.deep_rank_floor)
                }
            }
        }
        None => config.neighborhood.unranked_score,
    }
}

fn pet_score(
    preferences: &ApplicantPreferences,
    listing: &ListingCandidate,
    config: &MatchingConfig,
) -> f64 {
    let household = household_pets(&preferences.pets);
    if household == HouseholdPets::None {
        return 100.0;
    }

    let policy = &config.pets;
    match &listing.pet_policy {
        PetPolicy::AllPetsAllowed => policy.all_pets_allowed,
        PetPolicy::PetFee => policy.pet_fee,
        PetPolicy::CaseByCase => policy.case_by_case,
        PetPolicy::SmallPetsOnly { weight_limit_lbs } => {
            let limit = weight_limit_lbs.unwrap_or(policy.default_weight_limit_lbs);
            let any_over = preferences
                .pets
                .iter()
                .any(|pet| pet.weight_lbs.is_some_and(|weight| weight > limit));
            if any_over {
                policy.small_pets_over_limit
            } else {
                policy.small_pets_within_limit
            }
        }
        PetPolicy::CatsOnly => match household {
            HouseholdPets::AllCats => policy.cats_only_cat_household,
            // Unreachable after the hard filter; scored as a miss for
            // direct callers.
            _ => 0.0,
        },
        PetPolicy::NoPets => 0.0,
    }
}

fn amenity_score(
    preferences: &BTreeMap<AmenityId, PriorityLevel>,
    present: &BTreeSet<AmenityId>,
    config: &MatchingConfig,
) -> f64 {
    let rated = preferences
        .iter()
        .filter(|(_, priority)| **priority != PriorityLevel::DontCare);
    let mut any_rated = false;
    let mut score = 100.0;

    for (amenity, priority) in rated {
        any_rated = true;
        let available = present.contains(amenity);
        match (priority, available) {
            (PriorityLevel::MustHave, false) => score -= config.amenities.must_have_missing_penalty,
            (PriorityLevel::Important, false) => {
                score -= config.amenities.important_missing_penalty
            }
            (PriorityLevel::NiceToHave, true) => score += config.amenities.nice_to_have_bonus,
            _ => {}
        }
    }

    if !any_rated {
        return 100.0;
    }
    score.clamp(0.0, 100.0)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
