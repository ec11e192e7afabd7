//! Hard-filter stage: predicates that unconditionally exclude a listing,
//! never merely penalize its score.

use chrono::Duration;
use tracing::debug;

use crate::config::MatchingConfig;

use super::domain::{ApplicantPreferences, ListingCandidate, PetPolicy, PetRecord, PetSpecies};

/// Why a listing was excluded; surfaced only through debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FilterRejection {
    OverBudget,
    BedroomsBelowRange,
    BedroomsAboveRange,
    TooFewBathrooms,
    PetPolicyConflict,
    AvailableTooLate,
}

impl FilterRejection {
    pub(crate) const fn reason(self) -> &'static str {
        match self {
            FilterRejection::OverBudget => "rent above budget ceiling",
            FilterRejection::BedroomsBelowRange => "fewer bedrooms than requested",
            FilterRejection::BedroomsAboveRange => "more bedrooms than requested",
            FilterRejection::TooFewBathrooms => "fewer bathrooms than required",
            FilterRejection::PetPolicyConflict => "pet policy excludes household pets",
            FilterRejection::AvailableTooLate => "not available by desired move-in",
        }
    }
}

/// Household pet composition driving the pet decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HouseholdPets {
    None,
    AllCats,
    HasNonCat,
}

pub(crate) fn household_pets(pets: &[PetRecord]) -> HouseholdPets {
    if pets.is_empty() {
        return HouseholdPets::None;
    }
    if pets.iter().all(|pet| pet.species == PetSpecies::Cat) {
        HouseholdPets::AllCats
    } else {
        HouseholdPets::HasNonCat
    }
}

/// Decision table over policy x household composition. Petless households
/// pass every policy, including `NoPets`.
pub(crate) fn pets_conflict(policy: &PetPolicy, household: HouseholdPets) -> bool {
    match (policy, household) {
        (_, HouseholdPets::None) => false,
        (PetPolicy::NoPets, _) => true,
        (PetPolicy::CatsOnly, HouseholdPets::HasNonCat) => true,
        (PetPolicy::CatsOnly, HouseholdPets::AllCats) => false,
        (
            PetPolicy::AllPetsAllowed
            | PetPolicy::PetFee
            | PetPolicy::CaseByCase
            | PetPolicy::SmallPetsOnly { .. },
            _,
        ) => false,
    }
}

/// True when strict mode demands a complete profile that is not present.
/// The matching call then returns an empty result set instead of applying
/// partial filters.
pub(crate) fn strict_gate_blocks(preferences: &ApplicantPreferences) -> bool {
    preferences.strict_mode
        && (preferences.neighborhood_ranking.is_empty()
            || preferences.max_rent_budget.is_none()
            || preferences.bedroom_range.min.is_none())
}

/// Evaluates every predicate for a single listing, returning the first
/// violated one.
pub(crate) fn rejection(
    preferences: &ApplicantPreferences,
    listing: &ListingCandidate,
    config: &MatchingConfig,
) -> Option<FilterRejection> {
    if let Some(budget) = preferences.max_rent_budget {
        let ceiling = budget * (1.0 + config.budget.over_budget_tolerance);
        if listing.rent_price > ceiling {
            return Some(FilterRejection::OverBudget);
        }
    }

    if let Some(min) = preferences.bedroom_range.min {
        if listing.bedrooms < min {
            let studio_admitted =
                listing.bedrooms == 0 && min == 1 && preferences.studio_acceptable;
            if !studio_admitted {
                return Some(FilterRejection::BedroomsBelowRange);
            }
        }
    }
    if let Some(max) = preferences.bedroom_range.max {
        if listing.bedrooms > max {
            return Some(FilterRejection::BedroomsAboveRange);
        }
    }

    if listing.bathrooms < preferences.min_bathrooms {
        return Some(FilterRejection::TooFewBathrooms);
    }

    if pets_conflict(&listing.pet_policy, household_pets(&preferences.pets)) {
        return Some(FilterRejection::PetPolicyConflict);
    }

    if let (Some(available), Some(move_in)) = (listing.available_date, preferences.desired_move_in)
    {
        let deadline = move_in + Duration::days(config.move_in_grace_days);
        if available > deadline {
            return Some(FilterRejection::AvailableTooLate);
        }
    }

    None
}

/// Returns the subsequence of candidates passing every hard filter.
pub(crate) fn apply_hard_filters<'a>(
    preferences: &ApplicantPreferences,
    listings: &'a [ListingCandidate],
    config: &MatchingConfig,
) -> Vec<&'a ListingCandidate> {
    listings
        .iter()
        .filter(|listing| match rejection(preferences, listing, config) {
            Some(reason) => {
                debug!(listing = %listing.id.0, reason = reason.reason(), "listing excluded");
                false
            }
            None => true,
        })
        .collect()
}
