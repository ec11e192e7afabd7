use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;

use rental_match::config::MatchingConfig;
use rental_match::workflows::matching::{
    listings_from_reader, normalize, AmenityId, ListingCandidate, ListingId, MatchCache,
    MatchingEngine, MatchingService, NeighborhoodId, PetPolicy, RawAmenityRating,
    RawApplicantRecord, RawNeighborhoodPreference, RawPetRecord, ScoreFactor,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn raw_applicant() -> RawApplicantRecord {
    RawApplicantRecord {
        max_rent_budget: Some(3000.0),
        min_bedrooms: Some("1".to_string()),
        max_bedrooms: Some("2".to_string()),
        min_bathrooms: Some(1.0),
        neighborhood_preferences: vec![
            RawNeighborhoodPreference {
                neighborhood: "astoria".to_string(),
                rank: 1,
            },
            RawNeighborhoodPreference {
                neighborhood: "greenpoint".to_string(),
                rank: 2,
            },
        ],
        pets: vec![RawPetRecord {
            species: Some("dog".to_string()),
            weight_lbs: Some(18.0),
            breed: Some("beagle".to_string()),
        }],
        building_amenity_ratings: vec![RawAmenityRating {
            amenity: "gym".to_string(),
            rating: 2,
        }],
        unit_amenity_ratings: vec![RawAmenityRating {
            amenity: "dishwasher".to_string(),
            rating: 1,
        }],
        desired_move_in: Some(date(2026, 9, 1)),
        studio_acceptable: None,
    }
}

fn candidate(id: &str, rent: f64, neighborhood: &str, policy: PetPolicy) -> ListingCandidate {
    ListingCandidate {
        id: ListingId(id.to_string()),
        rent_price: rent,
        bedrooms: 1,
        bathrooms: 1.0,
        neighborhood: NeighborhoodId(neighborhood.to_string()),
        pet_policy: policy,
        building_amenities: [AmenityId("gym".to_string())].into_iter().collect(),
        unit_amenities: BTreeSet::new(),
        available_date: Some(date(2026, 8, 20)),
    }
}

fn service() -> MatchingService {
    let engine = MatchingEngine::new(MatchingConfig::default()).expect("default config validates");
    MatchingService::new(engine, Arc::new(MatchCache::new()))
}

#[test]
fn end_to_end_ranking_from_raw_profile() {
    let preferences = normalize(&raw_applicant());
    assert!(preferences.strict_mode);

    let listings = vec![
        candidate("astoria-fee", 2900.0, "astoria", PetPolicy::PetFee),
        candidate("astoria-open", 2800.0, "astoria", PetPolicy::AllPetsAllowed),
        candidate("greenpoint-open", 2800.0, "greenpoint", PetPolicy::AllPetsAllowed),
        candidate("no-pets", 2500.0, "astoria", PetPolicy::NoPets),
        candidate("cats-only", 2500.0, "astoria", PetPolicy::CatsOnly),
        candidate("too-dear", 3500.0, "astoria", PetPolicy::AllPetsAllowed),
    ];

    let results = service().ranked_matches(&preferences, &listings);

    let ids: Vec<_> = results
        .iter()
        .map(|result| result.listing_id.0.as_str())
        .collect();
    // astoria-open 100.0, astoria-fee 99.55 (pet fee), greenpoint-open 98.5
    // (second-choice neighborhood)
    assert_eq!(ids, ["astoria-open", "astoria-fee", "greenpoint-open"]);

    for result in results.iter() {
        assert!(result.passed_hard_filters);
        assert!((0.0..=100.0).contains(&result.score_percent));
    }
}

#[test]
fn hard_filter_soundness_over_the_final_output() {
    let preferences = normalize(&raw_applicant());

    let listings: Vec<_> = (0..60)
        .map(|index| {
            let mut listing = candidate(
                &format!("unit-{index:02}"),
                2400.0 + 25.0 * index as f64,
                if index % 3 == 0 { "astoria" } else { "bushwick" },
                if index % 4 == 0 {
                    PetPolicy::NoPets
                } else {
                    PetPolicy::PetFee
                },
            );
            listing.bedrooms = (index % 4) as u8;
            listing.bathrooms = 1.0 + (index % 2) as f64 * 0.5;
            listing
        })
        .collect();

    let budget_ceiling = 3000.0 * 1.10;
    for result in service().ranked_matches(&preferences, &listings).iter() {
        let listing = listings
            .iter()
            .find(|candidate| candidate.id == result.listing_id)
            .expect("result references an input listing");
        assert!(listing.rent_price <= budget_ceiling);
        assert!((1..=2).contains(&listing.bedrooms));
        assert!(listing.bathrooms >= 1.0);
        assert!(listing.pet_policy != PetPolicy::NoPets);
    }
}

#[test]
fn strict_mode_gate_returns_empty_regardless_of_candidates() {
    let mut preferences = normalize(&raw_applicant());
    preferences.neighborhood_ranking.clear();

    let listings = vec![
        candidate("a", 2500.0, "astoria", PetPolicy::AllPetsAllowed),
        candidate("b", 2600.0, "astoria", PetPolicy::AllPetsAllowed),
    ];

    let results = service().ranked_matches(&preferences, &listings);

    assert!(results.is_empty());
}

#[test]
fn repeated_calls_are_deterministic_and_cached() {
    let preferences = normalize(&raw_applicant());
    let listings = vec![
        candidate("astoria-open", 2800.0, "astoria", PetPolicy::AllPetsAllowed),
        candidate("astoria-fee", 2900.0, "astoria", PetPolicy::PetFee),
    ];

    let service = service();
    let first = service.ranked_matches(&preferences, &listings);
    let second = service.ranked_matches(&preferences, &listings);

    assert_eq!(first.as_ref(), second.as_ref());
    assert_eq!(service.cache().len(), 1);

    // A cold cache produces the identical sequence.
    let fresh = self::service().ranked_matches(&preferences, &listings);
    assert_eq!(first.as_ref(), fresh.as_ref());
}

#[test]
fn csv_export_feeds_the_matcher() {
    let csv = "\
Listing ID,Rent,Bedrooms,Bathrooms,Neighborhood,Pet Policy,Pet Weight Limit,Building Amenities,Unit Amenities,Available Date
ast-101,2850,1,1.0,astoria,pet_fee,,gym|roof,dishwasher,2026-08-15
grn-201,2950,1,1.5,greenpoint,small_pets,30,gym,,2026-08-01
bad-301,4800,3,2.0,bushwick,no_pets,,,,
";

    let listings = listings_from_reader(csv.as_bytes()).expect("export parses");
    assert_eq!(listings.len(), 3);
    assert_eq!(
        listings[1].pet_policy,
        PetPolicy::SmallPetsOnly {
            weight_limit_lbs: Some(30.0)
        }
    );
    assert_eq!(listings[2].available_date, None);

    let preferences = normalize(&raw_applicant());
    let results = service().ranked_matches(&preferences, &listings);

    let ids: Vec<_> = results
        .iter()
        .map(|result| result.listing_id.0.as_str())
        .collect();
    assert_eq!(ids, ["ast-101", "grn-201"]);

    let gym_rated = results
        .iter()
        .find(|result| result.listing_id.0 == "ast-101")
        .expect("ast-101 ranked");
    assert_eq!(
        gym_rated.sub_scores.get(&ScoreFactor::BuildingAmenities),
        Some(&100.0)
    );
}

#[test]
fn unknown_pet_policy_labels_fail_the_import() {
    let csv = "\
Listing ID,Rent,Bedrooms,Bathrooms,Neighborhood,Pet Policy,Pet Weight Limit,Building Amenities,Unit Amenities,Available Date
ast-101,2850,1,1.0,astoria,exotic_only,,,,2026-08-15
";

    let error = listings_from_reader(csv.as_bytes()).expect_err("label is rejected");
    assert!(error.to_string().contains("exotic_only"));
}
