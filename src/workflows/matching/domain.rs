use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidate listings; also the ranking tie-break key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ListingId(pub String);

/// Identifier wrapper for neighborhoods referenced by ranked preferences.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NeighborhoodId(pub String);

/// Identifier wrapper for building/unit amenities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AmenityId(pub String);

/// How strongly an applicant cares about an amenity. Absence of a rating is
/// `DontCare`, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum PriorityLevel {
    #[default]
    DontCare,
    NiceToHave,
    Important,
    MustHave,
}

impl PriorityLevel {
    /// Maps a raw 0-3 rating; values above the scale saturate at `MustHave`.
    pub fn from_rating(rating: u8) -> Self {
        match rating {
            0 => Self::DontCare,
            1 => Self::NiceToHave,
            2 => Self::Important,
            _ => Self::MustHave,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetSpecies {
    Cat,
    Dog,
    Other(String),
}

/// A household pet as captured on the profile. Unknown weights are treated as
/// within any listing weight limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetRecord {
    pub species: PetSpecies,
    pub weight_lbs: Option<f64>,
    pub breed: Option<String>,
}

/// Building pet policy as advertised on a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PetPolicy {
    NoPets,
    AllPetsAllowed,
    CatsOnly,
    PetFee,
    CaseByCase,
    SmallPetsOnly { weight_limit_lbs: Option<f64> },
}

impl PetPolicy {
    pub fn label(&self) -> &'static str {
        match self {
            PetPolicy::NoPets => "no_pets",
            PetPolicy::AllPetsAllowed => "all_pets",
            PetPolicy::CatsOnly => "cats_only",
            PetPolicy::PetFee => "pet_fee",
            PetPolicy::CaseByCase => "case_by_case",
            PetPolicy::SmallPetsOnly { .. } => "small_pets",
        }
    }

    /// Parses the label vocabulary used by listing exports.
    pub fn parse_label(label: &str, weight_limit_lbs: Option<f64>) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "no_pets" | "none" => Some(Self::NoPets),
            "all_pets" | "all_pets_allowed" => Some(Self::AllPetsAllowed),
            "cats_only" => Some(Self::CatsOnly),
            "pet_fee" => Some(Self::PetFee),
            "case_by_case" => Some(Self::CaseByCase),
            "small_pets" | "small_pets_only" => Some(Self::SmallPetsOnly { weight_limit_lbs }),
            _ => None,
        }
    }
}

/// Bedroom bounds; either side may be open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BedroomRange {
    pub min: Option<u8>,
    pub max: Option<u8>,
}

/// Canonical scoring input produced by the preference normalizer. All
/// defaults are already applied; the engines never consult raw profile data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantPreferences {
    pub max_rent_budget: Option<f64>,
    pub bedroom_range: BedroomRange,
    pub min_bathrooms: f64,
    /// Rank 1..N, best first. Empty means any neighborhood is acceptable.
    pub neighborhood_ranking: Vec<NeighborhoodId>,
    pub pets: Vec<PetRecord>,
    pub building_amenity_preferences: BTreeMap<AmenityId, PriorityLevel>,
    pub unit_amenity_preferences: BTreeMap<AmenityId, PriorityLevel>,
    pub desired_move_in: Option<NaiveDate>,
    /// Admits 0-bedroom listings under a one-bedroom minimum.
    pub studio_acceptable: bool,
    /// All-or-nothing gate: when set, matching requires a complete profile
    /// (ranking, budget, bedroom minimum) and otherwise returns no results.
    pub strict_mode: bool,
}

impl Default for ApplicantPreferences {
    fn default() -> Self {
        Self {
            max_rent_budget: None,
            bedroom_range: BedroomRange::default(),
            min_bathrooms: DEFAULT_MIN_BATHROOMS,
            neighborhood_ranking: Vec::new(),
            pets: Vec::new(),
            building_amenity_preferences: BTreeMap::new(),
            unit_amenity_preferences: BTreeMap::new(),
            desired_move_in: None,
            studio_acceptable: false,
            strict_mode: false,
        }
    }
}

pub const DEFAULT_MIN_BATHROOMS: f64 = 1.0;

/// A listing under consideration, already resolved by the calling layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingCandidate {
    pub id: ListingId,
    pub rent_price: f64,
    pub bedrooms: u8,
    pub bathrooms: f64,
    pub neighborhood: NeighborhoodId,
    pub pet_policy: PetPolicy,
    pub building_amenities: BTreeSet<AmenityId>,
    pub unit_amenities: BTreeSet<AmenityId>,
    pub available_date: Option<NaiveDate>,
}

/// Factors reported in a match breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreFactor {
    Bedrooms,
    Bathrooms,
    Price,
    Neighborhood,
    Pets,
    BasicRequirements,
    BuildingAmenities,
    UnitAmenities,
}

impl ScoreFactor {
    pub const fn label(self) -> &'static str {
        match self {
            ScoreFactor::Bedrooms => "bedrooms",
            ScoreFactor::Bathrooms => "bathrooms",
            ScoreFactor::Price => "price",
            ScoreFactor::Neighborhood => "neighborhood",
            ScoreFactor::Pets => "pets",
            ScoreFactor::BasicRequirements => "basic_requirements",
            ScoreFactor::BuildingAmenities => "building_amenities",
            ScoreFactor::UnitAmenities => "unit_amenities",
        }
    }
}

/// Scored listing that survived every hard filter. Sub-scores allow
/// transparent audits of the blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub listing_id: ListingId,
    /// Weighted total in [0, 100], rounded to two decimals.
    pub score_percent: f64,
    pub sub_scores: BTreeMap<ScoreFactor, f64>,
    pub passed_hard_filters: bool,
}

impl MatchResult {
    pub fn match_level(&self) -> MatchLevel {
        MatchLevel::from_score(self.score_percent)
    }
}

/// Presentation tier for a match percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchLevel {
    Excellent,
    Great,
    Good,
    Fair,
}

impl MatchLevel {
    pub fn from_score(score_percent: f64) -> Self {
        if score_percent >= 90.0 {
            Self::Excellent
        } else if score_percent >= 75.0 {
            Self::Great
        } else if score_percent >= 60.0 {
            Self::Good
        } else {
            Self::Fair
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchLevel::Excellent => "Excellent Match",
            MatchLevel::Great => "Great Match",
            MatchLevel::Good => "Good Match",
            MatchLevel::Fair => "Fair Match",
        }
    }
}
