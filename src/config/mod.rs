//! Tunable scoring configuration for both engines.
//!
//! Every weight table, bucket boundary, and point value the scoring logic
//! consumes lives here so deployments can adjust the rubric without touching
//! the rules themselves. Invalid configuration is rejected up front by
//! [`MatchingConfig::validate`] / [`RiskConfig::validate`] rather than
//! surfacing per-call.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Top-level weights blending the three matching score categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryWeights {
    pub basic_requirements: f64,
    pub building_amenities: f64,
    pub unit_amenities: f64,
}

impl Default for CategoryWeights {
    fn default() -> Self {
        Self {
            basic_requirements: 0.60,
            building_amenities: 0.25,
            unit_amenities: 0.15,
        }
    }
}

impl CategoryWeights {
    pub fn sum(&self) -> f64 {
        self.basic_requirements + self.building_amenities + self.unit_amenities
    }
}

/// Sub-weights blending the basic-requirements factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicRequirementWeights {
    pub bedrooms: f64,
    pub bathrooms: f64,
    pub price: f64,
    pub neighborhood: f64,
    pub pets: f64,
}

impl Default for BasicRequirementWeights {
    fn default() -> Self {
        Self {
            bedrooms: 0.20,
            bathrooms: 0.10,
            price: 0.30,
            neighborhood: 0.25,
            pets: 0.15,
        }
    }
}

impl BasicRequirementWeights {
    pub fn sum(&self) -> f64 {
        self.bedrooms + self.bathrooms + self.price + self.neighborhood + self.pets
    }
}

/// One tier of the over-budget scoring curve: rents whose overage fraction is
/// at most `max_overage` earn `score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetBucket {
    pub max_overage: f64,
    pub score: f64,
}

/// Budget ceiling and the discrete penalty buckets above it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetPolicy {
    /// Hard-filter tolerance: listings above `budget * (1 + tolerance)` are
    /// excluded outright.
    pub over_budget_tolerance: f64,
    /// Discrete buckets, ordered by `max_overage` ascending; the last bucket
    /// must end at `over_budget_tolerance`.
    pub buckets: Vec<BudgetBucket>,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            over_budget_tolerance: 0.10,
            buckets: vec![
                BudgetBucket {
                    max_overage: 0.03,
                    score: 97.0,
                },
                BudgetBucket {
                    max_overage: 0.06,
                    score: 94.0,
                },
                BudgetBucket {
                    max_overage: 0.10,
                    score: 90.0,
                },
            ],
        }
    }
}

/// Rank-based neighborhood scoring table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeighborhoodPolicy {
    /// Scores for rank 1..=N; ranks beyond the table decay by 10 per rank
    /// down to `deep_rank_floor`.
    pub rank_scores: Vec<f64>,
    pub deep_rank_floor: f64,
    /// Listing neighborhood present but absent from a non-empty ranking.
    pub unranked_score: f64,
}

impl Default for NeighborhoodPolicy {
    fn default() -> Self {
        Self {
            rank_scores: vec![100.0, 90.0, 80.0, 70.0],
            deep_rank_floor: 50.0,
            unranked_score: 40.0,
        }
    }
}

/// Pet-policy fit scores for households that keep pets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetScorePolicy {
    pub all_pets_allowed: f64,
    pub pet_fee: f64,
    pub case_by_case: f64,
    pub small_pets_within_limit: f64,
    pub small_pets_over_limit: f64,
    pub cats_only_cat_household: f64,
    /// Applied when a `SmallPetsOnly` listing does not state its own limit.
    pub default_weight_limit_lbs: f64,
}

impl Default for PetScorePolicy {
    fn default() -> Self {
        Self {
            all_pets_allowed: 100.0,
            pet_fee: 95.0,
            case_by_case: 80.0,
            small_pets_within_limit: 100.0,
            small_pets_over_limit: 60.0,
            cats_only_cat_household: 95.0,
            default_weight_limit_lbs: 25.0,
        }
    }
}

/// Per-amenity deltas applied to a category that starts at 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmenityScorePolicy {
    pub must_have_missing_penalty: f64,
    pub important_missing_penalty: f64,
    pub nice_to_have_bonus: f64,
}

impl Default for AmenityScorePolicy {
    fn default() -> Self {
        Self {
            must_have_missing_penalty: 50.0,
            important_missing_penalty: 15.0,
            nice_to_have_bonus: 5.0,
        }
    }
}

/// Full rubric for the apartment matching engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub category_weights: CategoryWeights,
    pub basic_weights: BasicRequirementWeights,
    pub budget: BudgetPolicy,
    pub neighborhood: NeighborhoodPolicy,
    pub pets: PetScorePolicy,
    pub amenities: AmenityScorePolicy,
    /// Bedroom sub-score for a studio admitted under a one-bedroom minimum.
    pub studio_fit_score: f64,
    /// Days past the desired move-in that an availability date may slip.
    pub move_in_grace_days: i64,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            category_weights: CategoryWeights::default(),
            basic_weights: BasicRequirementWeights::default(),
            budget: BudgetPolicy::default(),
            neighborhood: NeighborhoodPolicy::default(),
            pets: PetScorePolicy::default(),
            amenities: AmenityScorePolicy::default(),
            studio_fit_score: 85.0,
            move_in_grace_days: 0,
        }
    }
}

impl MatchingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_weight_sum("category_weights", self.category_weights.sum())?;
        check_weight_sum("basic_weights", self.basic_weights.sum())?;

        for (field, value) in [
            ("category_weights.basic_requirements", self.category_weights.basic_requirements),
            ("category_weights.building_amenities", self.category_weights.building_amenities),
            ("category_weights.unit_amenities", self.category_weights.unit_amenities),
            ("basic_weights.bedrooms", self.basic_weights.bedrooms),
            ("basic_weights.bathrooms", self.basic_weights.bathrooms),
            ("basic_weights.price", self.basic_weights.price),
            ("basic_weights.neighborhood", self.basic_weights.neighborhood),
            ("basic_weights.pets", self.basic_weights.pets),
            ("budget.over_budget_tolerance", self.budget.over_budget_tolerance),
        ] {
            check_non_negative(field, value)?;
        }

        let mut previous = 0.0;
        for bucket in &self.budget.buckets {
            if bucket.max_overage <= previous || bucket.max_overage > self.budget.over_budget_tolerance {
                return Err(ConfigError::InvalidBudgetBuckets);
            }
            check_score_range("budget.buckets.score", bucket.score)?;
            previous = bucket.max_overage;
        }
        if let Some(last) = self.budget.buckets.last() {
            if (last.max_overage - self.budget.over_budget_tolerance).abs() > WEIGHT_SUM_EPSILON {
                return Err(ConfigError::InvalidBudgetBuckets);
            }
        }

        for &score in &self.neighborhood.rank_scores {
            check_score_range("neighborhood.rank_scores", score)?;
        }
        check_score_range("neighborhood.deep_rank_floor", self.neighborhood.deep_rank_floor)?;
        check_score_range("neighborhood.unranked_score", self.neighborhood.unranked_score)?;
        check_score_range("pets.all_pets_allowed", self.pets.all_pets_allowed)?;
        check_score_range("pets.pet_fee", self.pets.pet_fee)?;
        check_score_range("pets.case_by_case", self.pets.case_by_case)?;
        check_score_range("pets.small_pets_within_limit", self.pets.small_pets_within_limit)?;
        check_score_range("pets.small_pets_over_limit", self.pets.small_pets_over_limit)?;
        check_score_range("pets.cats_only_cat_household", self.pets.cats_only_cat_household)?;
        check_non_negative("pets.default_weight_limit_lbs", self.pets.default_weight_limit_lbs)?;
        check_non_negative("amenities.must_have_missing_penalty", self.amenities.must_have_missing_penalty)?;
        check_non_negative("amenities.important_missing_penalty", self.amenities.important_missing_penalty)?;
        check_non_negative("amenities.nice_to_have_bonus", self.amenities.nice_to_have_bonus)?;
        check_score_range("studio_fit_score", self.studio_fit_score)?;
        if self.move_in_grace_days < 0 {
            return Err(ConfigError::NegativeValue {
                field: "move_in_grace_days",
                value: self.move_in_grace_days as f64,
            });
        }

        Ok(())
    }
}

/// Affordability tiers and their contribution to the overall risk score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffordabilityPolicy {
    pub strong_multiple: f64,
    pub borderline_multiple: f64,
    pub fair_multiple: f64,
    pub strong_points: u8,
    pub borderline_points: u8,
    pub fair_points: u8,
    pub recommended_rent_divisor: f64,
}

impl Default for AffordabilityPolicy {
    fn default() -> Self {
        Self {
            strong_multiple: 3.0,
            borderline_multiple: 2.5,
            fair_multiple: 2.0,
            strong_points: 40,
            borderline_points: 25,
            fair_points: 15,
            recommended_rent_divisor: 3.0,
        }
    }
}

/// Employment stability point table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmploymentPolicy {
    pub long_tenure_months: u32,
    pub long_tenure_points: u8,
    pub mid_tenure_months: u32,
    pub mid_tenure_points: u8,
    pub employed_points: u8,
    pub student_points: u8,
    pub self_employed_points: u8,
    pub multi_source_bonus: u8,
    /// Raw points are scaled by this factor and capped.
    pub weight: f64,
    pub cap: u8,
}

impl Default for EmploymentPolicy {
    fn default() -> Self {
        Self {
            long_tenure_months: 24,
            long_tenure_points: 30,
            mid_tenure_months: 12,
            mid_tenure_points: 20,
            employed_points: 25,
            student_points: 15,
            self_employed_points: 10,
            multi_source_bonus: 10,
            weight: 0.3,
            cap: 30,
        }
    }
}

/// Housing history point table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HousingPolicy {
    pub settled_tenure_months: u32,
    pub settled_tenure_points: u8,
    pub one_year_tenure_months: u32,
    pub one_year_tenure_points: u8,
    pub six_month_tenure_months: u32,
    pub six_month_tenure_points: u8,
    pub long_history_months: u32,
    pub long_history_points: u8,
    pub mid_history_months: u32,
    pub mid_history_points: u8,
    pub renter_points: u8,
    pub homeowner_points: u8,
    pub landlord_reference_points: u8,
    pub weight: f64,
    pub cap: u8,
}

impl Default for HousingPolicy {
    fn default() -> Self {
        Self {
            settled_tenure_months: 24,
            settled_tenure_points: 20,
            one_year_tenure_months: 12,
            one_year_tenure_points: 15,
            six_month_tenure_months: 6,
            six_month_tenure_points: 5,
            long_history_months: 60,
            long_history_points: 10,
            mid_history_months: 36,
            mid_history_points: 5,
            renter_points: 15,
            homeowner_points: 10,
            landlord_reference_points: 15,
            weight: 0.4,
            cap: 20,
        }
    }
}

/// Verification bonuses layered on top of the three weighted components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationPolicy {
    pub landlord_reference_bonus: u8,
    pub multi_income_bonus: u8,
}

impl Default for VerificationPolicy {
    fn default() -> Self {
        Self {
            landlord_reference_bonus: 5,
            multi_income_bonus: 5,
        }
    }
}

/// Red-flag detection thresholds and the per-flag score penalty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedFlagPolicy {
    pub penalty_per_flag: u8,
    /// A budget above this share of monthly income is a critical mismatch.
    pub rent_to_income_critical_share: f64,
    /// Budgets below this absolute floor draw a warning.
    pub minimum_market_rent: f64,
}

impl Default for RedFlagPolicy {
    fn default() -> Self {
        Self {
            penalty_per_flag: 2,
            rent_to_income_critical_share: 0.5,
            minimum_market_rent: 500.0,
        }
    }
}

/// Overall-score cutoffs mapping to risk levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub low: u8,
    pub medium: u8,
    pub high: u8,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low: 80,
            medium: 60,
            high: 40,
        }
    }
}

/// Full rubric for the Smart Insights risk scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RiskConfig {
    pub affordability: AffordabilityPolicy,
    pub employment: EmploymentPolicy,
    pub housing: HousingPolicy,
    pub verification: VerificationPolicy,
    pub red_flags: RedFlagPolicy,
    pub thresholds: RiskThresholds,
}

impl RiskConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.affordability.recommended_rent_divisor <= 0.0 {
            return Err(ConfigError::InvalidDivisor(
                self.affordability.recommended_rent_divisor,
            ));
        }
        if self.affordability.strong_multiple <= self.affordability.borderline_multiple
            || self.affordability.borderline_multiple <= self.affordability.fair_multiple
        {
            return Err(ConfigError::InvalidAffordabilityTiers {
                strong: self.affordability.strong_multiple,
                borderline: self.affordability.borderline_multiple,
                fair: self.affordability.fair_multiple,
            });
        }
        if self.thresholds.low <= self.thresholds.medium
            || self.thresholds.medium <= self.thresholds.high
        {
            return Err(ConfigError::InvalidThresholds {
                low: self.thresholds.low,
                medium: self.thresholds.medium,
                high: self.thresholds.high,
            });
        }
        check_non_negative(
            "red_flags.rent_to_income_critical_share",
            self.red_flags.rent_to_income_critical_share,
        )?;
        check_non_negative("red_flags.minimum_market_rent", self.red_flags.minimum_market_rent)?;
        check_non_negative("employment.weight", self.employment.weight)?;
        check_non_negative("housing.weight", self.housing.weight)?;
        Ok(())
    }
}

/// Combined configuration consumed by the CLI and embedding services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub matching: MatchingConfig,
    pub risk: RiskConfig,
}

impl EngineConfig {
    /// Load and validate configuration from a JSON file. Absent keys fall
    /// back to the reference defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: EngineConfig =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.matching.validate()?;
        self.risk.validate()
    }
}

fn check_weight_sum(table: &'static str, sum: f64) -> Result<(), ConfigError> {
    if (sum - 1.0).abs() > WEIGHT_SUM_EPSILON {
        return Err(ConfigError::WeightSum { table, sum });
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value < 0.0 || !value.is_finite() {
        return Err(ConfigError::NegativeValue { field, value });
    }
    Ok(())
}

fn check_score_range(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(ConfigError::ScoreOutOfRange { field, value });
    }
    Ok(())
}

/// Raised once at startup for malformed configuration; scoring calls never
/// produce configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{table} must sum to 1.0, got {sum:.6}")]
    WeightSum { table: &'static str, sum: f64 },
    #[error("{field} must be a non-negative finite number, got {value}")]
    NegativeValue { field: &'static str, value: f64 },
    #[error("{field} must lie within [0, 100], got {value}")]
    ScoreOutOfRange { field: &'static str, value: f64 },
    #[error("budget buckets must strictly increase and end at the over-budget tolerance")]
    InvalidBudgetBuckets,
    #[error("affordability multiples must descend: strong {strong} > borderline {borderline} > fair {fair}")]
    InvalidAffordabilityTiers {
        strong: f64,
        borderline: f64,
        fair: f64,
    },
    #[error("risk thresholds must descend: low {low} > medium {medium} > high {high}")]
    InvalidThresholds { low: u8, medium: u8, high: u8 },
    #[error("recommended rent divisor must be positive, got {0}")]
    InvalidDivisor(f64),
    #[error("unable to read config file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {path} is not valid JSON")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        EngineConfig::default().validate().expect("reference defaults validate");
    }

    #[test]
    fn rejects_weight_table_not_summing_to_one() {
        let mut config = MatchingConfig::default();
        config.category_weights.basic_requirements = 0.70;
        match config.validate() {
            Err(ConfigError::WeightSum { table, .. }) => assert_eq!(table, "category_weights"),
            other => panic!("expected weight-sum rejection, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unordered_budget_buckets() {
        let mut config = MatchingConfig::default();
        config.budget.buckets.swap(0, 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBudgetBuckets)
        ));
    }

    #[test]
    fn rejects_buckets_not_reaching_tolerance() {
        let mut config = MatchingConfig::default();
        config.budget.buckets.pop();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBudgetBuckets)
        ));
    }

    #[test]
    fn rejects_non_descending_risk_thresholds() {
        let mut config = RiskConfig::default();
        config.thresholds.medium = 90;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThresholds { .. })
        ));
    }

    #[test]
    fn rejects_zero_rent_divisor() {
        let mut config = RiskConfig::default();
        config.affordability.recommended_rent_divisor = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidDivisor(_))));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"matching": {"studio_fit_score": 80.0}}"#)
                .expect("partial config parses");
        assert_eq!(config.matching.studio_fit_score, 80.0);
        assert_eq!(config.matching.category_weights, CategoryWeights::default());
        assert_eq!(config.risk, RiskConfig::default());
        config.validate().expect("partial config validates");
    }
}
