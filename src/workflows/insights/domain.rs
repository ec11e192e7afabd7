use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for applicants under review.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

/// One income stream contributing to affordability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub label: String,
    pub monthly_amount: f64,
    pub verified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentStatus {
    Employed,
    Student,
    SelfEmployed,
    Unemployed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmploymentRecord {
    pub status: EmploymentStatus,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HousingStatus {
    Renter,
    Homeowner,
    LivingWithFamily,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingRecord {
    pub status: HousingStatus,
    pub months_at_current_address: Option<u32>,
    /// Cumulative months of housing history across all addresses.
    pub total_history_months: Option<u32>,
    pub landlord_reference: bool,
    pub prior_eviction: bool,
}

/// Applicant snapshot consumed by the risk scorer. Every optional field
/// degrades gracefully; absent data lowers component scores or raises a
/// warning flag but never aborts analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub applicant_id: ApplicantId,
    pub max_rent_budget: Option<f64>,
    pub income_sources: Vec<IncomeSource>,
    pub employment: EmploymentRecord,
    pub housing: HousingRecord,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl RiskProfile {
    pub fn total_monthly_income(&self) -> f64 {
        self.income_sources
            .iter()
            .map(|source| source.monthly_amount.max(0.0))
            .sum()
    }

    pub fn verified_source_count(&self) -> usize {
        self.income_sources
            .iter()
            .filter(|source| source.verified && source.monthly_amount > 0.0)
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AffordabilityTier {
    Strong,
    Borderline,
    Poor,
}

impl AffordabilityTier {
    pub const fn label(self) -> &'static str {
        match self {
            AffordabilityTier::Strong => "Strong",
            AffordabilityTier::Borderline => "Borderline",
            AffordabilityTier::Poor => "Poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityAssessment {
    pub monthly_income: f64,
    pub income_multiple: f64,
    pub recommended_rent: f64,
    pub tier: AffordabilityTier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmploymentAssessment {
    /// Scaled component contribution, 0-30.
    pub score: u8,
    pub tenure_months: u32,
    pub multi_job_bonus: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingAssessment {
    /// Scaled component contribution, 0-20.
    pub score: u8,
    pub total_years_history: f64,
    /// Raw points earned for current-address tenure before scaling.
    pub current_tenure_score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagSeverity {
    Critical,
    Warning,
}

impl FlagSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            FlagSeverity::Critical => "CRITICAL",
            FlagSeverity::Warning => "WARNING",
        }
    }
}

/// Discrete risk indicator, distinct from the continuous score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagRecord {
    pub severity: FlagSeverity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW RISK",
            RiskLevel::Medium => "MEDIUM RISK",
            RiskLevel::High => "HIGH RISK",
            RiskLevel::VeryHigh => "VERY HIGH RISK",
        }
    }
}

/// Confidence in the analysis, driven by data completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

/// Full Smart Insights output for one applicant. A pure derivation of the
/// profile; recomputed on demand, never independently mutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub applicant_id: ApplicantId,
    pub affordability: AffordabilityAssessment,
    pub employment_stability: EmploymentAssessment,
    pub housing_history: HousingAssessment,
    /// Bonus points for independently verifiable claims, 0-10.
    pub verification_bonus: u8,
    pub red_flags: Vec<FlagRecord>,
    pub overall_score: u8,
    pub risk_level: RiskLevel,
    pub confidence: ConfidenceLevel,
    pub recommendations: Vec<String>,
}

impl RiskReport {
    /// One-line broker summary of the assessment.
    pub fn summary(&self) -> String {
        format!(
            "{} (score {}) - {} affordability at {:.1}x income, {} concern(s)",
            self.risk_level.label(),
            self.overall_score,
            self.affordability.tier.label(),
            self.affordability.income_multiple,
            self.red_flags.len()
        )
    }
}
