//! Smart Insights: rule-based affordability/stability assessment of an
//! applicant profile. Local arithmetic only; no external services see any
//! profile data.

pub mod domain;
pub(crate) mod rules;


pub use domain::{
    AffordabilityAssessment, AffordabilityTier, ApplicantId, ConfidenceLevel, EmploymentAssessment,
    EmploymentRecord, EmploymentStatus, FlagRecord, FlagSeverity, HousingAssessment, HousingRecord,
    HousingStatus, IncomeSource, RiskLevel, RiskProfile, RiskReport,
};

use chrono::NaiveDate;
use tracing::debug;

use crate::config::{ConfigError, RiskConfig};

/// Stateless scorer applying the risk rubric to one applicant profile.
pub struct InsightsEngine {
    config: RiskConfig,
}

impl InsightsEngine {
    /// Fails fast on malformed configuration; analysis itself is total.
    pub fn new(config: RiskConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Compute the full risk report. `as_of` anchors tenure arithmetic so
    /// the scorer never reads the wall clock.
    pub fn analyze(&self, profile: &RiskProfile, as_of: NaiveDate) -> RiskReport {
        let (affordability, affordability_points) =
            rules::assess_affordability(profile, &self.config);
        let employment = rules::assess_employment(profile, as_of, &self.config);
        let housing = rules::assess_housing(profile, &self.config);
        let verification = rules::verification_bonus(profile, &self.config);
        let red_flags = rules::detect_red_flags(profile, &self.config);

        let penalty =
            red_flags.len() as i32 * i32::from(self.config.red_flags.penalty_per_flag);
        let total = i32::from(affordability_points)
            + i32::from(employment.score)
            + i32::from(housing.score)
            + i32::from(verification)
            - penalty;
        let overall_score = total.clamp(0, 100) as u8;

        let thresholds = &self.config.thresholds;
        let risk_level = if overall_score >= thresholds.low {
            RiskLevel::Low
        } else if overall_score >= thresholds.medium {
            RiskLevel::Medium
        } else if overall_score >= thresholds.high {
            RiskLevel::High
        } else {
            RiskLevel::VeryHigh
        };

        debug!(
            applicant = %profile.applicant_id.0,
            overall_score,
            flags = red_flags.len(),
            "risk report computed"
        );

        RiskReport {
            applicant_id: profile.applicant_id.clone(),
            affordability,
            employment_stability: employment,
            housing_history: housing,
            verification_bonus: verification,
            red_flags,
            overall_score,
            risk_level,
            confidence: rules::confidence(profile),
            recommendations: rules::recommendations(profile),
        }
    }
}
