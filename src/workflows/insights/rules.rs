//! Component scorers and red-flag detection for the risk report.

use chrono::{Datelike, NaiveDate};

use crate::config::RiskConfig;

use super::domain::{
    AffordabilityAssessment, AffordabilityTier, ConfidenceLevel, EmploymentAssessment,
    EmploymentStatus, FlagRecord, FlagSeverity, HousingAssessment, HousingStatus, RiskProfile,
};

pub(crate) fn assess_affordability(
    profile: &RiskProfile,
    config: &RiskConfig,
) -> (AffordabilityAssessment, u8) {
    let policy = &config.affordability;
    let monthly_income = profile.total_monthly_income();
    let recommended_rent = monthly_income / policy.recommended_rent_divisor;

    let income_multiple = match profile.max_rent_budget {
        Some(budget) if budget > 0.0 => monthly_income / budget,
        _ => 0.0,
    };

    let tier = if income_multiple >= policy.strong_multiple {
        AffordabilityTier::Strong
    } else if income_multiple >= policy.borderline_multiple {
        AffordabilityTier::Borderline
    } else {
        AffordabilityTier::Poor
    };

    let points = match tier {
        AffordabilityTier::Strong => policy.strong_points,
        AffordabilityTier::Borderline => policy.borderline_points,
        AffordabilityTier::Poor if income_multiple >= policy.fair_multiple => policy.fair_points,
        AffordabilityTier::Poor => 0,
    };

    (
        AffordabilityAssessment {
            monthly_income,
            income_multiple,
            recommended_rent,
            tier,
        },
        points,
    )
}

pub(crate) fn assess_employment(
    profile: &RiskProfile,
    as_of: NaiveDate,
    config: &RiskConfig,
) -> EmploymentAssessment {
    let policy = &config.employment;
    let tenure_months = profile
        .employment
        .start_date
        .map(|start| months_between(start, as_of))
        .unwrap_or(0);

    let mut raw = 0u32;
    if tenure_months >= policy.long_tenure_months {
        raw += u32::from(policy.long_tenure_points);
    } else if tenure_months >= policy.mid_tenure_months {
        raw += u32::from(policy.mid_tenure_points);
    }

    raw += u32::from(match profile.employment.status {
        EmploymentStatus::Employed => policy.employed_points,
        EmploymentStatus::Student if profile.total_monthly_income() > 0.0 => policy.student_points,
        EmploymentStatus::Student => 0,
        EmploymentStatus::SelfEmployed => policy.self_employed_points,
        EmploymentStatus::Unemployed => 0,
    });

    let multi_job_bonus = profile.verified_source_count() > 1;
    if multi_job_bonus {
        raw += u32::from(policy.multi_source_bonus);
    }

    EmploymentAssessment {
        score: scale_component(raw, policy.weight, policy.cap),
        tenure_months,
        multi_job_bonus,
    }
}

pub(crate) fn assess_housing(profile: &RiskProfile, config: &RiskConfig) -> HousingAssessment {
    let policy = &config.housing;
    let housing = &profile.housing;

    let tenure_months = housing.months_at_current_address.unwrap_or(0);
    let current_tenure_score = if tenure_months >= policy.settled_tenure_months {
        policy.settled_tenure_points
    } else if tenure_months >= policy.one_year_tenure_months {
        policy.one_year_tenure_points
    } else if tenure_months >= policy.six_month_tenure_months {
        policy.six_month_tenure_points
    } else {
        0
    };

    let mut raw = u32::from(current_tenure_score);

    let history_months = housing.total_history_months.unwrap_or(0);
    if history_months >= policy.long_history_months {
        raw += u32::from(policy.long_history_points);
    } else if history_months >= policy.mid_history_months {
        raw += u32::from(policy.mid_history_points);
    }

    raw += u32::from(match housing.status {
        HousingStatus::Renter => policy.renter_points,
        HousingStatus::Homeowner => policy.homeowner_points,
        HousingStatus::LivingWithFamily => 0,
    });

    if housing.landlord_reference {
        raw += u32::from(policy.landlord_reference_points);
    }

    HousingAssessment {
        score: scale_component(raw, policy.weight, policy.cap),
        total_years_history: f64::from(history_months) / 12.0,
        current_tenure_score,
    }
}

pub(crate) fn verification_bonus(profile: &RiskProfile, config: &RiskConfig) -> u8 {
    let policy = &config.verification;
    let mut bonus = 0u8;
    if profile.housing.landlord_reference {
        bonus = bonus.saturating_add(policy.landlord_reference_bonus);
    }
    if profile.verified_source_count() > 1 {
        bonus = bonus.saturating_add(policy.multi_income_bonus);
    }
    bonus
}

/// Each flag is evaluated independently; multiple may co-occur. Order is
/// fixed so reports are deterministic.
pub(crate) fn detect_red_flags(profile: &RiskProfile, config: &RiskConfig) -> Vec<FlagRecord> {
    let policy = &config.red_flags;
    let mut flags = Vec::new();
    let monthly_income = profile.total_monthly_income();

    if let Some(budget) = profile.max_rent_budget {
        if budget > 0.0
            && monthly_income > 0.0
            && budget > monthly_income * policy.rent_to_income_critical_share
        {
            flags.push(FlagRecord {
                severity: FlagSeverity::Critical,
                message: "rent budget exceeds half of reported monthly income".to_string(),
            });
        }
    }

    if is_blank(&profile.phone) {
        flags.push(FlagRecord {
            severity: FlagSeverity::Warning,
            message: "missing phone number".to_string(),
        });
    }
    if is_blank(&profile.email) {
        flags.push(FlagRecord {
            severity: FlagSeverity::Warning,
            message: "missing email address".to_string(),
        });
    }
    if profile.verified_source_count() == 0 {
        flags.push(FlagRecord {
            severity: FlagSeverity::Warning,
            message: "no verified income source on file".to_string(),
        });
    }

    if profile.housing.prior_eviction {
        flags.push(FlagRecord {
            severity: FlagSeverity::Critical,
            message: "prior eviction reported".to_string(),
        });
    }

    if let Some(budget) = profile.max_rent_budget {
        if budget > 0.0 && budget < policy.minimum_market_rent {
            flags.push(FlagRecord {
                severity: FlagSeverity::Warning,
                message: format!(
                    "rent budget below the ${:.0} market floor",
                    policy.minimum_market_rent
                ),
            });
        }
    }

    flags
}

/// Broker follow-ups derived from what the profile claims.
pub(crate) fn recommendations(profile: &RiskProfile) -> Vec<String> {
    let mut actions = Vec::new();
    if profile.total_monthly_income() > 0.0 {
        actions.push("Request recent pay stubs to verify reported income".to_string());
    }
    if profile.housing.landlord_reference {
        actions.push("Contact current landlord for a rental reference".to_string());
    }
    actions.push("Run a credit check to verify financial responsibility".to_string());
    if profile.total_monthly_income() * 12.0 > 50_000.0 {
        actions.push("Request bank statements for income verification".to_string());
    }
    actions
}

pub(crate) fn confidence(profile: &RiskProfile) -> ConfidenceLevel {
    let mut completeness = 0u32;
    if profile.total_monthly_income() > 0.0 {
        completeness += 25;
    }
    if profile.employment.start_date.is_some() {
        completeness += 20;
    }
    if profile.housing.landlord_reference {
        completeness += 15;
    }
    if profile.housing.months_at_current_address.is_some() {
        completeness += 15;
    }
    if profile.housing.total_history_months.is_some() {
        completeness += 10;
    }
    if profile.income_sources.len() > 1 {
        completeness += 10;
    }
    if !is_blank(&profile.phone) || !is_blank(&profile.email) {
        completeness += 5;
    }

    if completeness >= 80 {
        ConfidenceLevel::High
    } else if completeness >= 50 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

fn scale_component(raw: u32, weight: f64, cap: u8) -> u8 {
    let scaled = (f64::from(raw) * weight).round();
    (scaled as u32).min(u32::from(cap)) as u8
}

fn is_blank(value: &Option<String>) -> bool {
    value
        .as_deref()
        .map(str::trim)
        .map_or(true, str::is_empty)
}

/// Whole months elapsed between two dates; partial months are floored and
/// dates in the future contribute zero.
pub(crate) fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if start >= end {
        return 0;
    }
    let mut months =
        (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32);
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}
