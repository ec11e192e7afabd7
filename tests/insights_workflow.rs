use chrono::NaiveDate;

use rental_match::config::{EngineConfig, RiskConfig};
use rental_match::workflows::insights::{
    AffordabilityTier, ApplicantId, EmploymentRecord, EmploymentStatus, FlagSeverity,
    HousingRecord, HousingStatus, IncomeSource, InsightsEngine, RiskLevel, RiskProfile,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn applicant() -> RiskProfile {
    RiskProfile {
        applicant_id: ApplicantId("app-0042".to_string()),
        max_rent_budget: Some(3000.0),
        income_sources: vec![IncomeSource {
            label: "Employer".to_string(),
            monthly_amount: 9000.0,
            verified: true,
        }],
        employment: EmploymentRecord {
            status: EmploymentStatus::Employed,
            start_date: Some(date(2022, 3, 15)),
        },
        housing: HousingRecord {
            status: HousingStatus::Renter,
            months_at_current_address: Some(28),
            total_history_months: Some(84),
            landlord_reference: true,
            prior_eviction: false,
        },
        phone: Some("555-0142".to_string()),
        email: Some("applicant@example.com".to_string()),
    }
}

#[test]
fn full_report_for_a_strong_applicant() {
    let engine = InsightsEngine::new(RiskConfig::default()).expect("default config validates");
    let report = engine.analyze(&applicant(), date(2026, 8, 1));

    assert_eq!(report.affordability.tier, AffordabilityTier::Strong);
    assert_eq!(report.affordability.recommended_rent, 3000.0);
    assert_eq!(report.risk_level, RiskLevel::Low);
    assert!(report.red_flags.is_empty());
    assert!(report
        .recommendations
        .iter()
        .any(|action| action.contains("credit check")));
    assert!(report.summary().contains("LOW RISK"));
}

#[test]
fn degraded_profile_surfaces_warnings_instead_of_errors() {
    let engine = InsightsEngine::new(RiskConfig::default()).expect("default config validates");

    let mut subject = applicant();
    subject.phone = None;
    subject.income_sources[0].verified = false;
    subject.housing.prior_eviction = true;

    let report = engine.analyze(&subject, date(2026, 8, 1));

    let severities: Vec<_> = report
        .red_flags
        .iter()
        .map(|flag| flag.severity)
        .collect();
    assert_eq!(
        severities,
        [
            FlagSeverity::Warning,
            FlagSeverity::Warning,
            FlagSeverity::Critical
        ]
    );
}

#[test]
fn report_serializes_for_dashboard_consumers() {
    let engine = InsightsEngine::new(RiskConfig::default()).expect("default config validates");
    let report = engine.analyze(&applicant(), date(2026, 8, 1));

    let payload = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(payload["applicant_id"], "app-0042");
    assert_eq!(payload["risk_level"], "Low");
    assert!(payload["overall_score"].as_u64().expect("score present") >= 80);
}

#[test]
fn engine_rejects_malformed_configuration_up_front() {
    let mut config = EngineConfig::default();
    config.risk.thresholds.high = 90;

    assert!(InsightsEngine::new(config.risk).is_err());
}
