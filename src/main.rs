use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::info;

use rental_match::config::EngineConfig;
use rental_match::error::AppError;
use rental_match::telemetry;
use rental_match::workflows::insights::{InsightsEngine, RiskProfile, RiskReport};
use rental_match::workflows::matching::{
    listings_from_path, normalize, ListingCandidate, MatchCache, MatchResult, MatchingEngine,
    MatchingService, RawApplicantRecord, ScoreFactor,
};

#[derive(Parser, Debug)]
#[command(
    name = "rental-match",
    about = "Rank candidate listings and assess applicant risk from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank candidate listings against an applicant profile
    Match(MatchArgs),
    /// Produce a Smart Insights risk report for an applicant
    Insights(InsightsArgs),
}

#[derive(Args, Debug)]
struct MatchArgs {
    /// Applicant profile JSON (raw intake shape)
    #[arg(long)]
    applicant: PathBuf,
    /// Candidate listings as a JSON array
    #[arg(long, conflicts_with = "csv")]
    listings: Option<PathBuf>,
    /// Candidate listings as a CSV export
    #[arg(long)]
    csv: Option<PathBuf>,
    /// Show only the best N matches
    #[arg(long, default_value_t = 20)]
    limit: usize,
    /// Engine configuration JSON; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Emit the raw match results as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct InsightsArgs {
    /// Applicant risk profile JSON
    #[arg(long)]
    applicant: PathBuf,
    /// Engine configuration JSON; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Anchor date for tenure arithmetic (defaults to today)
    #[arg(long)]
    as_of: Option<NaiveDate>,
    /// Emit the raw report as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(error) = telemetry::init(
        &std::env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
    ) {
        eprintln!("error: {error}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Command::Match(args) => run_match(args),
        Command::Insights(args) => run_insights(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig, AppError> {
    match path {
        Some(path) => Ok(EngineConfig::from_json_file(path)?),
        None => Ok(EngineConfig::default()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| AppError::InvalidInput {
        path: path.display().to_string(),
        source,
    })
}

fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let config = load_config(args.config.as_ref())?;

    let raw: RawApplicantRecord = read_json(&args.applicant)?;
    let preferences = normalize(&raw);

    let listings: Vec<ListingCandidate> = match (&args.listings, &args.csv) {
        (Some(path), _) => read_json(path)?,
        (None, Some(path)) => listings_from_path(path)?,
        (None, None) => Vec::new(),
    };
    info!(candidates = listings.len(), "loaded candidate listings");

    let engine = MatchingEngine::new(config.matching)?;
    let service = MatchingService::new(engine, Arc::new(MatchCache::new()));
    let matches = service.top(&preferences, &listings, args.limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    render_matches(&matches, listings.len(), preferences.strict_mode);
    Ok(())
}

fn render_matches(matches: &[MatchResult], candidates: usize, strict_mode: bool) {
    println!("Apartment matches");
    println!(
        "Candidates considered: {} (strict mode {})",
        candidates,
        if strict_mode { "on" } else { "off" }
    );

    if matches.is_empty() {
        println!("\nNo listings passed the hard filters.");
        return;
    }

    println!();
    for (position, result) in matches.iter().enumerate() {
        let basic = result
            .sub_scores
            .get(&ScoreFactor::BasicRequirements)
            .copied()
            .unwrap_or_default();
        let building = result
            .sub_scores
            .get(&ScoreFactor::BuildingAmenities)
            .copied()
            .unwrap_or_default();
        let unit = result
            .sub_scores
            .get(&ScoreFactor::UnitAmenities)
            .copied()
            .unwrap_or_default();
        println!(
            "{:>3}. {} | {:6.2}% | {} | basics {:.1}, building {:.1}, unit {:.1}",
            position + 1,
            result.listing_id.0,
            result.score_percent,
            result.match_level().label(),
            basic,
            building,
            unit
        );
    }
}

fn run_insights(args: InsightsArgs) -> Result<(), AppError> {
    let config = load_config(args.config.as_ref())?;

    let profile: RiskProfile = read_json(&args.applicant)?;
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());

    let engine = InsightsEngine::new(config.risk)?;
    let report = engine.analyze(&profile, as_of);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    render_report(&report, as_of);
    Ok(())
}

fn render_report(report: &RiskReport, as_of: NaiveDate) {
    println!("Smart Insights report for {}", report.applicant_id.0);
    println!("Evaluated as of {as_of}");
    println!("\n{}", report.summary());

    println!("\nComponents");
    println!(
        "- Affordability: {} ({:.1}x income, recommended rent ${:.0})",
        report.affordability.tier.label(),
        report.affordability.income_multiple,
        report.affordability.recommended_rent
    );
    println!(
        "- Employment stability: {}/30 ({} months tenure{})",
        report.employment_stability.score,
        report.employment_stability.tenure_months,
        if report.employment_stability.multi_job_bonus {
            ", multiple income sources"
        } else {
            ""
        }
    );
    println!(
        "- Housing history: {}/20 ({:.1} years of history)",
        report.housing_history.score, report.housing_history.total_years_history
    );
    println!("- Verification bonus: {}/10", report.verification_bonus);

    if report.red_flags.is_empty() {
        println!("\nRed flags: none");
    } else {
        println!("\nRed flags");
        for flag in &report.red_flags {
            println!("- [{}] {}", flag.severity.label(), flag.message);
        }
    }

    println!("\nRecommended follow-ups");
    for action in &report.recommendations {
        println!("- {action}");
    }
}
