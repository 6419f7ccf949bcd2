use crate::{
    catalog::{load_dataset, InMemoryCatalog},
    config::GeneratorConfig,
    store::{InMemoryPlanStore, PlanStore, TripPlanner},
    types::{AccommodationType, TravelPlan, TripRequest, DEFAULT_DEPARTURE},
    ItineraryGenerator,
};
use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::{any::Any, fs, path::PathBuf, sync::Arc, time::Duration};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// CLI entry point for the tripify tool
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();

    match matches.subcommand() {
        Some(("generate", sub)) => generate(sub).await?,
        Some(("modify", sub)) => modify(sub).await?,
        Some(("load-catalog", sub)) => load_catalog(sub)?,
        _ => return Err("a subcommand is required (generate, modify, load-catalog)".into()),
    }

    Ok(())
}

fn command() -> Command {
    Command::new("tripify")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate day-by-day travel itineraries grounded in a local catalog")
        .subcommand_required(true)
        .subcommand(
            generation_args(Command::new("generate").about("Generate a new travel plan"))
                .arg(
                    Arg::new("budget")
                        .short('b')
                        .long("budget")
                        .value_name("KRW")
                        .help("Total budget for the whole party")
                        .value_parser(value_parser!(u64))
                        .required(true),
                )
                .arg(
                    Arg::new("people")
                        .short('p')
                        .long("people")
                        .value_name("COUNT")
                        .value_parser(value_parser!(u32))
                        .default_value("1"),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .value_name("YYYY-MM-DD")
                        .value_parser(parse_date)
                        .required(true),
                )
                .arg(
                    Arg::new("end")
                        .long("end")
                        .value_name("YYYY-MM-DD")
                        .value_parser(parse_date)
                        .required(true),
                )
                .arg(
                    Arg::new("departure")
                        .long("departure")
                        .value_name("PLACE")
                        .default_value(DEFAULT_DEPARTURE),
                )
                .arg(
                    Arg::new("region")
                        .short('r')
                        .long("region")
                        .value_name("REGION")
                        .required(true),
                )
                .arg(
                    Arg::new("style")
                        .short('s')
                        .long("style")
                        .value_name("STYLE")
                        .help("Travel style, e.g. 힐링 or 맛집 탐방")
                        .required(true),
                )
                .arg(
                    Arg::new("accommodation")
                        .long("accommodation")
                        .value_name("TYPE")
                        .help("hotel, motel, pension or guesthouse")
                        .value_parser(|value: &str| value.parse::<AccommodationType>())
                        .default_value("motel"),
                ),
        )
        .subcommand(
            generation_args(
                Command::new("modify").about("Regenerate a saved plan with extra requirements"),
            )
            .arg(
                Arg::new("plan")
                    .long("plan")
                    .value_name("FILE")
                    .help("Travel plan JSON produced by `generate`")
                    .value_parser(value_parser!(PathBuf))
                    .required(true),
            )
            .arg(
                Arg::new("requirements")
                    .long("requirements")
                    .value_name("TEXT")
                    .required(true),
            ),
        )
        .subcommand(
            Command::new("load-catalog")
                .about("Load a tourism dataset directory and print what it contains")
                .arg(
                    Arg::new("dir")
                        .long("dir")
                        .value_name("DIR")
                        .value_parser(value_parser!(PathBuf))
                        .required(true),
                ),
        )
}

/// Flags shared by every subcommand that talks to the generation endpoint.
fn generation_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("catalog-dir")
                .long("catalog-dir")
                .value_name("DIR")
                .help("Dataset directory used as grounding catalog")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("Generation API key (or set GMS_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Generation endpoint (or set GMS_BASE_URL env var)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Request timeout in seconds")
                .value_parser(value_parser!(u64))
                .default_value("30"),
        )
        .arg(
            Arg::new("trace")
                .long("trace")
                .help("Print the generation trace to stderr")
                .action(ArgAction::SetTrue),
        )
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD, got `{value}`: {err}"))
}

fn required<'a, T: Any + Clone + Send + Sync + 'static>(
    matches: &'a ArgMatches,
    name: &str,
) -> anyhow::Result<&'a T> {
    matches
        .get_one::<T>(name)
        .ok_or_else(|| anyhow!("missing required argument --{name}"))
}

fn generator(matches: &ArgMatches) -> anyhow::Result<ItineraryGenerator> {
    let mut config = GeneratorConfig::from_env()
        .with_timeout(Duration::from_secs(*required::<u64>(matches, "timeout")?));
    if let Some(api_key) = matches.get_one::<String>("api-key") {
        config = config.with_api_key(api_key.as_str());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.as_str());
    }
    config.validate()?;
    if !config.has_credential() {
        warn!("no API key configured, plans will be synthetic");
    }
    info!("Base URL: {}", config.base_url);

    let mut catalog = InMemoryCatalog::new();
    if let Some(dir) = matches.get_one::<PathBuf>("catalog-dir") {
        let summary = load_dataset(&mut catalog, dir, false)
            .with_context(|| format!("failed to load catalog from {}", dir.display()))?;
        info!(created = summary.created, "catalog ready");
    }

    Ok(ItineraryGenerator::new(config, Arc::new(catalog)))
}

async fn generate(matches: &ArgMatches) -> anyhow::Result<()> {
    let trip = TripRequest {
        budget: *required::<u64>(matches, "budget")?,
        people_count: *required::<u32>(matches, "people")?,
        start_date: *required::<NaiveDate>(matches, "start")?,
        end_date: *required::<NaiveDate>(matches, "end")?,
        departure_location: required::<String>(matches, "departure")?.clone(),
        region: required::<String>(matches, "region")?.clone(),
        travel_style: required::<String>(matches, "style")?.clone(),
        accommodation_type: *required::<AccommodationType>(matches, "accommodation")?,
    };

    let planner = TripPlanner::new(generator(matches)?, Arc::new(InMemoryPlanStore::new()));
    info!("Generating plan for {}", trip.plan_title());
    let (plan, report) = planner.generate_plan(trip).await?;

    if matches.get_flag("trace") {
        eprintln!("{}", report.replay());
    }
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

async fn modify(matches: &ArgMatches) -> anyhow::Result<()> {
    let path = required::<PathBuf>(matches, "plan")?;
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read plan file {}", path.display()))?;
    let plan: TravelPlan = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a travel plan", path.display()))?;
    let id = plan.id;

    let store = InMemoryPlanStore::new();
    store.insert_plan(plan).await?;
    let planner = TripPlanner::new(generator(matches)?, Arc::new(store));

    let requirements = required::<String>(matches, "requirements")?;
    let modification = planner.modify_plan(id, requirements).await?;
    info!(
        updated = modification.merge.updated,
        created = modification.merge.created,
        "Plan modified"
    );

    if matches.get_flag("trace") {
        eprintln!("{}", modification.report.replay());
    }
    println!("{}", serde_json::to_string_pretty(&modification.plan)?);
    Ok(())
}

fn load_catalog(matches: &ArgMatches) -> anyhow::Result<()> {
    let dir = required::<PathBuf>(matches, "dir")?;
    let mut catalog = InMemoryCatalog::new();
    let summary = load_dataset(&mut catalog, dir, true)
        .with_context(|| format!("failed to load catalog from {}", dir.display()))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "created": summary.created,
            "skipped": summary.skipped,
            "failed_files": summary.failed_files,
            "places": catalog.place_count(),
            "festivals": catalog.festival_count(),
        }))?
    );
    Ok(())
}
