//! Headless nearby search: locate, search once, print the ranked list.
//!
//! Run with: cargo run -p nearby_core --example nearby_search --features google-places,ip-location -- --type atm --radius 1500

use std::path::PathBuf;
use std::process::exit;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use nearby_core::analysis::QuickAnalysis;
use nearby_core::bootstrap::start_session;
use nearby_core::config::{LocationSource, NearbyConfig};
use nearby_core::export::{export_to_csv, export_to_json, write_csv, write_json};
use nearby_core::places::PlaceType;
use nearby_core::ranking::SearchResultSet;
use nearby_core::session::SearchStatus;
use nearby_core::worker::{ProviderWorker, GEOLOCATION_TIMEOUT};
use tracing_subscriber::EnvFilter;

const SEARCH_WAIT: Duration = Duration::from_secs(30);

#[derive(Parser)]
#[command(name = "nearby_search", about = "Find nearby places from the command line")]
struct Args {
    /// Places provider credential
    #[arg(long, env = "NEARBY_MAPS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Location source: `ip`, `off`, `none` or `lat,lng`
    #[arg(long, env = "NEARBY_LOCATION")]
    location: Option<LocationSource>,
    /// Place type (pharmacy, atm, hospital, restaurant, bank, supermarket, …)
    #[arg(long = "type")]
    place_type: Option<String>,
    /// Search radius in metres (500–5000)
    #[arg(long)]
    radius: Option<u32>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// Write csv/json output to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("error: {err}");
        exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = NearbyConfig::from_env()?;
    if args.api_key.is_some() {
        config.api_key = args.api_key;
    }
    if let Some(location) = args.location {
        config.location = location;
    }
    if let Some(kind) = args.place_type {
        config.search.place_type = PlaceType::from(kind);
    }
    if let Some(radius) = args.radius {
        config.search.radius_m = radius;
    }

    if let Some(warning) = config.availability().warning() {
        eprintln!("{warning}");
    }
    let (mut session, worker) = start_session(&config);
    let Some(mut worker) = worker else {
        return Err(session
            .failure()
            .map(|err| err.to_string())
            .unwrap_or_else(|| "provider not ready".to_string())
            .into());
    };

    wait_for(&mut worker, &mut session, GEOLOCATION_TIMEOUT + Duration::from_secs(1))?;
    let request = session.begin_search()?;
    println!(
        "Searching {} within {} m of {}",
        request.place_type.label(),
        request.radius_m,
        request.center
    );
    worker.dispatch_search(request);
    wait_for(&mut worker, &mut session, SEARCH_WAIT)?;

    match session.status() {
        SearchStatus::Results => {}
        SearchStatus::Error(err) => return Err(err.to_string().into()),
        _ => {
            println!("No results.");
            return Ok(());
        }
    }

    let results = session.results();
    match (args.format, args.output) {
        (OutputFormat::Table, _) => print_table(results),
        (OutputFormat::Csv, Some(path)) => export_to_csv(results, path)?,
        (OutputFormat::Json, Some(path)) => export_to_json(results, path)?,
        (OutputFormat::Csv, None) => write_csv(results, std::io::stdout().lock())?,
        (OutputFormat::Json, None) => write_json(results, std::io::stdout().lock())?,
    }
    Ok(())
}

fn wait_for(
    worker: &mut ProviderWorker,
    session: &mut nearby_core::session::Session,
    timeout: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let event = worker
        .wait_event(timeout)
        .ok_or("provider did not answer in time")?;
    ProviderWorker::apply(session, event)?;
    if let SearchStatus::Error(err) = session.status() {
        return Err(err.to_string().into());
    }
    Ok(())
}

fn print_table(results: &SearchResultSet) {
    for (idx, place) in results.iter().enumerate() {
        let rating = match place.rating() {
            Some(rating) => format!("{rating} ({})", place.user_ratings_total()),
            None => "No rating".to_string(),
        };
        println!(
            "{:>3}. {:<40} {:>6} m  {:<14} {}",
            idx + 1,
            place.name(),
            place.distance_m(),
            rating,
            place.vicinity()
        );
    }

    let analysis = QuickAnalysis::from_results(results);
    println!("\n--- Quick analysis ---");
    println!("Found: {}", analysis.found);
    println!("Within 500m: {}", analysis.within_500m);
    println!("Within 1km: {}", analysis.within_1km);
    println!(
        "Closest: {}",
        analysis.closest_name.as_deref().unwrap_or("—")
    );
}
