mod app;
mod ui;

use std::process::exit;

use clap::Parser;
use nearby_core::config::{LocationSource, NearbyConfig};
use nearby_core::places::PlaceType;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nearby_ui", about = "Nearby services map")]
struct Args {
    /// Places provider credential
    #[arg(long, env = "NEARBY_MAPS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Location source: `ip`, `off`, `none` or `lat,lng`
    #[arg(long)]
    location: Option<LocationSource>,
    /// Initially selected place type
    #[arg(long = "type")]
    place_type: Option<String>,
    /// Initial search radius in metres
    #[arg(long)]
    radius: Option<u32>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = match NearbyConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            exit(2);
        }
    };
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

    ui::app_shell::run(config)
}
