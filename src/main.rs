// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trip-Atlas CLI
//!
//! Prefetches driving routes for the trip itinerary and exports the static
//! map bundle the travel page serves.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trip_atlas::{
    bundle::{MapBundle, BUNDLE_FILE},
    config::Config,
    error::AtlasError,
    services::{DatasetService, DirectionsClient, PathService},
};

#[derive(Parser)]
#[command(name = "trip-atlas", version, about = "Travel itinerary map tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch driving routes from the Mapbox Directions API into the cache
    FetchPaths,
    /// Export the static map bundle
    Export {
        /// Viewport width the cameras are computed for, in pixels
        #[arg(long, default_value_t = 1280.0)]
        width: f64,
        /// Viewport height the cameras are computed for, in pixels
        #[arg(long, default_value_t = 800.0)]
        height: f64,
    },
    /// Load and validate the dataset and route cache without writing
    Check,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env().expect("Failed to load configuration");

    match cli.command {
        Commands::FetchPaths => fetch_paths(&config).await?,
        Commands::Export { width, height } => export(&config, (width, height))?,
        Commands::Check => check(&config)?,
    }

    Ok(())
}

/// Fetch one driving route per consecutive waypoint pair and cache them.
async fn fetch_paths(config: &Config) -> Result<(), AtlasError> {
    let token = config.require_mapbox_token()?;
    let dataset = DatasetService::load_from_files(&config.itinerary_file, &config.parks_file)?;

    let client = DirectionsClient::new(token.to_string());
    let written = client
        .fetch_all(dataset.waypoints(), &config.paths_dir)
        .await?;

    tracing::info!(
        written,
        dir = %config.paths_dir.display(),
        "Route cache refreshed"
    );
    Ok(())
}

/// Build and write the static map bundle.
fn export(config: &Config, viewport: (f64, f64)) -> Result<(), AtlasError> {
    let dataset = DatasetService::load_from_files(&config.itinerary_file, &config.parks_file)?;
    let paths = PathService::load_from_dir(&config.paths_dir, dataset.waypoints())?;
    let today = chrono::Local::now().date_naive();

    let bundle = MapBundle::build(&dataset, &paths, today, &config.journal_url, viewport);
    bundle.write(&config.output_dir.join(BUNDLE_FILE))?;
    Ok(())
}

/// Load everything and log a summary. Loader errors set the exit code.
fn check(config: &Config) -> Result<(), AtlasError> {
    let dataset = DatasetService::load_from_files(&config.itinerary_file, &config.parks_file)?;
    let paths = PathService::load_from_dir(&config.paths_dir, dataset.waypoints())?;

    for waypoint in dataset.waypoints() {
        tracing::info!(
            id = waypoint.id,
            name = %waypoint.name,
            dates = %waypoint.date_text,
            days = waypoint.duration_days(),
            hidden = waypoint.hidden,
            "Waypoint"
        );
    }

    // Gaps are legal but usually mean a typo in the dataset.
    for pair in dataset.waypoints().windows(2) {
        if pair[0].end_date != pair[1].start_date {
            tracing::warn!(
                from = %pair[0].name,
                to = %pair[1].name,
                "Itinerary dates are not contiguous"
            );
        }
    }

    tracing::info!(
        waypoints = dataset.waypoints().len(),
        parks = dataset.parks().len(),
        segments = paths.segments().len(),
        "Dataset valid"
    );
    Ok(())
}

/// Initialize logging with an env-filter, defaulting to debug for the crate.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer().with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("trip_atlas=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
