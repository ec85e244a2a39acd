//! Application configuration loaded from environment variables.
//!
//! Everything has a default pointing at the committed dataset, so `export`
//! and `check` run with no environment at all. Only `fetch-paths` needs a
//! Mapbox token.

use std::env;
use std::path::PathBuf;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Data files ---
    /// Itinerary JSON file.
    pub itinerary_file: PathBuf,
    /// Park markers JSON file.
    pub parks_file: PathBuf,
    /// Directory holding the cached route geometries.
    pub paths_dir: PathBuf,
    /// Directory the bundle export writes into.
    pub output_dir: PathBuf,

    // --- Page metadata ---
    /// Travel journal URL linked from the exported bundle.
    pub journal_url: String,

    // --- Secrets ---
    /// Mapbox access token, required only by `fetch-paths`.
    pub mapbox_token: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            itinerary_file: PathBuf::from("data/itinerary.json"),
            parks_file: PathBuf::from("data/parks.json"),
            paths_dir: PathBuf::from("data/paths"),
            output_dir: PathBuf::from("dist"),
            journal_url: "https://docs.google.com/document/d/trip-journal".to_string(),
            mapbox_token: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            itinerary_file: env::var("TRIP_ATLAS_DATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/itinerary.json")),
            parks_file: env::var("TRIP_ATLAS_PARKS")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/parks.json")),
            paths_dir: env::var("TRIP_ATLAS_PATHS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/paths")),
            output_dir: env::var("TRIP_ATLAS_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("dist")),
            journal_url: env::var("TRIP_JOURNAL_URL").unwrap_or_else(|_| {
                "https://docs.google.com/document/d/trip-journal".to_string()
            }),
            mapbox_token: env::var("MAPBOX_ACCESS_TOKEN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    /// Mapbox token, or a config error naming the variable to set.
    pub fn require_mapbox_token(&self) -> Result<&str, ConfigError> {
        self.mapbox_token
            .as_deref()
            .ok_or(ConfigError::Missing("MAPBOX_ACCESS_TOKEN"))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
