// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapbox Directions API client for prefetching driving routes.
//!
//! Handles:
//! - One driving-route request per consecutive waypoint pair
//! - Writing route geometries to the on-disk cache `PathService` reads
//! - Rate limit detection (429)

use crate::error::AtlasError;
use crate::models::Waypoint;
use crate::services::paths::path_file_name;
use geo::{Coord, LineString};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Mapbox Directions API client.
#[derive(Clone)]
pub struct DirectionsClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl DirectionsClient {
    /// Create a new client with a Mapbox access token.
    pub fn new(access_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://api.mapbox.com".to_string(),
            access_token,
        }
    }

    /// Fetch the driving route between two points as a line string.
    pub async fn driving_route(
        &self,
        from: &Waypoint,
        to: &Waypoint,
    ) -> Result<LineString<f64>, DirectionsError> {
        let response = self
            .http
            .get(self.route_url(from.coordinates, to.coordinates))
            .query(&self.query_pairs())
            .send()
            .await
            .map_err(|e| DirectionsError::Request(e.to_string()))?;

        let directions: DirectionsResponse = self.check_response_json(response).await?;
        route_line(directions, &from.name, &to.name)
    }

    /// Fetch and cache every route segment for the itinerary, one file per
    /// consecutive pair, overwriting stale files. Returns the number of
    /// segments written.
    ///
    /// Requests run sequentially. The whole cache is a dozen requests, so
    /// there is no point risking the rate limit with parallelism.
    pub async fn fetch_all(
        &self,
        waypoints: &[Waypoint],
        dir: &Path,
    ) -> Result<usize, AtlasError> {
        fs::create_dir_all(dir)?;

        let mut written = 0;
        for (index, pair) in waypoints.windows(2).enumerate() {
            // A path separator in a waypoint name would put the cache file
            // outside `dir`.
            let file_name = path_file_name(index, &pair[0].name, &pair[1].name);
            if Path::new(&file_name).components().count() != 1 {
                return Err(AtlasError::Internal(anyhow::anyhow!(
                    "Route file name {:?} escapes the cache directory",
                    file_name
                )));
            }

            let line = self.driving_route(&pair[0], &pair[1]).await?;

            let geometry = geojson::Geometry::new(geojson::Value::from(&line));
            let json = serde_json::to_string_pretty(&geometry)?;
            fs::write(dir.join(&file_name), json)?;

            tracing::info!(
                index,
                from = %pair[0].name,
                to = %pair[1].name,
                points = line.0.len(),
                "Cached route segment"
            );
            written += 1;
        }

        Ok(written)
    }

    /// Request URL with the lng,lat;lng,lat pair percent-encoded into the
    /// path, the way the Directions API expects it.
    fn route_url(&self, from: Coord<f64>, to: Coord<f64>) -> String {
        let pair = format!("{},{};{},{}", from.x, from.y, to.x, to.y);
        format!(
            "{}/directions/v5/mapbox/driving/{}",
            self.base_url,
            urlencoding::encode(&pair)
        )
    }

    /// Query string every route request carries.
    fn query_pairs(&self) -> [(&'static str, &str); 5] {
        [
            ("alternatives", "false"),
            ("geometries", "geojson"),
            ("overview", "full"),
            ("steps", "false"),
            ("access_token", self.access_token.as_str()),
        ]
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, DirectionsError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Mapbox rate limit hit (429)");
                return Err(DirectionsError::RateLimited);
            }

            return Err(DirectionsError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| DirectionsError::Request(format!("JSON parse error: {}", e)))
    }
}

/// Directions API response, trimmed to the fields we read.
#[derive(Debug, Clone, Deserialize)]
struct DirectionsResponse {
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Clone, Deserialize)]
struct DirectionsRoute {
    geometry: geojson::Geometry,
}

/// Take the first route's geometry as a line string.
fn route_line(
    directions: DirectionsResponse,
    from: &str,
    to: &str,
) -> Result<LineString<f64>, DirectionsError> {
    let route = directions
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| DirectionsError::NoRoute {
            from: from.to_string(),
            to: to.to_string(),
        })?;

    route
        .geometry
        .value
        .try_into()
        .map_err(|e: geojson::Error| DirectionsError::InvalidGeometry(e.to_string()))
}

/// Errors from the Directions API.
#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    #[error("Directions request failed: {0}")]
    Request(String),

    #[error("Directions API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Directions API rate limit hit")]
    RateLimited,

    #[error("No route found from {from} to {to}")]
    NoRoute { from: String, to: String },

    #[error("Route geometry is not a LineString: {0}")]
    InvalidGeometry(String),
}
