// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cached driving-route loading service.
//!
//! Route geometries are fetched once by `fetch-paths` and committed under
//! `data/paths/`, one file per consecutive waypoint pair. This service only
//! reads the cache; it never talks to the network.

use crate::models::{Color, RouteSegment, Waypoint};
use geo::LineString;
use geojson::GeoJson;
use std::fs;
use std::path::Path;

/// Service holding the trip's route segments in itinerary order.
#[derive(Default, Clone)]
pub struct PathService {
    segments: Vec<RouteSegment>,
}

impl PathService {
    /// Load one cached route per consecutive waypoint pair from `dir`.
    ///
    /// Segment `i` runs from waypoint `i` to waypoint `i + 1` and takes
    /// waypoint `i`'s ramp color. A missing or malformed file fails the
    /// whole load; skipping a segment would shift every later color.
    pub fn load_from_dir<P: AsRef<Path>>(
        dir: P,
        waypoints: &[Waypoint],
    ) -> Result<Self, PathError> {
        let colors = Color::ramp(waypoints.len());
        let mut segments = Vec::new();

        for (index, pair) in waypoints.windows(2).enumerate() {
            let file_name = path_file_name(index, &pair[0].name, &pair[1].name);
            let path = dir.as_ref().join(&file_name);
            let json = fs::read_to_string(&path).map_err(|_| PathError::MissingSegment {
                index,
                path: path.display().to_string(),
            })?;

            let geometry = parse_line_geometry(&path.display().to_string(), &json)?;
            segments.push(RouteSegment {
                index,
                geometry,
                color: colors[index],
            });
        }

        tracing::info!(count = segments.len(), "Loaded route segments");
        Ok(Self { segments })
    }

    /// Route segments in itinerary order.
    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }
}

/// Cache file name for segment `index`, spaces stripped from names:
/// `path_0-SanFrancisco-LakeTahoe.json`.
pub fn path_file_name(index: usize, from: &str, to: &str) -> String {
    format!(
        "path_{}-{}-{}.json",
        index,
        from.replace(' ', ""),
        to.replace(' ', "")
    )
}

/// Parse a cache file holding a bare GeoJSON LineString geometry.
fn parse_line_geometry(path: &str, json: &str) -> Result<LineString<f64>, PathError> {
    let geojson: GeoJson = json.parse().map_err(|e: geojson::Error| PathError::ParseError {
        path: path.to_string(),
        message: e.to_string(),
    })?;

    let geometry = match geojson {
        GeoJson::Geometry(geometry) => geometry,
        _ => {
            return Err(PathError::NotALineString {
                path: path.to_string(),
            })
        }
    };

    geometry.value.try_into().map_err(|_| PathError::NotALineString {
        path: path.to_string(),
    })
}

/// Errors from route cache loading.
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("Missing route segment {index}: {path} (run fetch-paths to rebuild the cache)")]
    MissingSegment { index: usize, path: String },

    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Expected a LineString geometry in {path}")]
    NotALineString { path: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_file_name_strips_spaces() {
        assert_eq!(
            path_file_name(0, "San Francisco", "Lake Tahoe"),
            "path_0-SanFrancisco-LakeTahoe.json"
        );
        assert_eq!(
            path_file_name(11, "Boise", "Los Angeles"),
            "path_11-Boise-LosAngeles.json"
        );
    }

    #[test]
    fn test_parse_line_geometry() {
        let json = r#"{"type": "LineString", "coordinates": [[-122.4, 37.8], [-120.0, 39.1]]}"#;
        let line = parse_line_geometry("test.json", json).unwrap();
        assert_eq!(line.0.len(), 2);
        assert_eq!(line.0[0].x, -122.4);
    }

    #[test]
    fn test_parse_rejects_point_geometry() {
        let json = r#"{"type": "Point", "coordinates": [-122.4, 37.8]}"#;
        let err = parse_line_geometry("test.json", json).unwrap_err();
        assert!(matches!(err, PathError::NotALineString { .. }));
    }

    #[test]
    fn test_parse_rejects_feature_wrapper() {
        let json = r#"{
            "type": "Feature",
            "properties": {},
            "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}
        }"#;
        let err = parse_line_geometry("test.json", json).unwrap_err();
        assert!(matches!(err, PathError::NotALineString { .. }));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_line_geometry("test.json", "not json").unwrap_err();
        assert!(matches!(err, PathError::ParseError { .. }));
    }
}
