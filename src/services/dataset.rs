// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Itinerary and park dataset loading service.

use crate::models::{ParkMarker, RawParkMarker, RawWaypoint, Waypoint};
use chrono::NaiveDate;
use geo::Coord;
use std::fs;
use std::path::Path;

/// Service holding the validated itinerary and park markers.
#[derive(Debug, Default, Clone)]
pub struct DatasetService {
    waypoints: Vec<Waypoint>,
    parks: Vec<ParkMarker>,
}

impl DatasetService {
    /// Load the itinerary and parks from JSON files.
    pub fn load_from_files<P: AsRef<Path>>(
        itinerary_path: P,
        parks_path: P,
    ) -> Result<Self, DatasetError> {
        let itinerary_json = fs::read_to_string(itinerary_path.as_ref())
            .map_err(|e| DatasetError::IoError(e.to_string()))?;
        let parks_json = fs::read_to_string(parks_path.as_ref())
            .map_err(|e| DatasetError::IoError(e.to_string()))?;
        Self::load_from_json(&itinerary_json, &parks_json)
    }

    /// Load the itinerary and parks from JSON strings.
    ///
    /// Waypoint ids are assigned from input order, starting at 0. Any
    /// malformed coordinate or date fails the whole load; a half-loaded
    /// itinerary would desynchronize route colors downstream.
    pub fn load_from_json(itinerary_json: &str, parks_json: &str) -> Result<Self, DatasetError> {
        let raw_waypoints: Vec<RawWaypoint> = serde_json::from_str(itinerary_json)
            .map_err(|e| DatasetError::ParseError(e.to_string()))?;
        let raw_parks: Vec<RawParkMarker> = serde_json::from_str(parks_json)
            .map_err(|e| DatasetError::ParseError(e.to_string()))?;

        let mut waypoints = Vec::with_capacity(raw_waypoints.len());
        for (id, raw) in raw_waypoints.into_iter().enumerate() {
            waypoints.push(Self::convert_waypoint(id, raw)?);
        }

        let mut parks = Vec::with_capacity(raw_parks.len());
        for raw in raw_parks {
            let coordinates = Self::parse_coordinates(&raw.name, &raw.coordinates)?;
            parks.push(ParkMarker {
                name: raw.name,
                coordinates,
            });
        }

        tracing::info!(
            count = waypoints.len(),
            parks = parks.len(),
            "Loaded itinerary"
        );
        Ok(Self { waypoints, parks })
    }

    fn convert_waypoint(id: usize, raw: RawWaypoint) -> Result<Waypoint, DatasetError> {
        let coordinates = Self::parse_coordinates(&raw.name, &raw.coordinates)?;
        let start_date = Self::parse_date(&raw.name, &raw.start_date)?;
        let end_date = Self::parse_date(&raw.name, &raw.end_date)?;
        if start_date > end_date {
            return Err(DatasetError::DateRange { record: raw.name });
        }

        Ok(Waypoint {
            id,
            name: raw.name,
            coordinates,
            start_date,
            end_date,
            date_text: raw.dates,
            info: raw.info,
            link: raw.link,
            hidden: raw.hidden,
        })
    }

    /// Parse a `"lat,lng"` string into a lng/lat coordinate.
    fn parse_coordinates(record: &str, value: &str) -> Result<Coord<f64>, DatasetError> {
        let invalid = || DatasetError::InvalidCoordinates {
            record: record.to_string(),
            value: value.to_string(),
        };

        let parts: Vec<&str> = value.split(',').collect();
        if parts.len() != 2 {
            return Err(invalid());
        }
        let lat: f64 = parts[0].trim().parse().map_err(|_| invalid())?;
        let lng: f64 = parts[1].trim().parse().map_err(|_| invalid())?;
        if !lat.is_finite() || !lng.is_finite() {
            return Err(invalid());
        }

        // Dataset stores "lat,lng"; the map works in lng/lat order.
        Ok(Coord { x: lng, y: lat })
    }

    fn parse_date(record: &str, value: &str) -> Result<NaiveDate, DatasetError> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| DatasetError::InvalidDate {
            record: record.to_string(),
            value: value.to_string(),
        })
    }

    /// All waypoints in itinerary order, hidden ones included.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Waypoints that get a marker on the map.
    pub fn visible_waypoints(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter().filter(|w| !w.hidden)
    }

    /// Park markers in dataset order.
    pub fn parks(&self) -> &[ParkMarker] {
        &self.parks
    }

    /// Look up a waypoint by id.
    pub fn waypoint(&self, id: usize) -> Option<&Waypoint> {
        self.waypoints.get(id)
    }

    /// Coordinates of the last waypoint we had arrived at by `today`, or
    /// None before the trip starts.
    pub fn current_location(&self, today: NaiveDate) -> Option<Coord<f64>> {
        self.waypoints
            .iter()
            .rev()
            .find(|w| w.start_date <= today)
            .map(|w| w.coordinates)
    }
}

/// Errors from dataset loading.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse JSON: {0}")]
    ParseError(String),

    #[error("Invalid coordinates for {record}: {value:?} (expected \"lat,lng\")")]
    InvalidCoordinates { record: String, value: String },

    #[error("Invalid date for {record}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { record: String, value: String },

    #[error("Start date is after end date for {record}")]
    DateRange { record: String },
}
