// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Itinerary waypoints: where we stayed and when.

use chrono::NaiveDate;
use geo::Coord;
use geojson::{Feature, Geometry, JsonObject, JsonValue, Value};
use serde::Deserialize;

/// One itinerary record exactly as it appears in `itinerary.json`.
///
/// Coordinates are a `"lat,lng"` string and dates are ISO `YYYY-MM-DD`
/// strings; [`crate::services::DatasetService`] validates and converts them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawWaypoint {
    pub name: String,
    pub coordinates: String,
    pub start_date: String,
    pub end_date: String,
    /// Display text for the stay, e.g. `"Aug 1 - Aug 18"`.
    pub dates: String,
    pub info: String,
    #[serde(default)]
    pub link: Option<String>,
    /// Hidden waypoints keep their position in the itinerary (and their ramp
    /// color) but are not drawn and cannot be hovered.
    #[serde(default)]
    pub hidden: bool,
}

/// A validated waypoint with typed coordinates and dates.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    /// Zero-based position in the itinerary. Stable across loads.
    pub id: usize,
    pub name: String,
    /// `x` is longitude, `y` is latitude.
    pub coordinates: Coord<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Free-text date range shown in popups, taken verbatim from the dataset.
    pub date_text: String,
    pub info: String,
    pub link: Option<String>,
    pub hidden: bool,
}

impl Waypoint {
    /// Length of the stay in days. Zero-length stays are possible when a
    /// waypoint was only a same-day stopover.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// GeoJSON point feature for this waypoint. The feature id is the
    /// waypoint id, so hit results map straight back to the itinerary.
    pub fn to_feature(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), JsonValue::from(self.name.clone()));

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![
                self.coordinates.x,
                self.coordinates.y,
            ]))),
            id: Some(geojson::feature::Id::Number(self.id.into())),
            properties: Some(properties),
            foreign_members: None,
        }
    }
}
