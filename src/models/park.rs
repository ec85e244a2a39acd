// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! National park markers shown alongside the itinerary.

use geo::Coord;
use geojson::{Feature, Geometry, JsonObject, JsonValue, Value};
use serde::Deserialize;

/// One park record as it appears in `parks.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawParkMarker {
    pub name: String,
    /// `"lat,lng"` string, same convention as itinerary records.
    pub coordinates: String,
}

/// A validated park marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkMarker {
    pub name: String,
    /// `x` is longitude, `y` is latitude.
    pub coordinates: Coord<f64>,
}

impl ParkMarker {
    /// GeoJSON point feature for the park symbol layer.
    pub fn to_feature(&self) -> Feature {
        let mut properties = JsonObject::new();
        properties.insert("name".to_string(), JsonValue::from(self.name.clone()));

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::Point(vec![
                self.coordinates.x,
                self.coordinates.y,
            ]))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}
