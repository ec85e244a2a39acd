// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Driving route segments between consecutive waypoints.

use geo::LineString;
use geojson::{Feature, Geometry, Value};

use crate::models::Color;

/// One leg of the trip: the road geometry from waypoint `index` to
/// waypoint `index + 1`, colored with the departure waypoint's ramp color.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    pub index: usize,
    pub geometry: LineString<f64>,
    pub color: Color,
}

impl RouteSegment {
    /// GeoJSON line feature for this leg.
    pub fn to_feature(&self) -> Feature {
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(Value::from(&self.geometry))),
            id: Some(geojson::feature::Id::Number(self.index.into())),
            properties: None,
            foreign_members: None,
        }
    }
}
