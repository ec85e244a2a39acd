// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map layer specs in the engine's JSON style-layer shape.

use geojson::{Feature, FeatureCollection, JsonObject};
use serde::Serialize;
use serde_json::json;

use crate::models::{Color, ParkMarker, RouteSegment, Waypoint};

/// Circle layer holding every visible waypoint marker.
pub const DESTINATIONS_LAYER: &str = "destinations";

/// Symbol layer holding the park markers.
pub const PARKS_LAYER: &str = "parks";

/// Symbol layer holding the single current-location marker.
pub const CURRENT_LOCATION_LAYER: &str = "current-location";

/// Route line layers are `route-0`, `route-1`, ... in itinerary order.
pub const ROUTE_LAYER_PREFIX: &str = "route-";

/// One style layer with an inline GeoJSON source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub source: SourceSpec,
    #[serde(skip_serializing_if = "JsonObject::is_empty")]
    pub layout: JsonObject,
    #[serde(skip_serializing_if = "JsonObject::is_empty")]
    pub paint: JsonObject,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Circle,
    Line,
    Symbol,
}

/// Inline GeoJSON source for a layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: FeatureCollection,
}

fn geojson_source(features: Vec<Feature>) -> SourceSpec {
    SourceSpec {
        kind: "geojson".to_string(),
        data: FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        },
    }
}

/// Circle layer for visible waypoints. Each feature carries its ramp color
/// as a `color` property so one layer draws every marker.
///
/// `colors` is indexed by waypoint id and must cover the whole itinerary,
/// one entry per id. Hidden stops keep their ramp slot.
pub fn destination_layer(waypoints: &[Waypoint], colors: &[Color]) -> LayerSpec {
    let features = waypoints
        .iter()
        .filter(|w| !w.hidden)
        .map(|w| {
            let mut feature = w.to_feature();
            feature.set_property("color", colors[w.id].rgba());
            feature
        })
        .collect();

    let mut paint = JsonObject::new();
    paint.insert("circle-radius".to_string(), json!(6));
    paint.insert("circle-color".to_string(), json!(["get", "color"]));
    paint.insert("circle-opacity".to_string(), json!(0.8));

    LayerSpec {
        id: DESTINATIONS_LAYER.to_string(),
        kind: LayerKind::Circle,
        source: geojson_source(features),
        layout: JsonObject::new(),
        paint,
    }
}

/// Line layer for one route segment, colored like its departure waypoint.
pub fn route_layer(segment: &RouteSegment) -> LayerSpec {
    let mut layout = JsonObject::new();
    layout.insert("line-cap".to_string(), json!("round"));
    layout.insert("line-join".to_string(), json!("round"));

    let mut paint = JsonObject::new();
    paint.insert("line-color".to_string(), json!(segment.color.rgba()));
    paint.insert("line-width".to_string(), json!(3));

    LayerSpec {
        id: format!("{}{}", ROUTE_LAYER_PREFIX, segment.index),
        kind: LayerKind::Line,
        source: geojson_source(vec![segment.to_feature()]),
        layout,
        paint,
    }
}

/// Symbol layer for the park markers, icon plus name label.
pub fn park_layer(parks: &[ParkMarker]) -> LayerSpec {
    let features = parks.iter().map(|p| p.to_feature()).collect();

    let mut layout = JsonObject::new();
    layout.insert("icon-image".to_string(), json!("park-icon"));
    layout.insert("icon-allow-overlap".to_string(), json!(true));
    layout.insert("text-field".to_string(), json!(["get", "name"]));
    layout.insert("text-size".to_string(), json!(11));
    layout.insert("text-anchor".to_string(), json!("top"));
    layout.insert("text-offset".to_string(), json!([0, 0.8]));

    LayerSpec {
        id: PARKS_LAYER.to_string(),
        kind: LayerKind::Symbol,
        source: geojson_source(features),
        layout,
        paint: JsonObject::new(),
    }
}

/// Symbol layer for the current-location marker.
pub fn current_location_layer(coordinates: geo::Coord<f64>) -> LayerSpec {
    let mut feature = Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::new(geojson::Value::Point(vec![
            coordinates.x,
            coordinates.y,
        ]))),
        id: None,
        properties: None,
        foreign_members: None,
    };
    feature.set_property("name", "Current location");

    let mut layout = JsonObject::new();
    layout.insert("icon-image".to_string(), json!("current-location-icon"));
    layout.insert("icon-allow-overlap".to_string(), json!(true));

    LayerSpec {
        id: CURRENT_LOCATION_LAYER.to_string(),
        kind: LayerKind::Symbol,
        source: geojson_source(vec![feature]),
        layout,
        paint: JsonObject::new(),
    }
}
