// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static map bundle export.
//!
//! The bundle is everything a static page needs to show the map without
//! recomputing anything: layer specs, popup HTML per feature, camera
//! presets, and the timeline with label presets per segment count so the
//! width rule can be applied at display time.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use geo::{BoundingRect, MultiPoint, Point};
use serde::Serialize;

use crate::error::Result;
use crate::models::timeline::{
    self, TimelineSegment, TimelineSpan, MIN_SEGMENT_PX, SEGMENT_COUNT_CANDIDATES,
};
use crate::models::{Color, MapFeature};
use crate::services::{DatasetService, PathService};
use crate::view::camera::Camera;
use crate::view::layers::{self, LayerSpec};
use crate::view::popup;

/// File name the bundle is written under in the output directory.
pub const BUNDLE_FILE: &str = "map_bundle.json";

const BUNDLE_TITLE: &str = "Travel Itinerary";

/// Camera preset in the bundle, center as `[lng, lat]`.
#[derive(Debug, Clone, Serialize)]
pub struct CameraSpec {
    pub center: [f64; 2],
    pub zoom: f64,
}

impl From<Camera> for CameraSpec {
    fn from(camera: Camera) -> Self {
        Self {
            center: [camera.center.x, camera.center.y],
            zoom: camera.zoom,
        }
    }
}

/// Timeline block of the bundle.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineBundle {
    pub min_segment_px: f64,
    /// Per-waypoint proportional bar spans.
    pub spans: Vec<TimelineSpan>,
    /// Tick boundary lists keyed by segment count, so the page picks the
    /// preset matching its width instead of recomputing labels.
    pub presets: BTreeMap<usize, Vec<TimelineSegment>>,
}

/// The exported map, self-contained.
#[derive(Debug, Clone, Serialize)]
pub struct MapBundle {
    pub title: String,
    pub journal_url: String,
    pub trip_start: NaiveDate,
    pub trip_end: NaiveDate,
    /// Initial camera for the export viewport.
    pub camera: CameraSpec,
    /// Camera framing the whole itinerary.
    pub fitted: CameraSpec,
    pub layers: Vec<LayerSpec>,
    /// Popup HTML keyed by feature: waypoint ids as decimal strings,
    /// `park:{name}` for parks, `current-location` for the marker.
    pub popups: BTreeMap<String, String>,
    pub timeline: TimelineBundle,
}

impl MapBundle {
    /// Assemble the bundle from loaded services. Pure; does no I/O.
    pub fn build(
        dataset: &DatasetService,
        paths: &PathService,
        today: NaiveDate,
        journal_url: &str,
        viewport: (f64, f64),
    ) -> Self {
        let colors = Color::ramp(dataset.waypoints().len());
        let current = dataset.current_location(today);

        // Routes first so markers draw on top of them.
        let mut layer_specs = Vec::new();
        for segment in paths.segments() {
            layer_specs.push(layers::route_layer(segment));
        }
        layer_specs.push(layers::destination_layer(dataset.waypoints(), &colors));
        if !dataset.parks().is_empty() {
            layer_specs.push(layers::park_layer(dataset.parks()));
        }
        if let Some(coordinates) = current {
            layer_specs.push(layers::current_location_layer(coordinates));
        }

        let mut popups = BTreeMap::new();
        for waypoint in dataset.visible_waypoints() {
            popups.insert(
                waypoint.id.to_string(),
                popup::feature_html(&MapFeature::Location(waypoint.clone())),
            );
        }
        for park in dataset.parks() {
            popups.insert(
                format!("park:{}", park.name),
                popup::feature_html(&MapFeature::Park(park.clone())),
            );
        }
        if let Some(coordinates) = current {
            popups.insert(
                "current-location".to_string(),
                popup::feature_html(&MapFeature::CurrentLocation(coordinates)),
            );
        }

        let mut presets = BTreeMap::new();
        for count in SEGMENT_COUNT_CANDIDATES {
            presets.insert(count, timeline::segments_for_count(count));
        }

        Self {
            title: BUNDLE_TITLE.to_string(),
            journal_url: journal_url.to_string(),
            trip_start: timeline::trip_start(),
            trip_end: timeline::trip_end(),
            camera: Camera::new(viewport).into(),
            fitted: fitted_camera(dataset, viewport).into(),
            layers: layer_specs,
            popups,
            timeline: TimelineBundle {
                min_segment_px: MIN_SEGMENT_PX,
                spans: TimelineSpan::for_waypoints(dataset.waypoints(), &colors),
                presets,
            },
        }
    }

    /// Write the bundle as pretty-printed JSON, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        tracing::info!(path = %path.display(), "Wrote map bundle");
        Ok(())
    }
}

/// Camera framing every waypoint, falling back to the default camera for an
/// empty itinerary.
fn fitted_camera(dataset: &DatasetService, viewport: (f64, f64)) -> Camera {
    let points: MultiPoint<f64> = dataset
        .waypoints()
        .iter()
        .map(|w| Point::from(w.coordinates))
        .collect();

    match points.bounding_rect() {
        Some(bounds) => Camera::fit_bounds(bounds, viewport),
        None => Camera::new(viewport),
    }
}
