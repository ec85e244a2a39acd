// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map view state machine.
//!
//! The map engine, dataset, route cache, and marker icons all become ready
//! at their own pace. `MapView` absorbs those readiness events in any order
//! and emits each layer exactly once, then handles pointer and timeline
//! interaction against the current camera.
//!
//! Every input is a [`MapEvent`]; every output is an [`Effect`] for the
//! embedding map engine to execute. The machine itself never blocks and
//! never talks to the engine directly.

use chrono::NaiveDate;
use geo::Coord;

use crate::models::timeline::{self, TimelineSegment};
use crate::models::{Color, MapFeature, RouteSegment};
use crate::services::DatasetService;
use crate::view::camera::{Camera, ScreenPoint};
use crate::view::layers::{self, LayerSpec};
use crate::view::popup::{self, PopupSpec};

/// Camera animation length for timeline-driven fly-to, in milliseconds.
pub const FLY_TO_MS: u64 = 2000;

/// Half-width of the pointer hit box around a marker, in pixels.
pub const HIT_BOX_PX: f64 = 5.0;

/// Where the view is in the map engine's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// No live map. Readiness events are dropped until re-attach.
    Detached,
    Created,
    Loaded,
}

/// Marker icons the engine loads asynchronously.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIcon {
    Park,
    CurrentLocation,
}

impl MarkerIcon {
    /// Image name the symbol layers reference.
    pub fn image_name(&self) -> &'static str {
        match self {
            MarkerIcon::Park => "park-icon",
            MarkerIcon::CurrentLocation => "current-location-icon",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IconState {
    Pending,
    Ready,
    /// Load failed. The symbol layer is omitted for good.
    Failed,
}

/// Everything that can happen to the view.
#[derive(Debug, Clone)]
pub enum MapEvent {
    MapCreated,
    MapLoaded,
    DatasetLoaded(DatasetService),
    PathsLoaded(Vec<RouteSegment>),
    IconLoaded(MarkerIcon),
    IconFailed(MarkerIcon),
    PointerMove(ScreenPoint),
    PointerLeave,
    Click(ScreenPoint),
    /// Pointer entered a waypoint's span on the timeline bar.
    TimelineEnter(usize),
    TimelineLeave,
    Resize { width: f64, height: f64 },
    CameraMoved { center: Coord<f64>, zoom: f64 },
}

/// Instructions for the embedding map engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    AddLayer(LayerSpec),
    ShowPopups(Vec<PopupSpec>),
    ClearPopups,
    FlyTo { center: Coord<f64>, duration_ms: u64 },
    SetTimeline(Vec<TimelineSegment>),
}

/// The view state machine. One instance per on-screen map.
pub struct MapView {
    phase: ViewPhase,
    camera: Camera,
    today: NaiveDate,
    dataset: Option<DatasetService>,
    segments: Option<Vec<RouteSegment>>,
    park_icon: IconState,
    current_icon: IconState,
    base_layer_added: bool,
    route_layers_added: bool,
    park_layer_added: bool,
    current_layer_added: bool,
    active_features: Vec<MapFeature>,
    timeline: Vec<TimelineSegment>,
}

impl MapView {
    /// Fresh detached view for a viewport. `today` picks the
    /// current-location marker and stays fixed for the view's lifetime.
    pub fn new(width: f64, height: f64, today: NaiveDate) -> Self {
        Self {
            phase: ViewPhase::Detached,
            camera: Camera::new((width, height)),
            today,
            dataset: None,
            segments: None,
            park_icon: IconState::Pending,
            current_icon: IconState::Pending,
            base_layer_added: false,
            route_layers_added: false,
            park_layer_added: false,
            current_layer_added: false,
            active_features: Vec::new(),
            timeline: timeline::segments_for_width(width),
        }
    }

    /// Feed one event through the machine.
    pub fn handle(&mut self, event: MapEvent) -> Vec<Effect> {
        match event {
            MapEvent::MapCreated => {
                if self.phase == ViewPhase::Detached {
                    self.phase = ViewPhase::Created;
                }
                Vec::new()
            }
            MapEvent::MapLoaded => {
                if self.drop_when_detached("map") {
                    return Vec::new();
                }
                if self.phase == ViewPhase::Created {
                    self.phase = ViewPhase::Loaded;
                }
                self.try_add_layers()
            }
            MapEvent::DatasetLoaded(dataset) => {
                if self.drop_when_detached("dataset") {
                    return Vec::new();
                }
                // First load wins; a second delivery is a stale duplicate.
                if self.dataset.is_none() {
                    self.dataset = Some(dataset);
                }
                self.try_add_layers()
            }
            MapEvent::PathsLoaded(segments) => {
                if self.drop_when_detached("paths") {
                    return Vec::new();
                }
                if self.segments.is_none() {
                    self.segments = Some(segments);
                }
                self.try_add_layers()
            }
            MapEvent::IconLoaded(icon) => {
                if self.drop_when_detached(icon.image_name()) {
                    return Vec::new();
                }
                let state = self.icon_state_mut(icon);
                if *state == IconState::Pending {
                    *state = IconState::Ready;
                }
                self.try_add_layers()
            }
            MapEvent::IconFailed(icon) => {
                if self.drop_when_detached(icon.image_name()) {
                    return Vec::new();
                }
                let state = self.icon_state_mut(icon);
                if *state == IconState::Pending {
                    *state = IconState::Failed;
                    tracing::warn!(
                        icon = icon.image_name(),
                        "Marker icon failed to load, omitting its layer"
                    );
                }
                Vec::new()
            }
            MapEvent::PointerMove(point) => {
                let hits = self.hit_test(point);
                self.set_active(hits)
            }
            MapEvent::PointerLeave => self.set_active(Vec::new()),
            MapEvent::Click(point) => {
                let hits = self.hit_test(point);
                self.set_active(hits)
            }
            MapEvent::TimelineEnter(waypoint_id) => self.timeline_enter(waypoint_id),
            MapEvent::TimelineLeave => self.set_active(Vec::new()),
            MapEvent::Resize { width, height } => {
                // Zoom stays with the engine: Camera::new seeds the width
                // tier once and CameraMoved mirrors it from then on.
                self.camera.viewport = (width, height);
                let segments = timeline::segments_for_width(width);
                if segments == self.timeline {
                    Vec::new()
                } else {
                    self.timeline = segments;
                    vec![Effect::SetTimeline(self.timeline.clone())]
                }
            }
            MapEvent::CameraMoved { center, zoom } => {
                self.camera.center = center;
                self.camera.zoom = zoom;
                Vec::new()
            }
        }
    }

    /// Tear the view down. Readiness that arrives for a superseded map is
    /// dropped until the next `MapCreated`; consumers restart their loads
    /// after re-attaching.
    pub fn reset(&mut self) {
        *self = MapView::new(self.camera.viewport.0, self.camera.viewport.1, self.today);
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn phase(&self) -> ViewPhase {
        self.phase
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Features whose popups are currently showing.
    pub fn active_features(&self) -> &[MapFeature] {
        &self.active_features
    }

    /// Current timeline tick boundaries.
    pub fn timeline(&self) -> &[TimelineSegment] {
        &self.timeline
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn drop_when_detached(&self, what: &str) -> bool {
        if self.phase == ViewPhase::Detached {
            tracing::debug!(what, "Dropping readiness event for detached view");
            true
        } else {
            false
        }
    }

    fn icon_state_mut(&mut self, icon: MarkerIcon) -> &mut IconState {
        match icon {
            MarkerIcon::Park => &mut self.park_icon,
            MarkerIcon::CurrentLocation => &mut self.current_icon,
        }
    }

    /// Emit every layer whose inputs just became ready. Guards keep each
    /// layer to exactly one AddLayer no matter how often this runs.
    fn try_add_layers(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.phase != ViewPhase::Loaded {
            return effects;
        }

        if !self.route_layers_added {
            if let Some(segments) = &self.segments {
                for segment in segments {
                    effects.push(Effect::AddLayer(layers::route_layer(segment)));
                }
                self.route_layers_added = true;
            }
        }

        if let Some(dataset) = &self.dataset {
            if !self.base_layer_added {
                let colors = Color::ramp(dataset.waypoints().len());
                effects.push(Effect::AddLayer(layers::destination_layer(
                    dataset.waypoints(),
                    &colors,
                )));
                self.base_layer_added = true;
            }

            if !self.park_layer_added
                && self.park_icon == IconState::Ready
                && !dataset.parks().is_empty()
            {
                effects.push(Effect::AddLayer(layers::park_layer(dataset.parks())));
                self.park_layer_added = true;
            }

            if !self.current_layer_added && self.current_icon == IconState::Ready {
                if let Some(coordinates) = dataset.current_location(self.today) {
                    effects.push(Effect::AddLayer(layers::current_location_layer(
                        coordinates,
                    )));
                    self.current_layer_added = true;
                }
            }
        }

        effects
    }

    /// Features under the pointer. Only markers whose layer is actually on
    /// the map participate, so a failed icon also disables its hit targets.
    fn hit_test(&self, point: ScreenPoint) -> Vec<MapFeature> {
        let mut hits = Vec::new();
        let Some(dataset) = &self.dataset else {
            return hits;
        };

        if self.base_layer_added {
            for waypoint in dataset.visible_waypoints() {
                if self.hits_marker(point, waypoint.coordinates) {
                    hits.push(MapFeature::Location(waypoint.clone()));
                }
            }
        }

        if self.park_layer_added {
            for park in dataset.parks() {
                if self.hits_marker(point, park.coordinates) {
                    hits.push(MapFeature::Park(park.clone()));
                }
            }
        }

        if self.current_layer_added {
            if let Some(coordinates) = dataset.current_location(self.today) {
                if self.hits_marker(point, coordinates) {
                    hits.push(MapFeature::CurrentLocation(coordinates));
                }
            }
        }

        hits
    }

    fn hits_marker(&self, pointer: ScreenPoint, target: Coord<f64>) -> bool {
        let screen = self.camera.project(target);
        (screen.x - pointer.x).abs() <= HIT_BOX_PX && (screen.y - pointer.y).abs() <= HIT_BOX_PX
    }

    /// Swap the active feature set, emitting popup effects only on change.
    fn set_active(&mut self, features: Vec<MapFeature>) -> Vec<Effect> {
        if features == self.active_features {
            return Vec::new();
        }
        self.active_features = features;
        if self.active_features.is_empty() {
            vec![Effect::ClearPopups]
        } else {
            vec![Effect::ShowPopups(popup::render_popups(
                &self.active_features,
            ))]
        }
    }

    fn timeline_enter(&mut self, waypoint_id: usize) -> Vec<Effect> {
        let Some(dataset) = &self.dataset else {
            return Vec::new();
        };
        let Some(waypoint) = dataset.waypoint(waypoint_id) else {
            return Vec::new();
        };
        if waypoint.hidden {
            return Vec::new();
        }

        let waypoint = waypoint.clone();
        let center = waypoint.coordinates;
        let mut effects = self.set_active(vec![MapFeature::Location(waypoint)]);
        effects.push(Effect::FlyTo {
            center,
            duration_ms: FLY_TO_MS,
        });
        effects
    }
}
