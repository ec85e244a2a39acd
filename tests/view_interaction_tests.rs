// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map view state machine tests over the committed dataset.
//!
//! These drive `MapView` the way an embedding page would: readiness events
//! in whatever order they land, then pointer, click, timeline, and resize
//! interaction. Layer effects must come out exactly once each.

use chrono::NaiveDate;
use geo::Coord;
use trip_atlas::models::RouteSegment;
use trip_atlas::services::{DatasetService, PathService};
use trip_atlas::view::{Effect, MapEvent, MapView, MarkerIcon, ScreenPoint, ViewPhase};

fn load_dataset() -> DatasetService {
    DatasetService::load_from_files("data/itinerary.json", "data/parks.json")
        .expect("Failed to load itinerary - is data/ committed?")
}

fn load_segments(dataset: &DatasetService) -> Vec<RouteSegment> {
    PathService::load_from_dir("data/paths", dataset.waypoints())
        .expect("Failed to load route cache")
        .segments()
        .to_vec()
}

/// A date in the Tucson stay, so the current-location marker exists.
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

/// View with the map live and every layer added.
fn wired_view() -> MapView {
    let dataset = load_dataset();
    let segments = load_segments(&dataset);

    let mut view = MapView::new(1280.0, 800.0, today());
    view.handle(MapEvent::MapCreated);
    view.handle(MapEvent::MapLoaded);
    view.handle(MapEvent::DatasetLoaded(dataset));
    view.handle(MapEvent::PathsLoaded(segments));
    view.handle(MapEvent::IconLoaded(MarkerIcon::Park));
    view.handle(MapEvent::IconLoaded(MarkerIcon::CurrentLocation));
    view
}

fn layer_ids(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::AddLayer(spec) => Some(spec.id.clone()),
            _ => None,
        })
        .collect()
}

fn over(view: &MapView, coordinates: Coord<f64>) -> ScreenPoint {
    view.camera().project(coordinates)
}

#[test]
fn test_layers_emitted_once_in_any_readiness_order() {
    let dataset = load_dataset();
    let segments = load_segments(&dataset);

    // Data first, engine last: everything flushes on MapLoaded.
    let mut early_data = MapView::new(1280.0, 800.0, today());
    let mut collected = Vec::new();
    early_data.handle(MapEvent::MapCreated);
    collected.extend(early_data.handle(MapEvent::DatasetLoaded(dataset.clone())));
    collected.extend(early_data.handle(MapEvent::PathsLoaded(segments.clone())));
    collected.extend(early_data.handle(MapEvent::IconLoaded(MarkerIcon::Park)));
    collected.extend(early_data.handle(MapEvent::IconLoaded(MarkerIcon::CurrentLocation)));
    assert!(collected.is_empty(), "no layers before the map is loaded");
    collected.extend(early_data.handle(MapEvent::MapLoaded));

    // Engine first, data trickling in afterwards.
    let mut early_map = MapView::new(1280.0, 800.0, today());
    let mut trickled = Vec::new();
    early_map.handle(MapEvent::MapCreated);
    trickled.extend(early_map.handle(MapEvent::MapLoaded));
    trickled.extend(early_map.handle(MapEvent::IconLoaded(MarkerIcon::CurrentLocation)));
    trickled.extend(early_map.handle(MapEvent::DatasetLoaded(dataset)));
    trickled.extend(early_map.handle(MapEvent::PathsLoaded(segments)));
    trickled.extend(early_map.handle(MapEvent::IconLoaded(MarkerIcon::Park)));

    // 12 route layers + destinations + parks + current-location.
    assert_eq!(collected.len(), 15);
    assert_eq!(trickled.len(), 15);

    let mut flushed_ids = layer_ids(&collected);
    let mut trickled_ids = layer_ids(&trickled);
    flushed_ids.sort();
    trickled_ids.sort();
    assert_eq!(flushed_ids, trickled_ids);
    assert!(flushed_ids.contains(&"destinations".to_string()));
    assert!(flushed_ids.contains(&"route-11".to_string()));
}

#[test]
fn test_duplicate_readiness_is_a_no_op() {
    let mut view = wired_view();

    assert!(view.handle(MapEvent::MapLoaded).is_empty());
    assert!(view
        .handle(MapEvent::DatasetLoaded(load_dataset()))
        .is_empty());
    assert!(view
        .handle(MapEvent::IconLoaded(MarkerIcon::Park))
        .is_empty());

    let dataset = load_dataset();
    let segments = load_segments(&dataset);
    assert!(view.handle(MapEvent::PathsLoaded(segments)).is_empty());
}

#[test]
fn test_failed_icon_permanently_omits_its_layer() {
    let dataset = load_dataset();
    let mut view = MapView::new(1280.0, 800.0, today());
    view.handle(MapEvent::MapCreated);
    view.handle(MapEvent::MapLoaded);

    let mut effects = view.handle(MapEvent::DatasetLoaded(dataset.clone()));
    effects.extend(view.handle(MapEvent::IconFailed(MarkerIcon::Park)));
    // A late success does not resurrect a failed icon.
    effects.extend(view.handle(MapEvent::IconLoaded(MarkerIcon::Park)));

    let ids = layer_ids(&effects);
    assert!(!ids.contains(&"parks".to_string()));
    assert!(ids.contains(&"destinations".to_string()));

    // And without its layer the park is not a hit target either.
    let zion = dataset.parks()[1].coordinates;
    let point = over(&view, zion);
    assert!(view.handle(MapEvent::PointerMove(point)).is_empty());
}

#[test]
fn test_hover_shows_popup_once_and_leave_clears() {
    let mut view = wired_view();
    let vegas = load_dataset().waypoint(2).unwrap().coordinates;
    let point = over(&view, vegas);

    let effects = view.handle(MapEvent::PointerMove(point));
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::ShowPopups(popups) => {
            assert_eq!(popups.len(), 1);
            assert!(popups[0].html.contains("Las Vegas"));
            assert_eq!(popups[0].lng_lat, [vegas.x, vegas.y]);
        }
        other => panic!("expected ShowPopups, got {:?}", other),
    }

    // Wiggling inside the same marker re-resolves to the same popups.
    assert!(view
        .handle(MapEvent::PointerMove(ScreenPoint {
            x: point.x + 2.0,
            y: point.y - 2.0,
        }))
        .is_empty());

    assert_eq!(
        view.handle(MapEvent::PointerLeave),
        vec![Effect::ClearPopups]
    );
    assert!(view.active_features().is_empty());
}

#[test]
fn test_hidden_waypoint_is_not_a_hit_target() {
    let mut view = wired_view();
    let san_jose = load_dataset().waypoint(5).unwrap().coordinates;
    let point = over(&view, san_jose);

    // No hit and nothing to clear, so no effects at all.
    assert!(view.handle(MapEvent::PointerMove(point)).is_empty());
    assert!(view.active_features().is_empty());
}

#[test]
fn test_click_pins_and_click_elsewhere_clears() {
    let mut view = wired_view();
    let vegas = load_dataset().waypoint(2).unwrap().coordinates;

    let effects = view.handle(MapEvent::Click(over(&view, vegas)));
    assert!(matches!(&effects[0], Effect::ShowPopups(_)));

    let effects = view.handle(MapEvent::Click(ScreenPoint { x: 5.0, y: 5.0 }));
    assert_eq!(effects, vec![Effect::ClearPopups]);
}

#[test]
fn test_park_markers_are_hoverable() {
    let mut view = wired_view();
    let zion = load_dataset().parks()[1].coordinates;

    let effects = view.handle(MapEvent::PointerMove(over(&view, zion)));
    match &effects[0] {
        Effect::ShowPopups(popups) => {
            assert_eq!(popups[0].html, "<h3>Zion</h3>");
        }
        other => panic!("expected ShowPopups, got {:?}", other),
    }
}

#[test]
fn test_current_location_stacks_with_its_waypoint() {
    let mut view = wired_view();
    // Today is during the Tucson stay, so the current-location marker sits
    // on the Tucson waypoint and both pop up, staggered.
    let tucson = load_dataset().waypoint(7).unwrap().coordinates;

    let effects = view.handle(MapEvent::PointerMove(over(&view, tucson)));
    match &effects[0] {
        Effect::ShowPopups(popups) => {
            assert_eq!(popups.len(), 2);
            assert!(popups[0].html.contains("Tucson"));
            assert_eq!(popups[1].html, "<h3>Current location</h3>");
            assert_eq!(popups[0].offset, (0, 0));
            assert_eq!(popups[1].offset, (0, -40));
        }
        other => panic!("expected ShowPopups, got {:?}", other),
    }
}

#[test]
fn test_timeline_enter_flies_to_the_stop() {
    let mut view = wired_view();
    let vegas = load_dataset().waypoint(2).unwrap().coordinates;

    let effects = view.handle(MapEvent::TimelineEnter(2));
    assert_eq!(effects.len(), 2);
    assert!(matches!(&effects[0], Effect::ShowPopups(popups) if popups[0].html.contains("Las Vegas")));
    assert_eq!(
        effects[1],
        Effect::FlyTo {
            center: vegas,
            duration_ms: 2000,
        }
    );

    assert_eq!(
        view.handle(MapEvent::TimelineLeave),
        vec![Effect::ClearPopups]
    );
}

#[test]
fn test_timeline_enter_ignores_hidden_and_unknown_ids() {
    let mut view = wired_view();

    // San Jose is hidden; 99 does not exist.
    assert!(view.handle(MapEvent::TimelineEnter(5)).is_empty());
    assert!(view.handle(MapEvent::TimelineEnter(99)).is_empty());
    assert!(view.active_features().is_empty());
}

#[test]
fn test_resize_emits_timeline_only_on_change() {
    let mut view = wired_view();
    // 1280px fits 6 segments: 7 boundaries including the end sentinel.
    assert_eq!(view.timeline().len(), 7);

    let effects = view.handle(MapEvent::Resize {
        width: 1600.0,
        height: 900.0,
    });
    match &effects[..] {
        [Effect::SetTimeline(segments)] => assert_eq!(segments.len(), 14),
        other => panic!("expected SetTimeline, got {:?}", other),
    }

    // Same width again, and a width in the same tier: no churn.
    assert!(view
        .handle(MapEvent::Resize {
            width: 1600.0,
            height: 900.0,
        })
        .is_empty());
    assert!(view
        .handle(MapEvent::Resize {
            width: 1563.0,
            height: 900.0,
        })
        .is_empty());
}

#[test]
fn test_camera_moved_retargets_hit_testing() {
    let mut view = wired_view();
    let vegas = load_dataset().waypoint(2).unwrap().coordinates;

    view.handle(MapEvent::CameraMoved {
        center: vegas,
        zoom: 8.0,
    });

    // Vegas now projects to the exact viewport center.
    let effects = view.handle(MapEvent::PointerMove(ScreenPoint { x: 640.0, y: 400.0 }));
    assert!(matches!(&effects[0], Effect::ShowPopups(popups) if popups[0].html.contains("Las Vegas")));
}

#[test]
fn test_resize_leaves_the_engine_zoom_alone() {
    let mut view = wired_view();
    let vegas = load_dataset().waypoint(2).unwrap().coordinates;
    view.handle(MapEvent::CameraMoved {
        center: vegas,
        zoom: 6.5,
    });

    // Height-only change: the timeline is width-driven, so no effects.
    assert!(view
        .handle(MapEvent::Resize {
            width: 1280.0,
            height: 900.0,
        })
        .is_empty());
    assert_eq!(view.camera().zoom, 6.5);

    // Hit testing keeps projecting markers where the engine draws them.
    let zion = load_dataset().parks()[1].coordinates;
    let effects = view.handle(MapEvent::PointerMove(over(&view, zion)));
    assert!(matches!(&effects[0], Effect::ShowPopups(popups) if popups[0].html == "<h3>Zion</h3>"));
}

#[test]
fn test_reset_drops_stale_readiness_until_reattach() {
    let mut view = wired_view();
    view.reset();
    assert_eq!(view.phase(), ViewPhase::Detached);

    // A load completing for the torn-down map goes nowhere.
    assert!(view
        .handle(MapEvent::DatasetLoaded(load_dataset()))
        .is_empty());

    // Re-attach: the dropped dataset stays dropped.
    view.handle(MapEvent::MapCreated);
    assert!(view.handle(MapEvent::MapLoaded).is_empty());

    // The new generation's own load lands normally.
    let effects = view.handle(MapEvent::DatasetLoaded(load_dataset()));
    assert_eq!(layer_ids(&effects), vec!["destinations".to_string()]);
}

#[test]
fn test_stale_map_load_cannot_revive_a_detached_view() {
    let mut view = wired_view();
    view.reset();

    // The superseded map's load event fires after teardown.
    assert!(view.handle(MapEvent::MapLoaded).is_empty());
    assert_eq!(view.phase(), ViewPhase::Detached);

    // With the view still detached, data readiness keeps being dropped.
    assert!(view
        .handle(MapEvent::DatasetLoaded(load_dataset()))
        .is_empty());

    // The next attach runs the whole lifecycle and gets its layers.
    view.handle(MapEvent::MapCreated);
    assert_eq!(view.phase(), ViewPhase::Created);
    view.handle(MapEvent::MapLoaded);
    assert_eq!(view.phase(), ViewPhase::Loaded);
    let effects = view.handle(MapEvent::DatasetLoaded(load_dataset()));
    assert_eq!(layer_ids(&effects), vec!["destinations".to_string()]);
}
