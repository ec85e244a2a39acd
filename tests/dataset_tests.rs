// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Committed dataset smoke tests.
//!
//! These load the real itinerary, parks, and route cache from data/ and
//! verify the invariants everything downstream assumes: sequential ids,
//! one route per consecutive pair, colors aligned by index.

use chrono::NaiveDate;
use trip_atlas::models::Color;
use trip_atlas::services::{DatasetService, PathService};

/// Load the committed dataset.
fn load_test_dataset() -> DatasetService {
    DatasetService::load_from_files("data/itinerary.json", "data/parks.json")
        .expect("Failed to load itinerary - is data/ committed?")
}

#[test]
fn test_dataset_loads() {
    let dataset = load_test_dataset();

    assert_eq!(dataset.waypoints().len(), 13);
    assert_eq!(dataset.parks().len(), 6);

    assert_eq!(dataset.waypoints()[0].name, "San Francisco");
    assert_eq!(dataset.waypoints()[12].name, "Los Angeles");

    for (i, waypoint) in dataset.waypoints().iter().enumerate() {
        assert_eq!(waypoint.id, i, "ids must follow input order");
    }
}

#[test]
fn test_dates_cover_the_trip() {
    let dataset = load_test_dataset();

    assert_eq!(
        dataset.waypoints()[0].start_date,
        NaiveDate::from_ymd_opt(2023, 8, 1).unwrap()
    );
    assert_eq!(
        dataset.waypoints()[12].end_date,
        NaiveDate::from_ymd_opt(2024, 8, 31).unwrap()
    );

    // Stays are contiguous: each departure day is the next arrival day.
    for pair in dataset.waypoints().windows(2) {
        assert_eq!(
            pair[0].end_date, pair[1].start_date,
            "gap between {} and {}",
            pair[0].name, pair[1].name
        );
    }
}

#[test]
fn test_hidden_waypoints() {
    let dataset = load_test_dataset();

    let hidden: Vec<&str> = dataset
        .waypoints()
        .iter()
        .filter(|w| w.hidden)
        .map(|w| w.name.as_str())
        .collect();
    assert_eq!(hidden, vec!["San Jose"]);

    // Hidden waypoints keep their id slot but drop out of the marker list.
    assert_eq!(dataset.visible_waypoints().count(), 12);
    assert_eq!(dataset.waypoint(5).unwrap().name, "San Jose");
}

#[test]
fn test_coordinates_look_like_the_southwest() {
    let dataset = load_test_dataset();

    // A lat/lng swap in the data would throw points into the ocean.
    for waypoint in dataset.waypoints() {
        assert!(
            (-125.0..=-105.0).contains(&waypoint.coordinates.x),
            "{} longitude out of range: {}",
            waypoint.name,
            waypoint.coordinates.x
        );
        assert!(
            (32.0..=44.0).contains(&waypoint.coordinates.y),
            "{} latitude out of range: {}",
            waypoint.name,
            waypoint.coordinates.y
        );
    }
    for park in dataset.parks() {
        assert!(
            park.coordinates.x < -100.0 && park.coordinates.y > 30.0,
            "{} coordinates look swapped",
            park.name
        );
    }
}

#[test]
fn test_waypoint_names_unique() {
    let dataset = load_test_dataset();

    let mut seen = std::collections::HashSet::new();
    for waypoint in dataset.waypoints() {
        assert!(
            seen.insert(waypoint.name.as_str()),
            "Duplicate waypoint name: {}",
            waypoint.name
        );
    }
}

#[test]
fn test_route_cache_loads() {
    let dataset = load_test_dataset();
    let paths = PathService::load_from_dir("data/paths", dataset.waypoints())
        .expect("Failed to load route cache - run fetch-paths?");

    assert_eq!(paths.segments().len(), dataset.waypoints().len() - 1);

    let colors = Color::ramp(dataset.waypoints().len());
    for (i, segment) in paths.segments().iter().enumerate() {
        assert_eq!(segment.index, i);
        assert_eq!(segment.color, colors[i], "segment {} color misaligned", i);
        assert!(
            segment.geometry.0.len() >= 2,
            "segment {} has no geometry",
            i
        );
    }
}

#[test]
fn test_routes_start_and_end_near_their_waypoints() {
    let dataset = load_test_dataset();
    let paths = PathService::load_from_dir("data/paths", dataset.waypoints())
        .expect("Failed to load route cache");

    for segment in paths.segments() {
        let from = dataset.waypoints()[segment.index].coordinates;
        let to = dataset.waypoints()[segment.index + 1].coordinates;
        let first = segment.geometry.0[0];
        let last = *segment.geometry.0.last().unwrap();

        // Road-snapped endpoints sit within a fraction of a degree.
        assert!(
            (first.x - from.x).abs() < 0.2 && (first.y - from.y).abs() < 0.2,
            "segment {} does not start near {}",
            segment.index,
            dataset.waypoints()[segment.index].name
        );
        assert!(
            (last.x - to.x).abs() < 0.2 && (last.y - to.y).abs() < 0.2,
            "segment {} does not end near {}",
            segment.index,
            dataset.waypoints()[segment.index + 1].name
        );
    }
}

#[test]
fn test_current_location_through_the_trip() {
    let dataset = load_test_dataset();

    // Before departure there is nowhere to point at.
    let before = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();
    assert_eq!(dataset.current_location(before), None);

    // Mid-trip lands on the stay covering that date.
    let spring = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let tucson = dataset.waypoint(7).unwrap().coordinates;
    assert_eq!(dataset.current_location(spring), Some(tucson));

    // After the trip the marker stays at the last stop.
    let later = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let los_angeles = dataset.waypoint(12).unwrap().coordinates;
    assert_eq!(dataset.current_location(later), Some(los_angeles));
}
