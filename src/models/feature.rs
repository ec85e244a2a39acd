// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Anything the map can hit-test or describe in a popup.

use geo::Coord;

use crate::models::{ParkMarker, Waypoint};

/// A map feature the pointer can land on.
///
/// Hit testing and popup rendering treat all three the same way; only the
/// popup body differs per variant.
#[derive(Debug, Clone, PartialEq)]
pub enum MapFeature {
    Location(Waypoint),
    Park(ParkMarker),
    /// Where we are right now, derived from today's date and the itinerary.
    CurrentLocation(Coord<f64>),
}

impl MapFeature {
    pub fn name(&self) -> &str {
        match self {
            MapFeature::Location(waypoint) => &waypoint.name,
            MapFeature::Park(park) => &park.name,
            MapFeature::CurrentLocation(_) => "Current location",
        }
    }

    pub fn coordinates(&self) -> Coord<f64> {
        match self {
            MapFeature::Location(waypoint) => waypoint.coordinates,
            MapFeature::Park(park) => park.coordinates,
            MapFeature::CurrentLocation(coord) => *coord,
        }
    }
}
