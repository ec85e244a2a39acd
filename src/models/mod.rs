// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod color;
pub mod feature;
pub mod park;
pub mod route;
pub mod timeline;
pub mod waypoint;

pub use color::Color;
pub use feature::MapFeature;
pub use park::{ParkMarker, RawParkMarker};
pub use route::RouteSegment;
pub use timeline::{TimelineSegment, TimelineSpan};
pub use waypoint::{RawWaypoint, Waypoint};
