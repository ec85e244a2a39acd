// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Map view: camera, layers, popups, and the interaction state machine.

pub mod camera;
pub mod layers;
pub mod popup;
pub mod state;

pub use camera::{Camera, ScreenPoint};
pub use layers::LayerSpec;
pub use popup::PopupSpec;
pub use state::{Effect, MapEvent, MapView, MarkerIcon, ViewPhase};
