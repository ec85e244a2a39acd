// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Marker and route colors: a deterministic two-endpoint ramp.
//!
//! Each waypoint (and the route leaving it) gets one color from a linear
//! ramp between [`RAMP_START`] and [`RAMP_END`], so stops stay visually
//! ordered along the trip.

use serde::Serialize;

/// RGBA color with 0..=255 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// First ramp color (the cyan the earliest page versions used for every marker).
pub const RAMP_START: Color = Color::rgb(0, 255, 255);

/// Far ramp endpoint. The ramp approaches but never reaches it.
pub const RAMP_END: Color = Color::rgb(255, 0, 255);

impl Color {
    /// Fully opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `n` colors linearly spaced from [`RAMP_START`] toward (exclusive of)
    /// [`RAMP_END`]: `channel = start + (end - start) * i / n`, floored.
    ///
    /// Deterministic: the same `n` always yields the same sequence.
    pub fn ramp(n: usize) -> Vec<Color> {
        (0..n)
            .map(|i| {
                let t = i as f64 / n as f64;
                Color {
                    r: lerp_channel(RAMP_START.r, RAMP_END.r, t),
                    g: lerp_channel(RAMP_START.g, RAMP_END.g, t),
                    b: lerp_channel(RAMP_START.b, RAMP_END.b, t),
                    a: 255,
                }
            })
            .collect()
    }

    /// CSS `rgba()` string for map paint specs, e.g. `"rgba(0, 255, 255, 1)"`.
    pub fn rgba(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a as f64 / 255.0
        )
    }
}

/// Floor-interpolate one channel. Matches the dataset's established colors,
/// which were produced with floating-point floor rather than integer division.
fn lerp_channel(start: u8, end: u8, t: f64) -> u8 {
    (start as f64 + (end as f64 - start as f64) * t).floor() as u8
}
