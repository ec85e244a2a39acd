// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map camera: center, zoom, and web-mercator screen projection.
//!
//! Hit testing needs to know where a marker lands on screen. This mirrors
//! the map engine's projection (512px world tiles, fractional zoom) closely
//! enough for a few-pixel hit box.

use geo::{Coord, Rect};

/// World tile size in pixels at zoom 0.
pub const TILE_SIZE: f64 = 512.0;

/// Initial map center (lng, lat), over the US Southwest.
pub const DEFAULT_CENTER: Coord<f64> = Coord { x: -115.0, y: 37.1 };

/// Initial zoom for wide viewports.
pub const DEFAULT_ZOOM: f64 = 5.0;

/// Latitude limit of the web-mercator projection.
pub const MAX_MERCATOR_LAT: f64 = 85.05112878;

/// A point in viewport pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Camera state mirroring the on-screen map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Map center, `x` longitude and `y` latitude.
    pub center: Coord<f64>,
    pub zoom: f64,
    /// Viewport size in pixels (width, height).
    pub viewport: (f64, f64),
}

impl Camera {
    /// Camera at the default center, zoomed for the viewport width.
    pub fn new(viewport: (f64, f64)) -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: zoom_for_width(viewport.0),
            viewport,
        }
    }

    /// Project a lng/lat coordinate to viewport pixels.
    pub fn project(&self, point: Coord<f64>) -> ScreenPoint {
        let scale = TILE_SIZE * self.zoom.exp2();
        let center = world_fraction(self.center);
        let target = world_fraction(point);

        ScreenPoint {
            x: (target.x - center.x) * scale + self.viewport.0 / 2.0,
            y: (target.y - center.y) * scale + self.viewport.1 / 2.0,
        }
    }

    /// Camera framing `bounds` within `viewport`, with half a zoom level of
    /// padding. Degenerate bounds (a single point) get the default zoom.
    pub fn fit_bounds(bounds: Rect<f64>, viewport: (f64, f64)) -> Self {
        let min = world_fraction(Coord {
            x: bounds.min().x,
            y: bounds.max().y,
        });
        let max = world_fraction(Coord {
            x: bounds.max().x,
            y: bounds.min().y,
        });

        let span_x = max.x - min.x;
        let span_y = max.y - min.y;

        let zoom = if span_x > 0.0 && span_y > 0.0 {
            let zoom_x = (viewport.0 / (TILE_SIZE * span_x)).log2();
            let zoom_y = (viewport.1 / (TILE_SIZE * span_y)).log2();
            (zoom_x.min(zoom_y) - 0.5).clamp(0.0, 15.0)
        } else {
            DEFAULT_ZOOM
        };

        let mid_y = (min.y + max.y) / 2.0;
        let center = Coord {
            x: (bounds.min().x + bounds.max().x) / 2.0,
            y: fraction_to_lat(mid_y),
        };

        Self {
            center,
            zoom,
            viewport,
        }
    }
}

/// Zoom tier for a viewport width: phones see the whole route, wide screens
/// get the detail zoom.
pub fn zoom_for_width(width: f64) -> f64 {
    if width < 600.0 {
        3.2
    } else if width < 1100.0 {
        4.2
    } else {
        DEFAULT_ZOOM
    }
}

/// World coordinates as fractions of the world size, x and y in `0.0..=1.0`.
fn world_fraction(point: Coord<f64>) -> Coord<f64> {
    let lat = point
        .y
        .clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT)
        .to_radians();
    Coord {
        x: (point.x + 180.0) / 360.0,
        y: (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0,
    }
}

/// Inverse of the `world_fraction` y component.
fn fraction_to_lat(y: f64) -> f64 {
    (std::f64::consts::PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees()
}
