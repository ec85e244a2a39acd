// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Popup specs: where to anchor a popup and the HTML to show in it.

use serde::Serialize;

use crate::models::MapFeature;
use crate::time_utils;

/// Vertical stagger between popups anchored at the same spot.
pub const POPUP_STACK_PX: i32 = 40;

/// One popup, ready for the map engine to place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupSpec {
    /// Anchor coordinates, longitude then latitude.
    pub lng_lat: [f64; 2],
    /// Pixel offset from the anchor (x, y).
    pub offset: (i32, i32),
    pub html: String,
}

/// Build one popup per feature. Later popups shift upward by
/// [`POPUP_STACK_PX`] each so co-located features stay readable.
pub fn render_popups(features: &[MapFeature]) -> Vec<PopupSpec> {
    features
        .iter()
        .enumerate()
        .map(|(i, feature)| {
            let coordinates = feature.coordinates();
            PopupSpec {
                lng_lat: [coordinates.x, coordinates.y],
                offset: (0, -(i as i32 * POPUP_STACK_PX)),
                html: feature_html(feature),
            }
        })
        .collect()
}

/// Popup body for one feature. All interpolated text is HTML-escaped.
pub fn feature_html(feature: &MapFeature) -> String {
    match feature {
        MapFeature::Location(waypoint) => {
            let mut html = format!(
                "<h3>{}</h3><p class=\"dates\">{}</p><p>{}</p>",
                escape_html(&waypoint.name),
                time_utils::format_date_range(waypoint.start_date, waypoint.end_date),
                escape_html(&waypoint.info)
            );
            if let Some(link) = &waypoint.link {
                html.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\">Journal</a>",
                    escape_html(link)
                ));
            }
            html
        }
        MapFeature::Park(park) => format!("<h3>{}</h3>", escape_html(&park.name)),
        MapFeature::CurrentLocation(_) => format!("<h3>{}</h3>", feature.name()),
    }
}

/// Escape text for interpolation into HTML, attribute values included.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
