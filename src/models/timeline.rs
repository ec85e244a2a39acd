// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip timeline: the colored duration bar and its month tick marks.
//!
//! The bar is split into one span per waypoint, sized by stay length. Tick
//! labels are laid out for a target width; narrow layouts fall back to a
//! hand-picked three-label set.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::models::{Color, Waypoint};
use crate::time_utils;

/// Segment counts the layout may choose from, in ascending order.
pub const SEGMENT_COUNT_CANDIDATES: [usize; 4] = [2, 4, 6, 13];

/// A tick segment narrower than this is unreadable and never chosen.
pub const MIN_SEGMENT_PX: f64 = 120.0;

/// First day of the trip.
pub fn trip_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 8, 1).expect("valid date")
}

/// Last day of the trip.
pub fn trip_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, 31).expect("valid date")
}

/// One tick boundary on the timeline. The final boundary is a sentinel
/// with an empty label marking the end of the bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSegment {
    pub label: String,
    pub starts: NaiveDate,
}

/// One waypoint's share of the timeline bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSpan {
    pub waypoint_id: usize,
    pub color: Color,
    /// Fraction of the whole bar, in `0.0..=1.0`.
    pub fraction: f64,
    /// Hidden spans keep their width so the bar stays proportional, but are
    /// not hover targets.
    pub hidden: bool,
}

/// Largest candidate count whose segments stay at least [`MIN_SEGMENT_PX`]
/// wide. Falls back to the two-segment layout when nothing fits.
pub fn pick_segment_count(width: f64) -> usize {
    SEGMENT_COUNT_CANDIDATES
        .iter()
        .copied()
        .filter(|&count| width / count as f64 >= MIN_SEGMENT_PX)
        .max()
        .unwrap_or(SEGMENT_COUNT_CANDIDATES[0])
}

/// Tick boundaries for a given display width.
pub fn segments_for_width(width: f64) -> Vec<TimelineSegment> {
    segments_for_count(pick_segment_count(width))
}

/// Tick boundaries for an explicit segment count: `count + 1` entries, the
/// last being the end sentinel.
///
/// The two-segment layout keeps the original hand-picked labels, including
/// a labeled end boundary. Larger counts label each boundary with its
/// month, adding the year on the first boundary and on year changes.
pub fn segments_for_count(count: usize) -> Vec<TimelineSegment> {
    if count == SEGMENT_COUNT_CANDIDATES[0] {
        return vec![
            TimelineSegment {
                label: "Aug '23".to_string(),
                starts: trip_start(),
            },
            TimelineSegment {
                label: "Feb '24".to_string(),
                starts: NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date"),
            },
            TimelineSegment {
                label: "Aug '24".to_string(),
                starts: trip_end(),
            },
        ];
    }

    let total_days = (trip_end() - trip_start()).num_days() as f64;
    let step = total_days / count as f64;

    let mut segments = Vec::with_capacity(count + 1);
    let mut previous_year = None;
    for i in 0..count {
        let starts = trip_start() + Duration::days((step * i as f64).floor() as i64);
        let with_year = previous_year != Some(starts.year());
        previous_year = Some(starts.year());
        segments.push(TimelineSegment {
            label: time_utils::month_label(starts, with_year),
            starts,
        });
    }
    segments.push(TimelineSegment {
        label: String::new(),
        starts: trip_end(),
    });
    segments
}

impl TimelineSpan {
    /// Spans for the whole itinerary, hidden waypoints included. Each
    /// waypoint's share is its stay length over the total of all stays.
    pub fn for_waypoints(waypoints: &[Waypoint], colors: &[Color]) -> Vec<TimelineSpan> {
        let total: i64 = waypoints.iter().map(|w| w.duration_days()).sum();

        waypoints
            .iter()
            .zip(colors)
            .map(|(waypoint, color)| TimelineSpan {
                waypoint_id: waypoint.id,
                color: *color,
                fraction: if total > 0 {
                    waypoint.duration_days() as f64 / total as f64
                } else {
                    0.0
                },
                hidden: waypoint.hidden,
            })
            .collect()
    }
}
