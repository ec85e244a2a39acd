// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Trip-Atlas: a year-long road trip as data.
//!
//! This crate loads the trip itinerary, park markers, and cached driving
//! routes, runs the map view state machine for interactive consumers, and
//! exports a self-contained bundle for the static map page.

pub mod bundle;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
pub mod view;
