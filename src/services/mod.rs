// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - data loading and API clients.

pub mod dataset;
pub mod directions;
pub mod paths;

pub use dataset::{DatasetError, DatasetService};
pub use directions::{DirectionsClient, DirectionsError};
pub use paths::{PathError, PathService};
