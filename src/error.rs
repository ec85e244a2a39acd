// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error type wrapping the per-service errors.

use crate::config::ConfigError;
use crate::services::{DatasetError, DirectionsError, PathError};

/// Top-level error for the CLI and bundle export.
#[derive(Debug, thiserror::Error)]
pub enum AtlasError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Route cache error: {0}")]
    Paths(#[from] PathError),

    #[error("Directions error: {0}")]
    Directions(#[from] DirectionsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for application operations.
pub type Result<T> = std::result::Result<T, AtlasError>;
