// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or parsing a data source.
#[derive(Debug, Error)]
pub enum DataError {
    /// The source has nothing to offer (not configured, not found).
    #[error("source unavailable: {0}")]
    Missing(String),
    /// Reading the file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// YAML syntax error.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// JSON syntax error.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Well-formed text with the wrong structure.
    #[error("unexpected structure: {0}")]
    Shape(String),
}

impl DataError {
    /// Returns `true` for errors meaning the source was absent rather than
    /// unreadable as data.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing(_) => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

/// Shorthand for results in this crate.
pub type Result<T, E = DataError> = std::result::Result<T, E>;
