// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! Errors raised while writing reports.

use perfseries_core::{SerializationError, SeriesKey};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing report files.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The series could not be rendered.
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// A file or directory could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Another series already claimed the file name.
    #[error("cannot write series {key}: file name {file} is already used by another series")]
    FileNameTaken {
        /// Key of the series that was not written.
        key: SeriesKey,
        /// The contested file name.
        file: String,
    },

    /// The manifest could not be encoded or decoded.
    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
