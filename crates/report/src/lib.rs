// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! Reporting output for perfseries.
//!
//! This crate turns recorded [`perfseries_core::ResultSeries`] into the
//! files a charting viewer consumes: one AMD module per series, plus a
//! markdown summary and a JSON manifest.
//!
//! # Quick Start
//!
//! ```no_run
//! use perfseries_core::{Recorder, Sample};
//! use perfseries_report::{write_run, OutputOptions};
//!
//! let recorder = Recorder::new();
//! recorder.record(Sample::new("search", "postgres", "com.example.Test", 1, 63.11))?;
//!
//! let report = write_run(&recorder, "perf-tests-output", OutputOptions::default())?;
//! assert!(report.is_complete());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`amd`] - Series rendering and the file name convention
//! - [`io`] - Writing series, summary and manifest files
//! - [`markdown`] - Markdown report generation
//! - [`result`] - Run outcome and manifest types

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod amd;
pub mod error;
pub mod io;
pub mod markdown;
pub mod result;

pub use amd::serialize;
pub use error::{ReportError, Result};
pub use io::OutputOptions;
pub use result::{FailedSeries, Manifest, ManifestEntry, RunReport, WrittenSeries};

use perfseries_core::Recorder;
use std::path::Path;

/// Snapshot `recorder` and write all outputs to `dir`.
///
/// # Errors
///
/// Returns an error if the output directory or a supplementary file cannot
/// be written. Per-series failures are listed in the returned report.
pub fn write_run(
    recorder: &Recorder,
    dir: impl AsRef<Path>,
    options: OutputOptions,
) -> Result<RunReport> {
    let snapshot = recorder.snapshot();
    io::write_all_outputs(dir, snapshot.series(), options)
}
