// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! I/O operations for result series.
//!
//! This module writes rendered series, the markdown summary and the JSON
//! manifest into an output directory. Every file is opened, written through
//! a buffer and flushed in one scope, so the handle is released on every
//! exit path.

use crate::amd;
use crate::error::{ReportError, Result};
use crate::markdown;
use crate::result::{FailedSeries, Manifest, RunReport, WrittenSeries};
use perfseries_core::ResultSeries;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default output directory path.
pub const OUTPUT_DIR: &str = "perf-tests-output";

/// Summary file name inside the output directory.
pub const SUMMARY_FILE: &str = "summary.md";

/// Manifest file name inside the output directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Which supplementary files to write next to the series files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    /// Write `summary.md`.
    pub summary: bool,
    /// Write `manifest.json`.
    pub manifest: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            summary: true,
            manifest: true,
        }
    }
}

/// Ensure the output directory exists.
pub fn ensure_output_dir(dir: impl AsRef<Path>) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

/// Write one series to `<dir>/<dbtype>_<master>_<operation>.js`.
pub fn write_series(dir: impl AsRef<Path>, series: &ResultSeries) -> Result<WrittenSeries> {
    let contents = amd::serialize(series)?;
    let path = dir.as_ref().join(amd::file_name(series));
    write_file(&path, &contents)?;
    debug!(series = %series.key(), path = %path.display(), samples = series.len(), "wrote series");

    Ok(WrittenSeries {
        key: series.key().clone(),
        path,
        samples: series.len(),
    })
}

/// Write the markdown summary.
pub fn write_summary(
    dir: impl AsRef<Path>,
    series: &[ResultSeries],
    failed: &[FailedSeries],
) -> Result<PathBuf> {
    let path = dir.as_ref().join(SUMMARY_FILE);
    write_file(&path, &markdown::generate_summary(series, failed))?;
    Ok(path)
}

/// Write the manifest of the files listed in `report`.
pub fn write_manifest(dir: impl AsRef<Path>, report: &RunReport) -> Result<PathBuf> {
    let path = dir.as_ref().join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&Manifest::from(report))?;
    write_file(&path, &json)?;
    Ok(path)
}

/// Write every series plus the supplementary files.
///
/// A series that fails is recorded in the returned report and the rest
/// are still written. Distinct keys can map to the same file name (for
/// example masters `a/b` and `a_b`); the first series in key order keeps
/// the file and the later ones fail instead of overwriting it.
///
/// # Errors
///
/// Returns an error only if the output directory cannot be created or a
/// supplementary file cannot be written.
pub fn write_all_outputs(
    dir: impl AsRef<Path>,
    series: &[ResultSeries],
    options: OutputOptions,
) -> Result<RunReport> {
    let dir = dir.as_ref();
    ensure_output_dir(dir)?;

    let mut report = RunReport::new();
    let mut taken = HashSet::new();
    for s in series {
        let file = amd::file_name(s);
        let outcome = if taken.contains(&file) {
            Err(ReportError::FileNameTaken {
                key: s.key().clone(),
                file,
            })
        } else {
            let written = write_series(dir, s);
            if written.is_ok() {
                taken.insert(file);
            }
            written
        };
        match outcome {
            Ok(written) => report.written.push(written),
            Err(err) => {
                warn!(series = %s.key(), error = %err, "failed to write series");
                report.failed.push(FailedSeries {
                    key: s.key().clone(),
                    reason: err.to_string(),
                });
            }
        }
    }

    if options.summary {
        write_summary(dir, series, &report.failed)?;
    }
    if options.manifest {
        write_manifest(dir, &report)?;
    }

    info!(
        dir = %dir.display(),
        written = report.written.len(),
        failed = report.failed.len(),
        samples = report.samples_written(),
        "wrote run outputs"
    );
    Ok(report)
}

/// Read a manifest back from disk.
pub fn read_manifest(path: impl AsRef<Path>) -> Result<Manifest> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    writer.write_all(contents.as_bytes()).map_err(io_error)?;
    writer.flush().map_err(io_error)
}
