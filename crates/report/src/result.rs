// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! Outcome types for a report run.
//!
//! A [`RunReport`] lists every series that was written and every series
//! that failed, so a long benchmark run still yields its usable output.

use chrono::{DateTime, Utc};
use perfseries_core::SeriesKey;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// A series file that was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenSeries {
    /// Series key.
    pub key: SeriesKey,
    /// Path of the written file.
    pub path: PathBuf,
    /// Number of points in the file.
    pub samples: usize,
}

/// A series that could not be written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedSeries {
    /// Series key.
    pub key: SeriesKey,
    /// Why it failed.
    pub reason: String,
}

/// Outcome of writing all outputs of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique identifier of this report run.
    pub run_id: Uuid,
    /// When the outputs were generated.
    pub generated_at: DateTime<Utc>,
    /// Series written, in key order.
    pub written: Vec<WrittenSeries>,
    /// Series that failed, in key order.
    pub failed: Vec<FailedSeries>,
}

impl RunReport {
    /// Create an empty report stamped with a fresh run id.
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            written: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Whether every series was written.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of points written across all files.
    pub fn samples_written(&self) -> usize {
        self.written.iter().map(|w| w.samples).sum()
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry of the output manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Operation name.
    pub operation: String,
    /// Database kind.
    pub dbtype: String,
    /// Subject identifier.
    pub master: String,
    /// File name relative to the output directory.
    pub file: String,
    /// Number of points in the file.
    pub samples: usize,
}

/// Index of the series files of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Run identifier, matching [`RunReport::run_id`].
    pub run_id: Uuid,
    /// When the outputs were generated.
    pub generated_at: DateTime<Utc>,
    /// Written files in key order.
    pub files: Vec<ManifestEntry>,
}

impl From<&RunReport> for Manifest {
    fn from(report: &RunReport) -> Self {
        let files = report
            .written
            .iter()
            .map(|w| ManifestEntry {
                operation: w.key.operation.clone(),
                dbtype: w.key.dbtype.clone(),
                master: w.key.master.clone(),
                file: w
                    .path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                samples: w.samples,
            })
            .collect();

        Self {
            run_id: report.run_id,
            generated_at: report.generated_at,
            files,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_complete() {
        let report = RunReport::new();
        assert!(report.is_complete());
        assert_eq!(report.samples_written(), 0);
        assert!(report.generated_at <= Utc::now());
    }

    #[test]
    fn test_manifest_uses_file_names() {
        let mut report = RunReport::new();
        report.written.push(WrittenSeries {
            key: SeriesKey::new("search", "postgres", "a.Test"),
            path: PathBuf::from("out/postgres_a.Test_search.js"),
            samples: 3,
        });

        let manifest = Manifest::from(&report);
        assert_eq!(manifest.run_id, report.run_id);
        assert_eq!(
            manifest.files,
            vec![ManifestEntry {
                operation: "search".to_string(),
                dbtype: "postgres".to_string(),
                master: "a.Test".to_string(),
                file: "postgres_a.Test_search.js".to_string(),
                samples: 3,
            }]
        );
    }
}
