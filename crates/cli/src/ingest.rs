// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! Sample ingestion from JSON Lines input.
//!
//! Each non-blank line holds one sample:
//!
//! ```text
//! {"operation":"search","dbtype":"postgres","master":"com.example.Test","index":1,"duration":63.11}
//! ```

use perfseries_core::{InvalidSampleError, Recorder, Sample};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Input path meaning standard input.
pub const STDIN: &str = "-";

/// Why a line was not recorded.
#[derive(Debug, Error)]
pub enum LineError {
    /// The line is not a JSON sample.
    #[error("malformed sample: {0}")]
    Parse(#[from] serde_json::Error),

    /// The sample failed validation.
    #[error(transparent)]
    Invalid(#[from] InvalidSampleError),
}

/// A rejected input line.
#[derive(Debug)]
pub struct RejectedLine {
    /// One-based line number.
    pub line: usize,
    /// Why it was rejected.
    pub error: LineError,
}

/// Counts from one ingestion pass.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Samples recorded.
    pub accepted: usize,
    /// Lines rejected, in input order.
    pub rejected: Vec<RejectedLine>,
}

impl IngestReport {
    /// Whether every sample line was recorded.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Open `path` for reading, `-` meaning standard input.
pub fn open_input(path: &Path) -> io::Result<Box<dyn BufRead>> {
    if path.as_os_str() == STDIN {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    Ok(Box::new(BufReader::new(File::open(path)?)))
}

/// Record every sample of `reader` into `recorder`.
///
/// Bad lines are reported and skipped.
///
/// # Errors
///
/// Returns an error only if reading the input fails.
pub fn ingest(reader: impl BufRead, recorder: &Recorder) -> io::Result<IngestReport> {
    let mut report = IngestReport::default();

    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = serde_json::from_str::<Sample>(&line)
            .map_err(LineError::from)
            .and_then(|sample| recorder.record(sample).map_err(LineError::from));

        match outcome {
            Ok(()) => report.accepted += 1,
            Err(error) => {
                warn!(line = n + 1, error = %error, "skipped input line");
                report.rejected.push(RejectedLine { line: n + 1, error });
            }
        }
    }

    Ok(report)
}
