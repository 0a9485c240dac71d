// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! Sample input type and the series grouping key.

use crate::error::{InvalidSampleError, SampleField};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One timed measurement produced by a benchmark harness.
///
/// Field names follow the reporting file contract, so the subject
/// identifier is called `master`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Operation name (e.g. "search").
    pub operation: String,
    /// Database kind under test (e.g. "postgres").
    pub dbtype: String,
    /// Fully-qualified name of the measured subject.
    pub master: String,
    /// Sequence index. Used only for ordering, gaps are allowed.
    pub index: u64,
    /// Elapsed time, unit chosen by the harness.
    pub duration: f64,
}

impl Sample {
    /// Create a new sample.
    pub fn new(
        operation: impl Into<String>,
        dbtype: impl Into<String>,
        master: impl Into<String>,
        index: u64,
        duration: f64,
    ) -> Self {
        Self {
            operation: operation.into(),
            dbtype: dbtype.into(),
            master: master.into(),
            index,
            duration,
        }
    }

    /// Check the sample against the recording rules.
    ///
    /// Key components must be non-empty and the duration must be a finite,
    /// non-negative number.
    pub fn validate(&self) -> Result<(), InvalidSampleError> {
        let fields = [
            (SampleField::Operation, &self.operation),
            (SampleField::DbType, &self.dbtype),
            (SampleField::Master, &self.master),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(InvalidSampleError::EmptyField { field: *field });
        }

        if !self.duration.is_finite() {
            return Err(InvalidSampleError::NonFiniteDuration {
                duration: self.duration,
            });
        }
        if self.duration < 0.0 {
            return Err(InvalidSampleError::NegativeDuration {
                duration: self.duration,
            });
        }

        Ok(())
    }

    /// The grouping key of this sample.
    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(&self.operation, &self.dbtype, &self.master)
    }
}

/// Grouping key for a [`crate::ResultSeries`].
///
/// Keys order by database kind, then subject, then operation, which keeps
/// snapshots and reports stable between runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SeriesKey {
    /// Database kind.
    pub dbtype: String,
    /// Subject identifier.
    pub master: String,
    /// Operation name.
    pub operation: String,
}

impl SeriesKey {
    /// Create a new key.
    pub fn new(
        operation: impl Into<String>,
        dbtype: impl Into<String>,
        master: impl Into<String>,
    ) -> Self {
        Self {
            dbtype: dbtype.into(),
            master: master.into(),
            operation: operation.into(),
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.dbtype, self.master, self.operation)
    }
}
