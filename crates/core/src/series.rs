// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! Result series types.

use crate::sample::SeriesKey;
use crate::stats::SeriesSummary;
use serde::{Deserialize, Serialize};

/// One (index, duration) pair of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Sequence index.
    pub index: u64,
    /// Measured duration.
    pub duration: f64,
}

impl SeriesPoint {
    /// Create a new point.
    pub fn new(index: u64, duration: f64) -> Self {
        Self {
            index,
            // -0.0 becomes 0.0.
            duration: duration + 0.0,
        }
    }
}

impl From<(u64, f64)> for SeriesPoint {
    fn from((index, duration): (u64, f64)) -> Self {
        Self::new(index, duration)
    }
}

/// All points recorded for one (operation, dbtype, master) key.
///
/// Points are ordered by index ascending. Points sharing an index keep the
/// order in which they were recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSeries {
    key: SeriesKey,
    points: Vec<SeriesPoint>,
}

impl ResultSeries {
    /// Create a series with no points.
    pub fn empty(key: SeriesKey) -> Self {
        Self {
            key,
            points: Vec::new(),
        }
    }

    /// Create a series from points in recording order.
    pub fn from_recorded(key: SeriesKey, mut points: Vec<SeriesPoint>) -> Self {
        // `sort_by_key` is stable, ties stay in recording order.
        points.sort_by_key(|p| p.index);
        Self { key, points }
    }

    /// The series key.
    pub fn key(&self) -> &SeriesKey {
        &self.key
    }

    /// Operation name.
    pub fn operation(&self) -> &str {
        &self.key.operation
    }

    /// Database kind.
    pub fn dbtype(&self) -> &str {
        &self.key.dbtype
    }

    /// Subject identifier.
    pub fn master(&self) -> &str {
        &self.key.master
    }

    /// Points ordered by index.
    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no points were recorded.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Summary statistics, `None` for an empty series.
    pub fn summary(&self) -> Option<SeriesSummary> {
        SeriesSummary::compute(&self.points)
    }
}
