// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core types for perfseries.
//!
//! This crate records timed samples produced by a database benchmark harness
//! and groups them into one [`ResultSeries`] per
//! (operation, database kind, subject) key.
//!
//! # Quick Start
//!
//! ```
//! use perfseries_core::{Recorder, Sample};
//!
//! let recorder = Recorder::new();
//! recorder
//!     .record(Sample::new("search", "postgres", "com.example.DbConfigMasterBulkTest", 1, 63.11))
//!     .unwrap();
//!
//! let snapshot = recorder.snapshot();
//! assert_eq!(snapshot.len(), 1);
//! ```
//!
//! # Modules
//!
//! - [`sample`] - The `Sample` input type and the `SeriesKey` grouping key
//! - [`series`] - Ordered `ResultSeries` of (index, duration) points
//! - [`recorder`] - The concurrent `Recorder` and its `Snapshot`
//! - [`stats`] - Summary statistics over a series
//! - [`error`] - Error taxonomy

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod error;
pub mod recorder;
pub mod sample;
pub mod series;
pub mod stats;

pub use error::{InvalidSampleError, SampleField, SerializationError};
pub use recorder::{RecordOutcome, Recorder, Rejection, Snapshot};
pub use sample::{Sample, SeriesKey};
pub use series::{ResultSeries, SeriesPoint};
pub use stats::SeriesSummary;
