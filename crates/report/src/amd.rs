// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! AMD module rendering for result series.
//!
//! The charting viewer loads one file per series with RequireJS. Each file
//! is a module whose factory returns the series:
//!
//! ```text
//! define(function () {
//! return {
//!   operation: "search",
//!   dbtype: "postgres",
//!   master: "com.opengamma.masterdb.DbConfigMasterBulkTest",
//!   data: [[1, 63.11139160618492],
//! [101, 372.1622627465575]]
//! };
//! });
//! ```

use perfseries_core::{ResultSeries, SerializationError};
use std::fmt::{self, Write};

/// File extension of rendered series.
pub const EXTENSION: &str = "js";

/// Render a series as an AMD module.
///
/// Output depends only on the series, so equal series render to identical
/// text.
///
/// # Errors
///
/// Returns [`SerializationError`] if the series has no points.
pub fn serialize(series: &ResultSeries) -> Result<String, SerializationError> {
    if series.is_empty() {
        return Err(SerializationError {
            key: series.key().clone(),
        });
    }

    let mut output = String::with_capacity(128 + series.len() * 28);
    render(series, &mut output).expect("writing to a String cannot fail");
    Ok(output)
}

fn render(series: &ResultSeries, out: &mut String) -> fmt::Result {
    writeln!(out, "define(function () {{")?;
    writeln!(out, "return {{")?;
    writeln!(out, "  operation: {},", js_string(series.operation()))?;
    writeln!(out, "  dbtype: {},", js_string(series.dbtype()))?;
    writeln!(out, "  master: {},", js_string(series.master()))?;
    out.push_str("  data: [");
    for (i, point) in series.points().iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        // `{:?}` keeps the shortest round-trip form and a trailing `.0` on
        // integral values.
        write!(out, "[{}, {:?}]", point.index, point.duration)?;
    }
    writeln!(out, "]")?;
    writeln!(out, "}};")?;
    writeln!(out, "}});")
}

/// File name the viewer expects for a series:
/// `<dbtype>_<master>_<operation>.js`.
pub fn file_name(series: &ResultSeries) -> String {
    format!(
        "{}_{}_{}.{}",
        path_safe(series.dbtype()),
        path_safe(series.master()),
        path_safe(series.operation()),
        EXTENSION
    )
}

/// Quote a string as a JavaScript string literal.
fn js_string(value: &str) -> String {
    // A JSON string literal is a valid JavaScript string literal.
    serde_json::Value::from(value).to_string()
}

fn path_safe(component: &str) -> String {
    component.replace(['/', '\\'], "_")
}
