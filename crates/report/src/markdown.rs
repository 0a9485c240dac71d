// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! Markdown output generation for result series.

use crate::result::FailedSeries;
use perfseries_core::ResultSeries;
use std::fmt::{self, Write};

/// Generate a markdown summary of a run.
///
/// Empty series have nothing to summarize and are skipped; report them
/// through `failed` instead.
pub fn generate_summary(series: &[ResultSeries], failed: &[FailedSeries]) -> String {
    let mut output = String::new();
    write_summary(&mut output, series, failed).expect("writing to a String cannot fail");
    output
}

fn write_summary(
    output: &mut String,
    series: &[ResultSeries],
    failed: &[FailedSeries],
) -> fmt::Result {
    writeln!(output, "# Benchmark Summary")?;
    writeln!(output)?;
    writeln!(output, "Generated: {}", chrono::Utc::now().to_rfc3339())?;
    writeln!(output)?;
    writeln!(output, "## Series")?;
    writeln!(output)?;
    writeln!(
        output,
        "| DB Type | Master | Operation | Samples | Indices | Min | Mean | Median | P95 | Max |"
    )?;
    writeln!(
        output,
        "|---------|--------|-----------|---------|---------|-----|------|--------|-----|-----|"
    )?;

    let mut summarized = 0;
    let mut samples = 0;
    for s in series {
        let Some(summary) = s.summary() else {
            continue;
        };
        summarized += 1;
        samples += summary.count;
        writeln!(
            output,
            "| {} | {} | {} | {} | {}..{} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |",
            s.dbtype(),
            s.master(),
            s.operation(),
            summary.count,
            summary.first_index,
            summary.last_index,
            summary.min,
            summary.mean,
            summary.median,
            summary.p95,
            summary.max,
        )?;
    }

    if !failed.is_empty() {
        writeln!(output)?;
        writeln!(output, "## Failed")?;
        writeln!(output)?;
        for f in failed {
            writeln!(output, "- `{}`: {}", f.key, f.reason)?;
        }
    }

    writeln!(output)?;
    writeln!(output, "---")?;
    writeln!(output, "Total series: {}", summarized)?;
    writeln!(output, "Total samples: {}", samples)?;
    if !failed.is_empty() {
        writeln!(output, "Failed series: {}", failed.len())?;
    }

    Ok(())
}
