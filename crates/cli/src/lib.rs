// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI for perfseries.
//!
//! This crate reads benchmark samples emitted by a harness, groups them
//! per (operation, dbtype, master) key and writes one reporting file per
//! key for the charting viewer.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod ingest;
pub mod logging;
pub mod settings;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use colored::Colorize;
use ingest::IngestReport;
use perfseries_core::Recorder;
use perfseries_report::{io, markdown, RunReport};
use settings::{LogFormat, Settings};
use std::io::BufRead;
use std::path::PathBuf;
use tracing::info;

/// perfseries CLI.
#[derive(Parser, Debug)]
#[command(name = "perfseries")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./perfseries.toml when present).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `perfseries_core=trace`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format.
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record samples and write one reporting file per series.
    ///
    /// Files are named `<dbtype>_<master>_<operation>.js`. A markdown
    /// summary (`summary.md`) and a manifest (`manifest.json`) are written
    /// alongside unless disabled.
    Run {
        /// JSON Lines sample input, `-` for stdin.
        #[arg(short, long, default_value = ingest::STDIN)]
        input: PathBuf,

        /// Output directory override.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not write `summary.md`.
        #[arg(long)]
        no_summary: bool,

        /// Do not write `manifest.json`.
        #[arg(long)]
        no_manifest: bool,

        /// List every written file.
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print a markdown summary of the samples without writing files.
    Inspect {
        /// JSON Lines sample input, `-` for stdin.
        #[arg(short, long, default_value = ingest::STDIN)]
        input: PathBuf,
    },

    /// Show version and configuration.
    Status {
        /// Print the effective settings.
        #[arg(short, long)]
        detailed: bool,
    },
}

impl Cli {
    /// Load settings and apply the global flag overrides.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings =
            Settings::load(self.config.as_deref()).context("failed to load configuration")?;
        if let Some(level) = &self.log_level {
            settings.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            settings.log_format = format;
        }
        Ok(settings)
    }
}

/// What a `run` produced.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// Ingestion counts.
    pub ingest: IngestReport,
    /// Written and failed series.
    pub report: RunReport,
}

impl PipelineOutcome {
    /// Why the run is incomplete, `None` if nothing failed.
    pub fn failure(&self) -> Option<String> {
        let rejected = self.ingest.rejected.len();
        let failed = self.report.failed.len();
        match (rejected, failed) {
            (0, 0) => None,
            (r, 0) => Some(format!("{r} invalid sample line(s)")),
            (0, f) => Some(format!("{f} series could not be written")),
            (r, f) => Some(format!(
                "{r} invalid sample line(s), {f} series could not be written"
            )),
        }
    }
}

/// Ingest `reader` into a fresh recorder and write all outputs.
pub fn run_pipeline(reader: impl BufRead, settings: &Settings) -> anyhow::Result<PipelineOutcome> {
    let recorder = Recorder::new();
    let ingest = ingest::ingest(reader, &recorder).context("failed to read samples")?;
    info!(
        accepted = ingest.accepted,
        rejected = ingest.rejected.len(),
        series = recorder.len(),
        "ingested samples"
    );

    let report = perfseries_report::write_run(
        &recorder,
        &settings.output_dir,
        settings.output_options(),
    )?;
    Ok(PipelineOutcome { ingest, report })
}

/// Run the CLI with the process arguments.
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error if the command fails or the
/// run was incomplete.
pub fn run() -> anyhow::Result<()> {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = cli.settings()?;
    logging::init(&settings.log_level, settings.log_format)?;
    execute(cli.command, settings)
}

/// Execute one command with resolved settings.
pub fn execute(command: Commands, mut settings: Settings) -> anyhow::Result<()> {
    match command {
        Commands::Run {
            input,
            output,
            no_summary,
            no_manifest,
            verbose,
        } => {
            if let Some(output) = output {
                settings.output_dir = output;
            }
            settings.write_summary &= !no_summary;
            settings.write_manifest &= !no_manifest;

            let reader = ingest::open_input(&input)
                .with_context(|| format!("failed to open input {}", input.display()))?;
            let outcome = run_pipeline(reader, &settings)?;

            for rejected in &outcome.ingest.rejected {
                eprintln!("{} line {}: {}", "rejected".red(), rejected.line, rejected.error);
            }
            for failed in &outcome.report.failed {
                eprintln!("{} {}: {}", "failed".red(), failed.key, failed.reason);
            }

            println!(
                "{} {} series ({} samples) to {}",
                "Wrote".green().bold(),
                outcome.report.written.len(),
                outcome.report.samples_written(),
                settings.output_dir.display()
            );
            if verbose {
                for written in &outcome.report.written {
                    println!("  - {}", written.path.display());
                }
            }

            match outcome.failure() {
                Some(reason) => bail!("run incomplete: {reason}"),
                None => Ok(()),
            }
        }
        Commands::Inspect { input } => {
            let reader = ingest::open_input(&input)
                .with_context(|| format!("failed to open input {}", input.display()))?;
            let recorder = Recorder::new();
            let ingest = ingest::ingest(reader, &recorder).context("failed to read samples")?;

            let snapshot = recorder.snapshot();
            print!("{}", markdown::generate_summary(snapshot.series(), &[]));

            if !ingest.is_clean() {
                bail!("{} invalid sample line(s)", ingest.rejected.len());
            }
            Ok(())
        }
        Commands::Status { detailed } => {
            println!("{}", "perfseries".bold());
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!("Output directory: {}", settings.output_dir.display());

            if detailed {
                println!("\nEffective settings:");
                print!("{}", toml::to_string_pretty(&settings)?);
                println!("\nOutput files:");
                println!("  - <dbtype>_<master>_<operation>.js");
                println!("  - {}", io::SUMMARY_FILE);
                println!("  - {}", io::MANIFEST_FILE);
            }

            Ok(())
        }
    }
}
