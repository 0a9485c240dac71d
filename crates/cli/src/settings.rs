// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI settings.
//!
//! Settings are layered, later sources winning:
//!
//! 1. built-in defaults
//! 2. `perfseries.toml` in the working directory, or the file given with
//!    `--config`
//! 3. `PERFSERIES_*` environment variables (a `.env` file is loaded first)
//! 4. command-line flags

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File};
use perfseries_report::io::{OutputOptions, OUTPUT_DIR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "perfseries";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "PERFSERIES";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Effective CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory receiving the series files.
    pub output_dir: PathBuf,
    /// Default log filter, overridden by `RUST_LOG`.
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// Write `summary.md` next to the series files.
    pub write_summary: bool,
    /// Write `manifest.json` next to the series files.
    pub write_manifest: bool,
}

impl Settings {
    /// Load settings from defaults, the config file and the environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("output_dir", OUTPUT_DIR)?
            .set_default("log_level", "info")?
            .set_default("log_format", "pretty")?
            .set_default("write_summary", true)?
            .set_default("write_manifest", true)?;

        let builder = match config_file {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    /// Output options derived from these settings.
    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            summary: self.write_summary,
            manifest: self.write_manifest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // `Settings::load` reads the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        // An explicit file must exist.
        assert!(Settings::load(Some(missing.as_path())).is_err());

        let empty = dir.path().join("empty.toml");
        std::fs::write(&empty, "").unwrap();
        let settings = Settings::load(Some(empty.as_path())).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from(OUTPUT_DIR));
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.log_format, LogFormat::Pretty);
        assert_eq!(settings.output_options(), OutputOptions::default());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perfseries.toml");
        std::fs::write(
            &path,
            "output_dir = \"app\"\nlog_format = \"json\"\nwrite_manifest = false\n",
        )
        .unwrap();

        let settings = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("app"));
        assert_eq!(settings.log_format, LogFormat::Json);
        assert!(settings.write_summary);
        assert!(!settings.write_manifest);
        assert_eq!(
            settings.output_options(),
            OutputOptions {
                summary: true,
                manifest: false,
            }
        );
    }

    #[test]
    fn test_environment_overrides_config_file() {
        let _env = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("perfseries.toml");
        std::fs::write(&path, "output_dir = \"from_file\"\nlog_level = \"debug\"\n").unwrap();

        std::env::set_var("PERFSERIES_OUTPUT_DIR", "from_env");
        std::env::set_var("PERFSERIES_WRITE_SUMMARY", "false");
        let settings = Settings::load(Some(path.as_path()));
        std::env::remove_var("PERFSERIES_OUTPUT_DIR");
        std::env::remove_var("PERFSERIES_WRITE_SUMMARY");

        let settings = settings.unwrap();
        assert_eq!(settings.output_dir, PathBuf::from("from_env"));
        assert_eq!(settings.log_level, "debug");
        assert!(!settings.write_summary);
        assert!(settings.write_manifest);
    }
}
