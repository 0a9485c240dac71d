// Copyright 2025 perfseries Contributors
// SPDX-License-Identifier: Apache-2.0

//! perfseries CLI entry point.

fn main() {
    if let Err(e) = perfseries_cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
