// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Command-line interface of plancal.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_debug_implementations,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro
)]

mod arg;
mod calendar_formatter;
mod category_formatter;
mod cli;
mod cmd_calendar;
mod cmd_category;
mod cmd_content;
mod cmd_dashboard;
mod cmd_generate_completion;
mod cmd_schedule;
mod cmd_session;
mod cmd_toplevel;
mod config;
mod content_formatter;
mod table;
mod util;

use std::error::Error;

use colored::Colorize;
use tracing_subscriber::EnvFilter;

pub use crate::cli::{Cli, Commands};
pub use crate::config::parse_config;

/// Run the plancal command-line interface.
///
/// # Errors
///
/// Never fails at the moment; command errors are printed instead.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                eprintln!("{} {}", "Error:".red(), e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            std::process::exit(2);
        }
    }
    Ok(())
}
