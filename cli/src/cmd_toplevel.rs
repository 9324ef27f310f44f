// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use colored::Colorize;
use plancal_core::Planner;

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdFlush;

impl CmdFlush {
    pub const NAME: &str = "flush";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Forget all short ids so numbering starts again from 1")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!("flushing short ids...");
        let count = planner.flush_short_ids().await?;
        println!("{} {count} short id(s)", "Flushed".green());
        Ok(())
    }
}
