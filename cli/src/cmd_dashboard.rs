// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command};
use colored::Colorize;
use plancal_core::{Planner, YearMonth};

use crate::cmd_calendar::{CmdBacklog, CmdCalendar};
use crate::cmd_category::CmdCategoryList;
use crate::util::OutputFormat;

#[derive(Debug, Default, Clone, Copy)]
pub struct CmdDashboard;

impl CmdDashboard {
    pub const NAME: &str = "dashboard";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show the dashboard, which includes this month, categories and the backlog")
    }

    pub fn from(_matches: &ArgMatches) -> Self {
        Self
    }

    /// Show the current month, the categories and the backlog.
    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "generating dashboard...");

        let month = YearMonth::from(planner.today());
        println!("🗓️ {}", "Calendar".bold());
        CmdCalendar::show(planner, month, None, OutputFormat::Table).await?;
        println!();

        println!("🏷️ {}", "Categories".bold());
        CmdCategoryList::list(planner, OutputFormat::Table, false).await?;
        println!();

        println!("📥 {}", "Backlog".bold());
        CmdBacklog::list(planner, None, OutputFormat::Table).await?;
        Ok(())
    }
}
