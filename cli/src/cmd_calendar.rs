// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use plancal_core::{Id, Planner, YearMonth};

use crate::arg::CommonArgs;
use crate::calendar_formatter::CalendarFormatter;
use crate::content_formatter::{ContentColumn, ContentFormatter};
use crate::util::{OutputFormat, parse_month};

#[derive(Debug, Clone)]
pub struct CmdCalendar {
    pub month: Option<String>,
    pub category: Option<Id>,
    pub output_format: OutputFormat,
}

impl CmdCalendar {
    pub const NAME: &str = "calendar";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("cal")
            .about("Show a month with scheduled content and preparation days")
            .arg(arg!(-m --month <MONTH> "Month to show (YYYY-MM, this, next or prev)"))
            .arg(CommonArgs::category_filter())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            month: matches.get_one("month").cloned(),
            category: CommonArgs::get_category_filter(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "showing calendar...");
        let month = match &self.month {
            Some(month) => parse_month(month, planner.today())?,
            None => YearMonth::from(planner.today()),
        };
        Self::show(planner, month, self.category.as_ref(), self.output_format).await
    }

    pub async fn show(
        planner: &Planner,
        month: YearMonth,
        category: Option<&Id>,
        output_format: OutputFormat,
    ) -> Result<(), Box<dyn Error>> {
        let view = planner.month_view(month, category).await?;
        let formatter = CalendarFormatter::new().with_output_format(output_format);
        println!("{}", formatter.format(&view));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdBacklog {
    pub category: Option<Id>,
    pub output_format: OutputFormat,
}

impl CmdBacklog {
    pub const NAME: &str = "backlog";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List content items waiting for a publish date")
            .arg(CommonArgs::category_filter())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            category: CommonArgs::get_category_filter(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing backlog...");
        Self::list(planner, self.category.as_ref(), self.output_format).await
    }

    pub async fn list(
        planner: &Planner,
        category: Option<&Id>,
        output_format: OutputFormat,
    ) -> Result<(), Box<dyn Error>> {
        let items = planner.backlog(category).await?;
        if items.is_empty() && output_format == OutputFormat::Table {
            println!("{}", "Backlog is empty".italic());
            return Ok(());
        }

        let columns = vec![
            ContentColumn::ShortId,
            ContentColumn::Stage,
            ContentColumn::Social,
            ContentColumn::TimelineDays,
            ContentColumn::Category,
            ContentColumn::Name,
        ];
        let formatter = ContentFormatter::new(planner.today())
            .with_columns(columns)
            .with_output_format(output_format);
        println!("{}", formatter.format(&items));
        Ok(())
    }
}
