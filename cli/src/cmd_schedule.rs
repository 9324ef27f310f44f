// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use plancal_core::{Id, Kind, Planner, ScheduleError};

use crate::arg::{CommonArgs, IdArgs};
use crate::cmd_content::print_items;
use crate::util::{OutputFormat, parse_date};

#[derive(Debug, Clone)]
pub struct CmdSchedule {
    pub id: Id,
    pub date: String,
    pub output_format: OutputFormat,
}

impl CmdSchedule {
    pub const NAME: &str = "schedule";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Put a content item on a publish date")
            .arg(IdArgs::new(Kind::Content).id("schedule"))
            .arg(arg!(date: <DATE> "Publish date (YYYY-MM-DD, today, tomorrow or +N)"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: IdArgs::get_id(matches),
            date: matches
                .get_one::<String>("date")
                .expect("date is required")
                .clone(),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "scheduling content item...");
        let date = parse_date(&self.date, planner.today())?;

        let item = match planner.schedule(&self.id, date).await {
            Ok(item) => item,
            Err(err) => {
                return match err.downcast_ref::<ScheduleError>() {
                    Some(reason) => Err(format!("Cannot schedule {}: {reason}", self.id).into()),
                    None => Err(err),
                };
            }
        };

        print_items(planner, &[item], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdUnschedule {
    pub ids: Vec<Id>,
    pub output_format: OutputFormat,
}

impl CmdUnschedule {
    pub const NAME: &str = "unschedule";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Move content items back to the backlog")
            .arg(IdArgs::new(Kind::Content).ids("unschedule"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: IdArgs::get_ids(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        let mut items = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            tracing::debug!(%id, "moving content item to backlog");
            items.push(planner.unschedule(id).await?);
        }

        print_items(planner, &items, self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdAdvance {
    pub ids: Vec<Id>,
    pub output_format: OutputFormat,
}

impl CmdAdvance {
    pub const NAME: &str = "advance";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Move content items to their next production stage")
            .arg(IdArgs::new(Kind::Content).ids("advance"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: IdArgs::get_ids(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        let mut items = Vec::with_capacity(self.ids.len());
        for id in &self.ids {
            tracing::debug!(%id, "advancing content item");
            items.push(planner.advance_stage(id).await?);
        }

        print_items(planner, &items, self.output_format);
        Ok(())
    }
}
