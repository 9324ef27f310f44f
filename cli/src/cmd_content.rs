// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgGroup, ArgMatches, Command, arg};
use colored::Colorize;
use jiff::civil::Date;
use plancal_core::{
    ContentConditions, ContentItem, ContentPatch, ContentSort, ContentSortKey, Id, Kind, Pager,
    Planner, Platform, SortOrder, Stage, check_day_drop,
};

use crate::arg::{CommonArgs, ContentArgs, IdArgs};
use crate::content_formatter::{ContentColumn, ContentDetail, ContentFormatter};
use crate::util::{OutputFormat, parse_date};

#[derive(Debug, Clone)]
pub struct CmdContentNew {
    pub name: String,
    pub category: Id,
    pub stage: Option<Stage>,
    pub social: Option<Platform>,
    pub timeline_days: Option<u32>,
    pub raw_urls: Option<Vec<String>>,
    pub inspo_urls: Option<Vec<String>>,
    pub final_url: Option<String>,
    pub date: Option<String>,

    pub output_format: OutputFormat,
}

impl CmdContentNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new content item")
            .arg(ContentArgs::name(true))
            .arg(ContentArgs::category(true))
            .arg(ContentArgs::stage())
            .arg(ContentArgs::social())
            .arg(ContentArgs::timeline_days())
            .arg(ContentArgs::raw_url())
            .arg(ContentArgs::inspo_url())
            .arg(ContentArgs::final_url())
            .arg(ContentArgs::date())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            name: ContentArgs::get_name(matches).expect("name is required"),
            category: ContentArgs::get_category(matches).expect("category is required"),
            stage: ContentArgs::get_stage(matches),
            social: ContentArgs::get_social(matches),
            timeline_days: ContentArgs::get_timeline_days(matches),
            raw_urls: ContentArgs::get_raw_urls(matches),
            inspo_urls: ContentArgs::get_inspo_urls(matches),
            final_url: ContentArgs::get_final_url(matches),
            date: ContentArgs::get_date(matches),

            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding new content item...");

        let mut draft = planner.default_content_draft();
        draft.name = self.name;
        draft.category_id = self.category.as_uid().to_string();
        draft.stage = self.stage.unwrap_or(draft.stage);
        draft.social = self.social.unwrap_or(draft.social);
        draft.timeline_days = self.timeline_days.unwrap_or(draft.timeline_days);
        draft.raw_file_urls = self.raw_urls.unwrap_or_default();
        draft.inspo_urls = self.inspo_urls.unwrap_or_default();
        draft.final_url = self.final_url.filter(|a| !a.is_empty());

        if let Some(date) = &self.date {
            let date = parse_date(date, planner.today())?;
            check_day_drop(date, draft.timeline_days, planner.today())?;
            draft.scheduled_date = Some(date);
        }

        let item = planner.new_content(draft).await?;
        print_items(planner, &[item], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdContentEdit {
    pub id: Id,
    pub name: Option<String>,
    pub category: Option<Id>,
    pub stage: Option<Stage>,
    pub social: Option<Platform>,
    pub timeline_days: Option<u32>,
    pub raw_urls: Option<Vec<String>>,
    pub inspo_urls: Option<Vec<String>>,
    pub final_url: Option<String>,
    pub date: Option<String>,

    pub output_format: OutputFormat,
}

impl CmdContentEdit {
    pub const NAME: &str = "edit";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Edit a content item")
            .arg(IdArgs::new(Kind::Content).id("edit"))
            .arg(ContentArgs::name(false))
            .arg(ContentArgs::category(false))
            .arg(ContentArgs::stage())
            .arg(ContentArgs::social())
            .arg(ContentArgs::timeline_days())
            .arg(ContentArgs::raw_url())
            .arg(ContentArgs::inspo_url())
            .arg(ContentArgs::final_url())
            .arg(ContentArgs::date())
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: IdArgs::get_id(matches),
            name: ContentArgs::get_name(matches),
            category: ContentArgs::get_category(matches),
            stage: ContentArgs::get_stage(matches),
            social: ContentArgs::get_social(matches),
            timeline_days: ContentArgs::get_timeline_days(matches),
            raw_urls: ContentArgs::get_raw_urls(matches),
            inspo_urls: ContentArgs::get_inspo_urls(matches),
            final_url: ContentArgs::get_final_url(matches),
            date: ContentArgs::get_date(matches),

            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "editing content item...");

        let mut patch = ContentPatch {
            category_id: self.category.map(|a| a.as_uid().to_string()),
            name: self.name,
            raw_file_urls: self.raw_urls,
            inspo_urls: self.inspo_urls,
            final_url: self.final_url.map(|a| (!a.is_empty()).then_some(a)),
            stage: self.stage,
            social: self.social,
            timeline_days: self.timeline_days,
            scheduled_date: None,
        };

        if let Some(date) = &self.date {
            let date = parse_date(date, planner.today())?;
            let timeline_days = match patch.timeline_days {
                Some(days) => days,
                None => planner.get_content(&self.id).await?.timeline_days,
            };
            check_day_drop(date, timeline_days, planner.today())?;
            patch.scheduled_date = Some(Some(date));
        }

        if patch.is_empty() {
            return Err("Nothing to change, pass at least one field to edit".into());
        }

        let item = planner.update_content(&self.id, patch).await?;
        print_items(planner, &[item], self.output_format);
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdContentShow {
    pub id: Id,
    pub output_format: OutputFormat,
}

impl CmdContentShow {
    pub const NAME: &str = "show";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Show every field of a content item")
            .arg(IdArgs::new(Kind::Content).id("show"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: IdArgs::get_id(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        let item = planner.get_content(&self.id).await?;
        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&item)?),
            OutputFormat::Table => println!("{}", ContentDetail { item: &item }),
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdContentDelete {
    pub ids: Vec<Id>,
}

impl CmdContentDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete content items")
            .arg(IdArgs::new(Kind::Content).ids("delete"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: IdArgs::get_ids(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        for id in self.ids {
            tracing::debug!(%id, "deleting content item");
            let item = planner.delete_content(&id).await?;
            println!("{} {}", "Deleted".red(), item.name);
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdContentList {
    pub category: Option<Id>,
    pub stage: Option<Stage>,
    pub social: Option<Platform>,
    pub scheduled: Option<bool>,
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdContentList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List content items")
            .arg(CommonArgs::category_filter())
            .arg(ContentArgs::stage())
            .arg(ContentArgs::social())
            .arg(arg!(--scheduled "Only show items with a publish date"))
            .arg(arg!(--unscheduled "Only show items in the backlog"))
            .group(ArgGroup::new("schedule").args(["scheduled", "unscheduled"]))
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let scheduled = if matches.get_flag("scheduled") {
            Some(true)
        } else if matches.get_flag("unscheduled") {
            Some(false)
        } else {
            None
        };

        Self {
            category: CommonArgs::get_category_filter(matches),
            stage: ContentArgs::get_stage(matches),
            social: ContentArgs::get_social(matches),
            scheduled,
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing content items...");
        const MAX: i64 = 128;

        let category_id = match &self.category {
            Some(id) => Some(planner.get_category(id).await?.id),
            None => None,
        };
        let conds = ContentConditions {
            category_id,
            scheduled: self.scheduled,
            stage: self.stage,
            social: self.social,
            ..Default::default()
        };
        let sort = [
            ContentSort::from((ContentSortKey::ScheduledDate, SortOrder::Asc)),
            ContentSort::from((ContentSortKey::CreatedAt, SortOrder::Asc)),
        ];
        let pager: Pager = (MAX, 0).into();

        let items = planner.list_contents(&conds, &sort, Some(&pager)).await?;
        if items.len() >= usize::try_from(MAX).unwrap_or(usize::MAX) {
            let total = planner.count_contents(&conds).await?;
            if total > MAX {
                println!("Displaying the {MAX}/{total} content items");
            }
        } else if items.is_empty() && self.output_format == OutputFormat::Table {
            println!("{}", "No content found".italic());
            return Ok(());
        }

        let mut formatter =
            ContentFormatter::new(planner.today()).with_output_format(self.output_format);
        if self.verbose {
            formatter = formatter.with_columns(verbose_columns(planner.today()));
        }
        println!("{}", formatter.format(&items));
        Ok(())
    }
}

fn verbose_columns(today: Date) -> Vec<ContentColumn> {
    vec![
        ContentColumn::ShortId,
        ContentColumn::Uid,
        ContentColumn::Scheduled { today },
        ContentColumn::TimelineDays,
        ContentColumn::Stage,
        ContentColumn::Social,
        ContentColumn::Category,
        ContentColumn::Name,
    ]
}

/// Prints changed items in the requested format.
pub fn print_items(planner: &Planner, items: &[ContentItem], output_format: OutputFormat) {
    let formatter = ContentFormatter::new(planner.today()).with_output_format(output_format);
    println!("{}", formatter.format(items));
}
