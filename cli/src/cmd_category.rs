// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use plancal_core::{Id, Kind, Planner};

use crate::arg::{CommonArgs, IdArgs};
use crate::category_formatter::CategoryFormatter;
use crate::util::OutputFormat;

#[derive(Debug, Clone)]
pub struct CmdCategoryNew {
    pub name: String,
    pub output_format: OutputFormat,
}

impl CmdCategoryNew {
    pub const NAME: &str = "new";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("add")
            .about("Add a new category")
            .arg(arg!(name: <NAME> "Name of the category"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            name: get_name(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(name = %self.name, "adding new category...");
        let category = planner.new_category(&self.name).await?;

        let formatter = CategoryFormatter::new(false).with_output_format(self.output_format);
        println!("{}", formatter.format(&[category]));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdCategoryRename {
    pub id: Id,
    pub name: String,
    pub output_format: OutputFormat,
}

impl CmdCategoryRename {
    pub const NAME: &str = "rename";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Rename a category")
            .arg(IdArgs::new(Kind::Category).id("rename"))
            .arg(arg!(name: <NAME> "New name of the category"))
            .arg(CommonArgs::output_format())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            id: IdArgs::get_id(matches),
            name: get_name(matches),
            output_format: CommonArgs::get_output_format(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(id = %self.id, name = %self.name, "renaming category...");
        let category = planner.rename_category(&self.id, &self.name).await?;

        let formatter = CategoryFormatter::new(false).with_output_format(self.output_format);
        println!("{}", formatter.format(&[category]));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CmdCategoryDelete {
    pub ids: Vec<Id>,
}

impl CmdCategoryDelete {
    pub const NAME: &str = "delete";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("rm")
            .about("Delete categories that hold no content")
            .arg(IdArgs::new(Kind::Category).ids("delete"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            ids: IdArgs::get_ids(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        for id in self.ids {
            tracing::debug!(%id, "deleting category");
            let category = planner.delete_category(&id).await?;
            println!("{} {}", "Deleted".red(), category.name);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CmdCategoryList {
    pub output_format: OutputFormat,
    pub verbose: bool,
}

impl CmdCategoryList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List categories")
            .arg(CommonArgs::output_format())
            .arg(CommonArgs::verbose())
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            output_format: CommonArgs::get_output_format(matches),
            verbose: CommonArgs::get_verbose(matches),
        }
    }

    pub async fn run(self, planner: &Planner) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing categories...");
        Self::list(planner, self.output_format, self.verbose).await
    }

    pub async fn list(
        planner: &Planner,
        output_format: OutputFormat,
        verbose: bool,
    ) -> Result<(), Box<dyn Error>> {
        let categories = planner.list_categories().await?;
        if categories.is_empty() && output_format == OutputFormat::Table {
            println!("{}", "No categories yet".italic());
            return Ok(());
        }

        let formatter = CategoryFormatter::new(verbose).with_output_format(output_format);
        println!("{}", formatter.format(&categories));
        Ok(())
    }
}

fn get_name(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("name")
        .expect("name is required")
        .clone()
}
