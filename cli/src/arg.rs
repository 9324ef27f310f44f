// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use clap::{Arg, ArgAction, ArgMatches, arg, value_parser};
use plancal_core::{Id, Kind, Platform, Stage};

use crate::util::{OutputFormat, parse_timeline_days};

#[derive(Debug, Clone, Copy)]
pub struct CommonArgs;

impl CommonArgs {
    pub fn verbose() -> Arg {
        arg!(-v --verbose "Show more detailed information")
    }

    pub fn get_verbose(matches: &ArgMatches) -> bool {
        matches.get_flag("verbose")
    }

    pub fn output_format() -> Arg {
        arg!(--"output-format" <FORMAT> "Output format")
            .value_parser(value_parser!(OutputFormat))
            .default_value("table")
    }

    pub fn get_output_format(matches: &ArgMatches) -> OutputFormat {
        matches
            .get_one("output-format")
            .copied()
            .unwrap_or(OutputFormat::Table)
    }

    /// Category filter for listings.
    pub fn category_filter() -> Arg {
        arg!(--category <CATEGORY> "Only show content of this category (short id or uid)")
    }

    pub fn get_category_filter(matches: &ArgMatches) -> Option<Id> {
        matches
            .get_one::<String>("category")
            .map(|a| Id::ShortIdOrUid(a.clone()))
    }
}

/// Positional ids of categories or content items.
#[derive(Debug, Clone, Copy)]
pub struct IdArgs {
    kind: Kind,
}

impl IdArgs {
    pub const fn new(kind: Kind) -> Self {
        Self { kind }
    }

    pub fn id(self, action: &str) -> Arg {
        let help = format!("The short id or uid of the {} to {action}", self.kind.as_ref());
        arg!(id: <ID>).help(help)
    }

    pub fn get_id(matches: &ArgMatches) -> Id {
        let id = matches
            .get_one::<String>("id")
            .expect("id is required")
            .clone();

        Id::ShortIdOrUid(id)
    }

    pub fn ids(self, action: &str) -> Arg {
        let help = format!("The short ids or uids of the {} to {action}", self.kind.as_ref());
        arg!(id: <ID>).help(help).num_args(1..)
    }

    pub fn get_ids(matches: &ArgMatches) -> Vec<Id> {
        matches
            .get_many::<String>("id")
            .expect("id is required")
            .map(|a| Id::ShortIdOrUid(a.clone()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ContentArgs;

impl ContentArgs {
    pub fn name(positional: bool) -> Arg {
        if positional {
            arg!(name: <NAME> "Name of the content item")
        } else {
            arg!(name: -n --name <NAME> "Name of the content item")
        }
    }

    pub fn get_name(matches: &ArgMatches) -> Option<String> {
        matches.get_one("name").cloned()
    }

    pub fn category(required: bool) -> Arg {
        arg!(--category <CATEGORY> "Category of the content item (short id or uid)")
            .required(required)
    }

    pub fn get_category(matches: &ArgMatches) -> Option<Id> {
        CommonArgs::get_category_filter(matches)
    }

    pub fn stage() -> Arg {
        arg!(-s --stage <STAGE> "Production stage").value_parser(value_parser!(Stage))
    }

    pub fn get_stage(matches: &ArgMatches) -> Option<Stage> {
        matches.get_one("stage").copied()
    }

    pub fn social() -> Arg {
        arg!(--social <SOCIAL> "Target platform").value_parser(value_parser!(Platform))
    }

    pub fn get_social(matches: &ArgMatches) -> Option<Platform> {
        matches.get_one("social").copied()
    }

    pub fn timeline_days() -> Arg {
        arg!(-t --"timeline-days" <DAYS> "Days of preparation before the publish date")
            .value_parser(parse_timeline_days)
    }

    pub fn get_timeline_days(matches: &ArgMatches) -> Option<u32> {
        matches.get_one("timeline-days").copied()
    }

    pub fn raw_url() -> Arg {
        arg!(--"raw-url" <URL> "Link to a raw file, may be repeated").action(ArgAction::Append)
    }

    pub fn get_raw_urls(matches: &ArgMatches) -> Option<Vec<String>> {
        matches
            .get_many::<String>("raw-url")
            .map(|a| a.cloned().collect())
    }

    pub fn inspo_url() -> Arg {
        arg!(--"inspo-url" <URL> "Link to an inspiration, may be repeated")
            .action(ArgAction::Append)
    }

    pub fn get_inspo_urls(matches: &ArgMatches) -> Option<Vec<String>> {
        matches
            .get_many::<String>("inspo-url")
            .map(|a| a.cloned().collect())
    }

    pub fn final_url() -> Arg {
        arg!(--"final-url" <URL> "Link to the published post, empty to clear")
    }

    pub fn get_final_url(matches: &ArgMatches) -> Option<String> {
        matches.get_one("final-url").cloned()
    }

    pub fn date() -> Arg {
        arg!(--date <DATE> "Publish date (YYYY-MM-DD, today, tomorrow or +N)")
    }

    pub fn get_date(matches: &ArgMatches) -> Option<String> {
        matches.get_one("date").cloned()
    }
}
