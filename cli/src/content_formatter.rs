// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{borrow::Cow, fmt};

use colored::{Color, Colorize};
use jiff::civil::Date;
use plancal_core::{ContentItem, Stage, is_past, timeline_start};

use crate::table::{PaddingDirection, Table, TableColumn, TableStyleBasic, TableStyleJson};
use crate::util::OutputFormat;

#[derive(Debug)]
pub struct ContentFormatter {
    columns: Vec<ContentColumn>,
    format: OutputFormat,
}

impl ContentFormatter {
    pub fn new(today: Date) -> Self {
        Self {
            columns: vec![
                ContentColumn::ShortId,
                ContentColumn::Scheduled { today },
                ContentColumn::Stage,
                ContentColumn::Social,
                ContentColumn::Category,
                ContentColumn::Name,
            ],
            format: OutputFormat::Table,
        }
    }

    pub fn with_columns(mut self, columns: Vec<ContentColumn>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, items: &'a [ContentItem]) -> Display<'a> {
        Display {
            items,
            formatter: self,
        }
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    items: &'a [ContentItem],
    formatter: &'a ContentFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns = &self.formatter.columns;
        match self.formatter.format {
            OutputFormat::Json => write!(
                f,
                "{}",
                Table::new(TableStyleJson::new(), columns, self.items)
            ),
            OutputFormat::Table => write!(
                f,
                "{}",
                Table::new(TableStyleBasic::new(), columns, self.items)
            ),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ContentColumn {
    ShortId,
    Uid,
    Name,
    Category,
    Stage,
    Social,
    TimelineDays,
    /// Publish date, red when it passed before the item got posted.
    Scheduled {
        today: Date,
    },
}

impl TableColumn<ContentItem> for ContentColumn {
    fn name(&self) -> Cow<'_, str> {
        match self {
            ContentColumn::ShortId => "id",
            ContentColumn::Uid => "uid",
            ContentColumn::Name => "name",
            ContentColumn::Category => "category",
            ContentColumn::Stage => "stage",
            ContentColumn::Social => "social",
            ContentColumn::TimelineDays => "timeline_days",
            ContentColumn::Scheduled { .. } => "scheduled_date",
        }
        .into()
    }

    fn format<'a>(&self, data: &'a ContentItem) -> Cow<'a, str> {
        match self {
            ContentColumn::ShortId => match data.short_id {
                Some(short_id) => short_id.to_string().into(),
                None => data.id.as_str().into(),
            },
            ContentColumn::Uid => data.id.as_str().into(),
            ContentColumn::Name => data.name.as_str().into(),
            ContentColumn::Category => data
                .category
                .as_ref()
                .map_or(Cow::Borrowed(""), |a| a.name.as_str().into()),
            ContentColumn::Stage => data.stage.as_ref().into(),
            ContentColumn::Social => data.social.as_ref().into(),
            ContentColumn::TimelineDays => data.timeline_days.to_string().into(),
            ContentColumn::Scheduled { .. } => match data.scheduled_date {
                Some(date) => date.to_string().into(),
                None => "backlog".into(),
            },
        }
    }

    fn padding_direction(&self) -> PaddingDirection {
        match self {
            ContentColumn::ShortId | ContentColumn::TimelineDays => PaddingDirection::Right,
            _ => PaddingDirection::Left,
        }
    }

    fn get_color(&self, data: &ContentItem) -> Option<Color> {
        match self {
            ContentColumn::Stage => Some(stage_color(data.stage)),
            ContentColumn::Scheduled { today } => match data.scheduled_date {
                Some(date) if is_past(date, *today) && data.stage != Stage::Posted => {
                    Some(Color::Red)
                }
                Some(_) => None,
                None => Some(Color::BrightBlack),
            },
            _ => None,
        }
    }
}

pub fn stage_color(stage: Stage) -> Color {
    match stage {
        Stage::Idea => Color::BrightBlack,
        Stage::Script => Color::Blue,
        Stage::Shooting => Color::Magenta,
        Stage::Editing => Color::Yellow,
        Stage::Scheduled => Color::Cyan,
        Stage::Posted => Color::Green,
    }
}

/// Every field of one content item, one per line.
#[derive(Debug)]
pub struct ContentDetail<'a> {
    pub item: &'a ContentItem,
}

impl fmt::Display for ContentDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let item = self.item;
        let short_id = item
            .short_id
            .map_or_else(|| item.id.clone(), |a| a.to_string());

        writeln!(f, "{} {}", format!("#{short_id}").bold(), item.name.bold())?;
        writeln!(f, "{:<10}{}", "uid", item.id)?;
        if let Some(category) = &item.category {
            writeln!(f, "{:<10}{}", "category", category.name)?;
        }
        writeln!(
            f,
            "{:<10}{}",
            "stage",
            item.stage.as_ref().color(stage_color(item.stage))
        )?;
        writeln!(f, "{:<10}{}", "social", item.social)?;
        match item.scheduled_date {
            Some(date) => {
                let starts = timeline_start(date, item.timeline_days);
                writeln!(f, "{:<10}{date}", "publish")?;
                writeln!(
                    f,
                    "{:<10}{} day(s), from {starts}",
                    "timeline", item.timeline_days
                )?;
            }
            None => {
                writeln!(f, "{:<10}{}", "publish", "backlog".italic())?;
                writeln!(f, "{:<10}{} day(s)", "timeline", item.timeline_days)?;
            }
        }
        write_urls(f, "raw files", &item.raw_file_urls)?;
        write_urls(f, "inspo", &item.inspo_urls)?;
        if let Some(url) = &item.final_url {
            writeln!(f, "{:<10}{url}", "final")?;
        }
        write!(
            f,
            "{:<10}{}",
            "updated",
            item.updated_at.strftime("%Y-%m-%d %H:%M")
        )
    }
}

fn write_urls(f: &mut fmt::Formatter<'_>, label: &str, urls: &[String]) -> fmt::Result {
    for (i, url) in urls.iter().enumerate() {
        let label = if i == 0 { label } else { "" };
        writeln!(f, "{label:<10}{url}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use jiff::civil::date;
    use plancal_core::{Category, Platform};

    use super::*;

    fn item(name: &str, scheduled_date: Option<Date>, stage: Stage) -> ContentItem {
        let now = "2026-10-01T08:00:00Z".parse().unwrap();
        ContentItem {
            id: format!("uid-{name}"),
            short_id: NonZeroU32::new(7),
            category_id: "cat".to_string(),
            name: name.to_string(),
            raw_file_urls: vec![],
            inspo_urls: vec!["https://example.com/a".to_string()],
            final_url: None,
            stage,
            social: Platform::YouTube,
            timeline_days: 3,
            scheduled_date,
            created_at: now,
            updated_at: now,
            category: Some(Category {
                id: "cat".to_string(),
                short_id: None,
                name: "Cooking".to_string(),
                created_at: now,
            }),
        }
    }

    #[test]
    fn formats_rows() {
        colored::control::set_override(false);
        let today = date(2026, 10, 19);
        let items = [
            item("Pasta", Some(date(2026, 10, 25)), Stage::Script),
            item("Ramen", None, Stage::Idea),
        ];

        let out = ContentFormatter::new(today).format(&items).to_string();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "7 2026-10-25 Script YT Cooking Pasta");
        assert_eq!(lines[1], "7 backlog    Idea   YT Cooking Ramen");
    }

    #[test]
    fn json_uses_column_names() {
        let today = date(2026, 10, 19);
        let items = [item("Pasta", None, Stage::Idea)];

        let out = ContentFormatter::new(today)
            .with_output_format(OutputFormat::Json)
            .format(&items)
            .to_string();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["name"], "Pasta");
        assert_eq!(value[0]["scheduled_date"], "backlog");
        assert_eq!(value[0]["social"], "YT");
    }

    #[test]
    fn detail_shows_timeline_start() {
        colored::control::set_override(false);
        let item = item("Pasta", Some(date(2026, 10, 25)), Stage::Editing);

        let out = ContentDetail { item: &item }.to_string();
        assert!(out.starts_with("#7 Pasta"));
        assert!(out.contains("3 day(s), from 2026-10-22"));
        assert!(out.contains("https://example.com/a"));
    }
}
