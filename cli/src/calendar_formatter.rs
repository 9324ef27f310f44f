// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use colored::{Color, ColoredString, Colorize};
use jiff::civil::Weekday;
use plancal_core::{DayCell, MonthView, TimelinePhase};

use crate::content_formatter::stage_color;
use crate::util::{OutputFormat, pad, truncate};

const SEPARATOR: &str = " ";

/// Renders a month grid, one column per weekday.
#[derive(Debug)]
pub struct CalendarFormatter {
    cell_width: usize,
    max_lines: usize,
    format: OutputFormat,
}

impl CalendarFormatter {
    pub fn new() -> Self {
        Self {
            cell_width: 14,
            max_lines: 4,
            format: OutputFormat::Table,
        }
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn format<'a>(&'a self, view: &'a MonthView) -> Display<'a> {
        Display {
            view,
            formatter: self,
        }
    }

    fn day_label(&self, day: &DayCell) -> ColoredString {
        let label = if day.is_today {
            format!("{:>2} today", day.date.day())
        } else {
            format!("{:>2}", day.date.day())
        };
        let label = pad(&label, self.cell_width);

        if day.is_today {
            label.bold().reversed()
        } else if day.is_past {
            label.dimmed()
        } else {
            label.bold()
        }
    }

    /// Lines shown under the day number: scheduled items, then preparation marks.
    fn entries(&self, day: &DayCell) -> Vec<ColoredString> {
        let mut entries: Vec<(String, Color)> = day
            .items
            .iter()
            .map(|item| {
                let text = match item.short_id {
                    Some(short_id) => format!("#{short_id} {}", item.name),
                    None => item.name.clone(),
                };
                (text, stage_color(item.stage))
            })
            .collect();

        entries.extend(
            day.timelines
                .iter()
                .filter(|mark| mark.phase == TimelinePhase::Preparation)
                .map(|mark| (format!("· {}", mark.item.name), Color::BrightBlack)),
        );

        if entries.len() > self.max_lines {
            let hidden = entries.len() - (self.max_lines - 1);
            entries.truncate(self.max_lines - 1);
            entries.push((format!("+{hidden} more"), Color::White));
        }

        entries
            .into_iter()
            .map(|(text, color)| {
                let text = pad(&truncate(&text, self.cell_width), self.cell_width);
                if day.is_past {
                    text.dimmed()
                } else {
                    text.color(color)
                }
            })
            .collect()
    }

    fn write_grid(&self, f: &mut fmt::Formatter<'_>, view: &MonthView) -> fmt::Result {
        write!(f, "{}", view.month.title().bold())?;

        let header: Vec<String> = view
            .week_start
            .weekdays()
            .into_iter()
            .map(|a| pad(weekday_name(a), self.cell_width))
            .collect();
        write!(f, "\n{}", header.join(SEPARATOR).trim_end().underline())?;

        let blank = " ".repeat(self.cell_width);
        for week in &view.weeks {
            let labels: Vec<String> = week
                .iter()
                .map(|cell| match cell {
                    Some(day) => self.day_label(day).to_string(),
                    None => blank.clone(),
                })
                .collect();
            write!(f, "\n{}", labels.join(SEPARATOR).trim_end())?;

            let entries: Vec<Vec<ColoredString>> = week
                .iter()
                .map(|cell| cell.as_ref().map(|day| self.entries(day)).unwrap_or_default())
                .collect();
            let lines = entries.iter().map(Vec::len).max().unwrap_or(0);
            for line in 0..lines {
                let cells: Vec<String> = entries
                    .iter()
                    .map(|a| a.get(line).map_or_else(|| blank.clone(), ToString::to_string))
                    .collect();
                write!(f, "\n{}", cells.join(SEPARATOR).trim_end())?;
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct Display<'a> {
    view: &'a MonthView,
    formatter: &'a CalendarFormatter,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.formatter.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self.view).map_err(|_| fmt::Error)?;
                write!(f, "{json}")
            }
            OutputFormat::Table => self.formatter.write_grid(f, self.view),
        }
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}
