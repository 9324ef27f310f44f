// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Date;
use jiff::{Span, ToSpan};
use plancal_core::YearMonth;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// The output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Parses a day given as `YYYY-MM-DD`, `today`, `tomorrow` or `+N` days from today.
pub fn parse_date(s: &str, today: Date) -> Result<Date, String> {
    let s = s.trim();
    match s.to_lowercase().as_str() {
        "today" => return Ok(today),
        "tomorrow" => return today.checked_add(1.day()).map_err(|e| e.to_string()),
        _ => {}
    }

    if let Some(days) = s.strip_prefix('+') {
        let days: i64 = days
            .parse()
            .map_err(|_| format!("Invalid day offset: {s}"))?;
        return Span::new()
            .try_days(days)
            .and_then(|span| today.checked_add(span))
            .map_err(|e| format!("Invalid day offset {s}: {e}"));
    }

    s.parse::<Date>()
        .map_err(|_| format!("Invalid date: {s}. Expected YYYY-MM-DD, today, tomorrow or +N"))
}

/// Parses a month given as `YYYY-MM`, `this`, `next` or `prev`.
pub fn parse_month(s: &str, today: Date) -> Result<YearMonth, String> {
    let current = YearMonth::from(today);
    match s.trim().to_lowercase().as_str() {
        "this" | "current" => Ok(current),
        "next" => Ok(current.next()),
        "prev" | "last" => Ok(current.prev()),
        _ => s.parse(),
    }
}

/// Parses a positive number of preparation days.
pub fn parse_timeline_days(s: &str) -> Result<u32, String> {
    match s.trim().parse::<u32>() {
        Ok(0) => Err("Timeline must be at least 1 day".to_string()),
        Ok(days) => Ok(days),
        Err(_) => Err(format!("Invalid number of days: {s}")),
    }
}

/// Cuts a string to at most `width` columns, marking the cut with an ellipsis.
pub fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for g in s.graphemes(true) {
        let w = g.width();
        if used + w + 1 > width {
            break;
        }
        out.push_str(g);
        used += w;
    }
    out.push('…');
    out
}

/// Pads a string with spaces to `width` columns.
pub fn pad(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - w))
    }
}
