// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Month grid and timeline arithmetic.
//!
//! A month is laid out as full weeks of seven cells. Cells before the first and
//! after the last day of the month are `None`. Each scheduled item owns a
//! preparation window of `timeline_days` days ending the day before its
//! scheduled date; the scheduled date itself carries the publish mark.

use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use jiff::civil::{Date, Weekday};
use jiff::{Span, ToSpan};

use crate::ContentItem;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i16,
    month: i8,
}

impl YearMonth {
    /// Creates a month, checking that it is representable.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is not within 1..=12 or the year is out of range.
    pub fn new(year: i16, month: i8) -> Result<Self, String> {
        Date::new(year, month, 1)
            .map(|_| Self { year, month })
            .map_err(|e| format!("Invalid month {year:04}-{month:02}: {e}"))
    }

    /// The year.
    #[must_use]
    pub fn year(self) -> i16 {
        self.year
    }

    /// The month, 1 to 12.
    #[must_use]
    pub fn month(self) -> i8 {
        self.month
    }

    /// The first day of the month.
    #[must_use]
    pub fn first_day(self) -> Date {
        jiff::civil::date(self.year, self.month, 1)
    }

    /// The last day of the month.
    #[must_use]
    pub fn last_day(self) -> Date {
        self.first_day().last_of_month()
    }

    /// Number of days in the month.
    #[must_use]
    pub fn days_in_month(self) -> i8 {
        self.first_day().days_in_month()
    }

    /// The month before, saturating at the earliest supported month.
    #[must_use]
    pub fn prev(self) -> Self {
        match self.month {
            1 => Self::new(self.year - 1, 12).unwrap_or(self),
            m => Self {
                month: m - 1,
                ..self
            },
        }
    }

    /// The month after, saturating at the latest supported month.
    #[must_use]
    pub fn next(self) -> Self {
        match self.month {
            12 => Self::new(self.year + 1, 1).unwrap_or(self),
            m => Self {
                month: m + 1,
                ..self
            },
        }
    }

    /// Whether the date falls in this month.
    #[must_use]
    pub fn contains(self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Long title such as `October 2026`.
    #[must_use]
    pub fn title(self) -> String {
        let name = MONTH_NAMES[usize::try_from(self.month - 1).unwrap_or_default()];
        format!("{name} {}", self.year)
    }
}

impl From<Date> for YearMonth {
    fn from(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = String;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid month, expected YYYY-MM: {s}"))?;
        let year: i16 = year
            .parse()
            .map_err(|e| format!("Invalid year in {s}: {e}"))?;
        let month: i8 = month
            .parse()
            .map_err(|e| format!("Invalid month in {s}: {e}"))?;
        Self::new(year, month)
    }
}

/// The weekday the grid starts with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum WeekStart {
    /// Weeks run Sunday to Saturday.
    #[default]
    Sunday,

    /// Weeks run Monday to Sunday.
    Monday,
}

impl WeekStart {
    /// The seven weekdays in grid order.
    #[must_use]
    pub fn weekdays(self) -> [Weekday; 7] {
        let first = match self {
            WeekStart::Sunday => Weekday::Sunday,
            WeekStart::Monday => Weekday::Monday,
        };
        std::array::from_fn(|i| first.wrapping_add(i as i64))
    }

    /// Number of padding cells before a day with the given weekday.
    fn offset(self, weekday: Weekday) -> usize {
        let offset = match self {
            WeekStart::Sunday => weekday.to_sunday_zero_offset(),
            WeekStart::Monday => weekday.to_monday_zero_offset(),
        };
        usize::try_from(offset).unwrap_or_default()
    }
}

/// A week of the grid; `None` cells lie outside the month.
pub type Week = [Option<Date>; 7];

/// Lays out a month as full weeks.
#[must_use]
pub fn month_weeks(month: YearMonth, week_start: WeekStart) -> Vec<Week> {
    let first = month.first_day();
    let days = usize::try_from(month.days_in_month()).unwrap_or_default();

    let mut cells: Vec<Option<Date>> = vec![None; week_start.offset(first.weekday())];
    cells.extend(first.series(1.day()).take(days).map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    cells
        .chunks_exact(7)
        .map(|week| std::array::from_fn(|i| week[i]))
        .collect()
}

/// Groups scheduled items by date, keeping input order within a date.
#[must_use]
pub fn items_by_date(items: &[ContentItem]) -> BTreeMap<Date, Vec<&ContentItem>> {
    let mut map: BTreeMap<Date, Vec<&ContentItem>> = BTreeMap::new();
    for item in items {
        if let Some(date) = item.scheduled_date {
            map.entry(date).or_default().push(item);
        }
    }
    map
}

/// First day of the preparation window ending at `scheduled`.
#[must_use]
pub fn timeline_start(scheduled: Date, timeline_days: u32) -> Date {
    Span::new()
        .try_days(i64::from(timeline_days))
        .ok()
        .and_then(|span| scheduled.checked_sub(span).ok())
        .unwrap_or(Date::MIN)
}

/// Phase of an item's timeline on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelinePhase {
    /// A day of preparation before the scheduled date.
    Preparation,

    /// The scheduled date itself.
    Publish,
}

/// An item whose timeline covers a given day.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TimelineMark {
    /// The item.
    pub item: ContentItem,

    /// Which part of the timeline the day is in.
    pub phase: TimelinePhase,
}

/// Returns the phase of an item's timeline on `date`, if the timeline covers it.
#[must_use]
pub fn timeline_phase(item: &ContentItem, date: Date) -> Option<TimelinePhase> {
    let scheduled = item.scheduled_date?;
    if timeline_start(scheduled, item.timeline_days) <= date && date < scheduled {
        Some(TimelinePhase::Preparation)
    } else if date == scheduled {
        Some(TimelinePhase::Publish)
    } else {
        None
    }
}

/// Collects the timeline marks of all scheduled items on `date`.
#[must_use]
pub fn timeline_for_date(items: &[ContentItem], date: Date) -> Vec<TimelineMark> {
    items
        .iter()
        .filter_map(|item| {
            timeline_phase(item, date).map(|phase| TimelineMark {
                item: item.clone(),
                phase,
            })
        })
        .collect()
}

/// Whether `date` lies strictly before `today`.
#[must_use]
pub fn is_past(date: Date, today: Date) -> bool {
    date < today
}

/// A day of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DayCell {
    /// The date.
    pub date: Date,

    /// Whether this is today.
    pub is_today: bool,

    /// Whether this day is before today.
    pub is_past: bool,

    /// Items scheduled on this day.
    pub items: Vec<ContentItem>,

    /// Timelines covering this day.
    pub timelines: Vec<TimelineMark>,
}

/// A month grid with items and timelines filled in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MonthView {
    /// The month shown, as `YYYY-MM`.
    #[serde(serialize_with = "serialize_display")]
    pub month: YearMonth,

    /// The weekday columns.
    #[serde(skip)]
    pub week_start: WeekStart,

    /// Today's date.
    pub today: Date,

    /// Full weeks; `None` cells lie outside the month.
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

impl MonthView {
    /// Builds the grid of `month` from `items`.
    ///
    /// Items may include dates outside the month; they still contribute
    /// timelines that reach into it.
    #[must_use]
    pub fn build(
        month: YearMonth,
        week_start: WeekStart,
        today: Date,
        items: &[ContentItem],
    ) -> Self {
        let by_date = items_by_date(items);
        let weeks = month_weeks(month, week_start)
            .into_iter()
            .map(|week| {
                week.map(|date| {
                    date.map(|date| DayCell {
                        date,
                        is_today: date == today,
                        is_past: is_past(date, today),
                        items: by_date
                            .get(&date)
                            .map(|a| a.iter().map(|&item| item.clone()).collect())
                            .unwrap_or_default(),
                        timelines: timeline_for_date(items, date),
                    })
                })
            })
            .collect();

        Self {
            month,
            week_start,
            today,
            weeks,
        }
    }

    /// All day cells in order.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten().flatten()
    }
}

fn serialize_display<S: serde::Serializer>(
    value: &impl Display,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
