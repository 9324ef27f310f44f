// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::civil::Date;

use crate::calendar::{is_past, timeline_start};

/// Where an item is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A calendar day; the item gets scheduled on it.
    Day(Date),

    /// The backlog; the item loses its schedule date.
    Backlog,
}

/// A refused drop onto a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    /// The day is before today.
    #[error("cannot schedule on a past day ({date})")]
    PastDate {
        /// The day the item was dropped on.
        date: Date,
    },

    /// The preparation window would have to start before today.
    #[error(
        "this content would need work to start before today: {timeline_days} day(s) before {date} is {starts}"
    )]
    TimelineStartsInPast {
        /// The day the item was dropped on.
        date: Date,

        /// The preparation window of the item.
        timeline_days: u32,

        /// The first day of the preparation window.
        starts: Date,
    },
}

/// Checks whether an item with `timeline_days` of preparation may be scheduled on `date`.
///
/// # Errors
///
/// Returns [`ScheduleError::PastDate`] for days before today, and
/// [`ScheduleError::TimelineStartsInPast`] when the preparation window would
/// start before today.
pub fn check_day_drop(date: Date, timeline_days: u32, today: Date) -> Result<(), ScheduleError> {
    if is_past(date, today) {
        return Err(ScheduleError::PastDate { date });
    }

    let starts = timeline_start(date, timeline_days);
    if starts < today {
        return Err(ScheduleError::TimelineStartsInPast {
            date,
            timeline_days,
            starts,
        });
    }

    Ok(())
}
