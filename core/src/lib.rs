// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of plancal: categories and content items, the month calendar with
//! preparation timelines, scheduling rules, and local or remote storage.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_debug_implementations,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro
)]

mod calendar;
mod category;
mod config;
mod content;
mod localdb;
mod planner;
mod remotedb;
mod schedule;
mod session;
mod short_id;
mod store;
mod types;

pub use crate::calendar::{
    DayCell, MonthView, TimelineMark, TimelinePhase, Week, WeekStart, YearMonth, is_past,
    items_by_date, month_weeks, timeline_for_date, timeline_phase, timeline_start,
};
pub use crate::category::{Category, normalize_category_name};
pub use crate::config::{APP_NAME, BackendConfig, Config};
pub use crate::content::{
    ContentConditions, ContentDraft, ContentItem, ContentPatch, ContentSort, ContentSortKey,
    MAX_TIMELINE_DAYS,
};
pub use crate::planner::{Planner, Snapshot};
pub use crate::schedule::{DropTarget, ScheduleError, check_day_drop};
pub use crate::session::{login, logout};
pub use crate::store::ContentStore;
pub use crate::types::{Id, Kind, Pager, Platform, SortOrder, Stage};
pub use plancal_rest::{AuthMethod, RestConfig, Session};
