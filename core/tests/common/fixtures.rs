// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use std::path::Path;

use jiff::Zoned;
use jiff::civil::{Date, date};
use plancal_core::{Config, ContentDraft, Planner, Platform, Stage};

/// The day every planner in the tests treats as today.
pub const TODAY: Date = date(2026, 10, 19);

/// The pinned current time, on [`TODAY`].
#[must_use]
pub fn test_now() -> Zoned {
    "2026-10-19T09:00:00[UTC]".parse().expect("valid zoned time")
}

/// Creates a local-backend configuration keeping state in `state_dir`.
#[must_use]
pub fn test_config(state_dir: &Path) -> Config {
    Config {
        state_dir: Some(state_dir.to_path_buf()),
        ..Default::default()
    }
}

/// Opens a planner on `config` with its clock pinned to [`TODAY`].
///
/// # Panics
///
/// Panics if the planner cannot be created.
pub async fn new_planner(config: Config) -> Planner {
    let mut planner = Planner::new(config).await.expect("planner should open");
    planner.set_now(test_now());
    planner
}

/// Creates a content draft in `category_id` with a two-day timeline.
#[must_use]
pub fn test_content_draft(category_id: &str, name: &str) -> ContentDraft {
    ContentDraft {
        category_id: category_id.to_string(),
        name: name.to_string(),
        raw_file_urls: vec![],
        inspo_urls: vec![],
        final_url: None,
        stage: Stage::Idea,
        social: Platform::Instagram,
        timeline_days: 2,
        scheduled_date: None,
    }
}
