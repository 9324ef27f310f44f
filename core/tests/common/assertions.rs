// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Custom assertion helpers for integration tests.

use plancal_core::{ContentDraft, ContentItem};

/// Asserts that a stored content item carries the fields of its draft.
///
/// # Panics
///
/// Panics if a field differs.
pub fn assert_content_matches_draft(item: &ContentItem, draft: &ContentDraft) {
    assert_eq!(item.name, draft.name, "name mismatch");
    assert_eq!(item.stage, draft.stage, "stage mismatch");
    assert_eq!(item.social, draft.social, "platform mismatch");
    assert_eq!(item.timeline_days, draft.timeline_days, "timeline mismatch");
    assert_eq!(item.scheduled_date, draft.scheduled_date, "date mismatch");
    assert_eq!(item.raw_file_urls, draft.raw_file_urls, "raw file urls mismatch");
    assert_eq!(item.inspo_urls, draft.inspo_urls, "inspo urls mismatch");
    assert_eq!(item.final_url, draft.final_url, "final url mismatch");
}

/// Asserts the names of `items`, in order.
///
/// # Panics
///
/// Panics if the names differ.
pub fn assert_names(items: &[ContentItem], expected: &[&str]) {
    let names: Vec<_> = items.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, expected);
}
