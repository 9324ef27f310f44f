// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::num::NonZeroU32;

use jiff::Timestamp;

/// A user-defined grouping label for content items.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Category {
    /// The unique identifier.
    pub id: String,

    /// Short id for referring to the category from the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_id: Option<NonZeroU32>,

    /// The display name.
    pub name: String,

    /// When the category was created.
    pub created_at: Timestamp,
}

/// Trims a category name and rejects empty ones.
pub fn normalize_category_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        Err("Category name must not be empty".to_string())
    } else {
        Ok(name.to_string())
    }
}
