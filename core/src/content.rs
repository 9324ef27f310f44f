// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::num::NonZeroU32;

use jiff::Timestamp;
use jiff::civil::Date;

use crate::{Category, Config, Platform, SortOrder, Stage};

/// Upper bound for the preparation window of a content item.
pub const MAX_TIMELINE_DAYS: u32 = 3650;

/// A unit of content moving through the production pipeline.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ContentItem {
    /// The unique identifier.
    pub id: String,

    /// Short id for referring to the item from the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_id: Option<NonZeroU32>,

    /// The category this item belongs to.
    pub category_id: String,

    /// The display name.
    pub name: String,

    /// Links to raw footage or source files.
    #[serde(default)]
    pub raw_file_urls: Vec<String>,

    /// Links to inspiration.
    #[serde(default)]
    pub inspo_urls: Vec<String>,

    /// Link to the published piece.
    #[serde(default)]
    pub final_url: Option<String>,

    /// Production stage.
    #[serde(default)]
    pub stage: Stage,

    /// Target platform.
    #[serde(default)]
    pub social: Platform,

    /// Number of days of preparation before the scheduled date.
    #[serde(default = "default_timeline_days")]
    pub timeline_days: u32,

    /// Publish date, `None` while the item sits in the backlog.
    #[serde(default)]
    pub scheduled_date: Option<Date>,

    /// When the item was created.
    pub created_at: Timestamp,

    /// When the item was last changed.
    pub updated_at: Timestamp,

    /// The joined category row, when the store provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl ContentItem {
    /// Whether the item has a publish date.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.scheduled_date.is_some()
    }
}

fn default_timeline_days() -> u32 {
    1
}

/// A new content item to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDraft {
    /// The category, as a uid or short id.
    pub category_id: String,

    /// The display name.
    pub name: String,

    /// Links to raw footage or source files.
    pub raw_file_urls: Vec<String>,

    /// Links to inspiration.
    pub inspo_urls: Vec<String>,

    /// Link to the published piece.
    pub final_url: Option<String>,

    /// Production stage.
    pub stage: Stage,

    /// Target platform.
    pub social: Platform,

    /// Number of days of preparation before the scheduled date.
    pub timeline_days: u32,

    /// Publish date.
    pub scheduled_date: Option<Date>,
}

impl ContentDraft {
    /// Creates an empty draft with the configured defaults.
    #[must_use]
    pub fn default(config: &Config) -> Self {
        Self {
            category_id: String::new(),
            name: String::new(),
            raw_file_urls: Vec::new(),
            inspo_urls: Vec::new(),
            final_url: None,
            stage: Stage::default(),
            social: config.default_platform,
            timeline_days: config.default_timeline_days,
            scheduled_date: None,
        }
    }

    /// Validates the draft and cleans up its free-text fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or category is missing, or the timeline is out of range.
    pub fn normalize(self) -> Result<Self, String> {
        let category_id = self.category_id.trim().to_string();
        if category_id.is_empty() {
            return Err("A category is required".to_string());
        }

        Ok(Self {
            category_id,
            name: normalize_name(&self.name)?,
            raw_file_urls: normalize_urls(self.raw_file_urls),
            inspo_urls: normalize_urls(self.inspo_urls),
            final_url: normalize_final_url(self.final_url),
            timeline_days: check_timeline_days(self.timeline_days)?,
            ..self
        })
    }
}

/// Partial update of a content item.
///
/// Unset fields are left untouched. For nullable fields, `Some(None)` clears the value.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ContentPatch {
    /// Move the item to another category, as a uid or short id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,

    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Replacement list of raw file links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_file_urls: Option<Vec<String>>,

    /// Replacement list of inspiration links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inspo_urls: Option<Vec<String>>,

    /// New final link, or `Some(None)` to clear it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_url: Option<Option<String>>,

    /// New stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,

    /// New platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social: Option<Platform>,

    /// New preparation window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline_days: Option<u32>,

    /// New publish date, or `Some(None)` to move the item to the backlog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<Option<Date>>,
}

impl ContentPatch {
    /// Is this patch empty, meaning no fields are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.name.is_none()
            && self.raw_file_urls.is_none()
            && self.inspo_urls.is_none()
            && self.final_url.is_none()
            && self.stage.is_none()
            && self.social.is_none()
            && self.timeline_days.is_none()
            && self.scheduled_date.is_none()
    }

    /// Validates the set fields with the same rules as [`ContentDraft::normalize`].
    ///
    /// # Errors
    ///
    /// Returns an error if a set field is invalid.
    pub fn normalize(self) -> Result<Self, String> {
        let category_id = match self.category_id {
            Some(id) if id.trim().is_empty() => return Err("A category is required".to_string()),
            Some(id) => Some(id.trim().to_string()),
            None => None,
        };

        Ok(Self {
            category_id,
            name: self.name.as_deref().map(normalize_name).transpose()?,
            raw_file_urls: self.raw_file_urls.map(normalize_urls),
            inspo_urls: self.inspo_urls.map(normalize_urls),
            final_url: self.final_url.map(normalize_final_url),
            timeline_days: self.timeline_days.map(check_timeline_days).transpose()?,
            ..self
        })
    }

    /// Applies the patch to an item, modifying it in place.
    pub fn apply_to<'a>(&self, item: &'a mut ContentItem) -> &'a mut ContentItem {
        if let Some(category_id) = &self.category_id {
            if *category_id != item.category_id {
                item.category = None;
            }
            item.category_id.clone_from(category_id);
        }
        if let Some(name) = &self.name {
            item.name.clone_from(name);
        }
        if let Some(urls) = &self.raw_file_urls {
            item.raw_file_urls.clone_from(urls);
        }
        if let Some(urls) = &self.inspo_urls {
            item.inspo_urls.clone_from(urls);
        }
        if let Some(final_url) = &self.final_url {
            item.final_url.clone_from(final_url);
        }
        if let Some(stage) = self.stage {
            item.stage = stage;
        }
        if let Some(social) = self.social {
            item.social = social;
        }
        if let Some(days) = self.timeline_days {
            item.timeline_days = days;
        }
        if let Some(date) = self.scheduled_date {
            item.scheduled_date = date;
        }
        item
    }
}

/// Conditions for filtering content items.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContentConditions {
    /// Only items in this category, as a uid or short id.
    pub category_id: Option<String>,

    /// `Some(true)` for scheduled items, `Some(false)` for the backlog.
    pub scheduled: Option<bool>,

    /// Only items in this stage.
    pub stage: Option<Stage>,

    /// Only items for this platform.
    pub social: Option<Platform>,

    /// Only items scheduled on or after this date.
    pub scheduled_from: Option<Date>,

    /// Only items scheduled on or before this date.
    pub scheduled_until: Option<Date>,
}

impl ContentConditions {
    /// Items of the backlog, optionally of one category.
    #[must_use]
    pub fn backlog(category_id: Option<String>) -> Self {
        Self {
            category_id,
            scheduled: Some(false),
            ..Default::default()
        }
    }

    /// Items scheduled between two dates, both inclusive.
    #[must_use]
    pub fn scheduled_between(from: Date, until: Date, category_id: Option<String>) -> Self {
        Self {
            category_id,
            scheduled: Some(true),
            scheduled_from: Some(from),
            scheduled_until: Some(until),
            ..Default::default()
        }
    }

    /// Whether an item satisfies these conditions.
    #[must_use]
    pub fn matches(&self, item: &ContentItem) -> bool {
        self.category_id
            .as_ref()
            .is_none_or(|id| *id == item.category_id)
            && self
                .scheduled
                .is_none_or(|scheduled| scheduled == item.is_scheduled())
            && self.stage.is_none_or(|stage| stage == item.stage)
            && self.social.is_none_or(|social| social == item.social)
            && self
                .scheduled_from
                .is_none_or(|from| item.scheduled_date.is_some_and(|d| d >= from))
            && self
                .scheduled_until
                .is_none_or(|until| item.scheduled_date.is_some_and(|d| d <= until))
    }
}

/// The key by which content items can be sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSortKey {
    /// By publish date, unscheduled items last when ascending.
    ScheduledDate,

    /// By name.
    Name,

    /// By creation time.
    CreatedAt,
}

impl ContentSortKey {
    pub(crate) fn column(self) -> &'static str {
        match self {
            ContentSortKey::ScheduledDate => "scheduled_date",
            ContentSortKey::Name => "name",
            ContentSortKey::CreatedAt => "created_at",
        }
    }
}

/// A sort key together with its order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSort {
    /// The key by which to sort the items.
    pub key: ContentSortKey,

    /// The order in which to sort the items.
    pub order: SortOrder,
}

impl From<(ContentSortKey, SortOrder)> for ContentSort {
    fn from((key, order): (ContentSortKey, SortOrder)) -> Self {
        Self { key, order }
    }
}

fn normalize_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        Err("Content name must not be empty".to_string())
    } else {
        Ok(name.to_string())
    }
}

fn normalize_urls(urls: Vec<String>) -> Vec<String> {
    urls.into_iter()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect()
}

fn normalize_final_url(url: Option<String>) -> Option<String> {
    url.map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

fn check_timeline_days(days: u32) -> Result<u32, String> {
    if (1..=MAX_TIMELINE_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(format!(
            "Timeline days must be between 1 and {MAX_TIMELINE_DAYS}, got {days}"
        ))
    }
}
