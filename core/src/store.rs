// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::fmt::Debug;

use async_trait::async_trait;
use jiff::Timestamp;

use crate::{
    Category, ContentConditions, ContentDraft, ContentItem, ContentPatch, ContentSort, Pager,
};

/// Persistence for categories and content items.
///
/// Every call is a single request against the backing store. Items returned
/// from content queries carry their category when the store can join it.
#[async_trait]
pub trait ContentStore: Debug + Send + Sync {
    /// Lists all categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, Box<dyn Error>>;

    async fn get_category(&self, id: &str) -> Result<Option<Category>, Box<dyn Error>>;

    async fn insert_category(&self, name: &str, now: Timestamp)
    -> Result<Category, Box<dyn Error>>;

    /// Renames a category, returning `None` if it does not exist.
    async fn rename_category(
        &self,
        id: &str,
        name: &str,
    ) -> Result<Option<Category>, Box<dyn Error>>;

    /// Deletes a category, returning whether it existed.
    async fn delete_category(&self, id: &str) -> Result<bool, Box<dyn Error>>;

    async fn get_content(&self, id: &str) -> Result<Option<ContentItem>, Box<dyn Error>>;

    /// Lists content items matching the conditions. A `None` pager returns
    /// every match.
    async fn list_contents(
        &self,
        conds: &ContentConditions,
        sort: &[ContentSort],
        pager: Option<&Pager>,
    ) -> Result<Vec<ContentItem>, Box<dyn Error>>;

    async fn count_contents(&self, conds: &ContentConditions) -> Result<i64, Box<dyn Error>>;

    async fn insert_content(
        &self,
        draft: &ContentDraft,
        now: Timestamp,
    ) -> Result<ContentItem, Box<dyn Error>>;

    /// Applies a patch and stamps `updated_at`, returning `None` if the item
    /// does not exist.
    async fn update_content(
        &self,
        id: &str,
        patch: &ContentPatch,
        now: Timestamp,
    ) -> Result<Option<ContentItem>, Box<dyn Error>>;

    /// Deletes a content item, returning whether it existed.
    async fn delete_content(&self, id: &str) -> Result<bool, Box<dyn Error>>;
}
