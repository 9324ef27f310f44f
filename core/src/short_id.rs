// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::num::NonZeroU32;

use crate::localdb::{LocalDb, UidAndShortId};
use crate::{Category, ContentItem, Id, Kind};

/// Hands out short ids for records and resolves them back to uids.
#[derive(Debug, Clone)]
pub struct ShortIds {
    db: LocalDb,
}

impl ShortIds {
    pub fn new(db: LocalDb) -> Self {
        Self { db }
    }

    /// Looks up the record behind a numeric id, if the id is a known short id.
    pub async fn get(&self, id: &Id) -> Result<Option<UidAndShortId>, Box<dyn Error>> {
        let Id::ShortIdOrUid(raw) = id else {
            return Ok(None);
        };
        let Ok(short_id) = raw.parse::<NonZeroU32>() else {
            return Ok(None);
        };
        Ok(self.db.short_ids.get_by_short_id(short_id).await?)
    }

    /// Resolves an id to a uid. Unknown numbers fall through as uids.
    pub async fn get_uid(&self, id: &Id, kind: Kind) -> Result<String, Box<dyn Error>> {
        match self.get(id).await? {
            Some(data) if data.kind == kind => Ok(data.uid),
            Some(data) => Err(format!(
                "Id {id} refers to a {}, not a {}",
                data.kind.as_ref(),
                kind.as_ref()
            )
            .into()),
            None => Ok(id.as_uid().to_string()),
        }
    }

    pub async fn category(&self, mut category: Category) -> Result<Category, Box<dyn Error>> {
        let short_id = self
            .db
            .short_ids
            .get_or_assign_short_id(&category.id, Kind::Category)
            .await?;
        category.short_id = Some(short_id);
        Ok(category)
    }

    pub async fn categories(
        &self,
        categories: Vec<Category>,
    ) -> Result<Vec<Category>, Box<dyn Error>> {
        let mut with_id = Vec::with_capacity(categories.len());
        for category in categories {
            with_id.push(self.category(category).await?);
        }
        Ok(with_id)
    }

    /// Tags a content item, and its embedded category, with short ids.
    pub async fn content(&self, mut item: ContentItem) -> Result<ContentItem, Box<dyn Error>> {
        let short_id = self
            .db
            .short_ids
            .get_or_assign_short_id(&item.id, Kind::Content)
            .await?;
        item.short_id = Some(short_id);

        if let Some(category) = item.category.take() {
            item.category = Some(self.category(category).await?);
        }
        Ok(item)
    }

    pub async fn contents(
        &self,
        items: Vec<ContentItem>,
    ) -> Result<Vec<ContentItem>, Box<dyn Error>> {
        let mut with_id = Vec::with_capacity(items.len());
        for item in items {
            with_id.push(self.content(item).await?);
        }
        Ok(with_id)
    }

    pub async fn remove(&self, uid: &str) -> Result<(), Box<dyn Error>> {
        Ok(self.db.short_ids.remove(uid).await?)
    }

    /// Forgets every short id so numbering restarts from 1.
    pub async fn flush(&self) -> Result<u64, Box<dyn Error>> {
        let count = self.db.short_ids.flush().await?;
        tracing::debug!(count, "flushed short ids");
        Ok(count)
    }
}
