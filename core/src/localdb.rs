// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

mod categories;
mod contents;
mod short_ids;


use std::error::Error;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::localdb::categories::Categories;
use crate::localdb::contents::Contents;
use crate::store::ContentStore;
use crate::{
    Category, ContentConditions, ContentDraft, ContentItem, ContentPatch, ContentSort, Pager,
};

pub(crate) use crate::localdb::short_ids::{ShortIds, UidAndShortId};

/// Distinguishes in-memory databases opened by the same process.
pub(crate) static IN_MEMORY_DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Clone)]
pub struct LocalDb {
    pool: SqlitePool,

    pub categories: Categories,
    pub contents: Contents,
    pub short_ids: ShortIds,
}

impl LocalDb {
    /// Opens a sqlite database connection.
    /// If `filename` is `None`, it opens an in-memory database.
    pub async fn open(filename: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let (options, pool_options) = if let Some(filename) = filename {
            tracing::info!(path = %filename.display(), "connecting to SQLite database");
            let options = SqliteConnectOptions::new()
                .filename(filename)
                .create_if_missing(true);
            (options, SqlitePoolOptions::new())
        } else {
            tracing::info!("connecting to in-memory SQLite database");
            let db_id = IN_MEMORY_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
            let options = SqliteConnectOptions::new()
                .filename(format!("file:plancal_{db_id}:?mode=memory&cache=shared"))
                .in_memory(true);
            // the database lives as long as its only connection
            let pool_options = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
            (options, pool_options)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| format!("Failed to connect to SQLite database: {e}"))?;

        sqlx::migrate!("src/localdb/migrations") // relative path from the crate root
            .run(&pool)
            .await
            .map_err(|e| format!("Failed to run migrations: {e}"))?;

        Ok(LocalDb {
            categories: Categories::new(pool.clone()),
            contents: Contents::new(pool.clone()),
            short_ids: ShortIds::new(pool.clone()),
            pool,
        })
    }

    pub async fn close(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!("closing database connection");
        self.pool.close().await;
        Ok(())
    }
}

#[async_trait]
impl ContentStore for LocalDb {
    async fn list_categories(&self) -> Result<Vec<Category>, Box<dyn Error>> {
        let records = self.categories.list().await?;
        records.into_iter().map(Category::try_from).collect()
    }

    async fn get_category(&self, id: &str) -> Result<Option<Category>, Box<dyn Error>> {
        let record = self.categories.get(id).await?;
        record.map(Category::try_from).transpose()
    }

    async fn insert_category(&self, name: &str, now: Timestamp) -> Result<Category, Box<dyn Error>> {
        let id = self.generate_uid().await?;
        let record = categories::CategoryRecord::new(id, name, now);
        self.categories
            .insert(&record)
            .await
            .map_err(|e| format!("Failed to insert category: {e}"))?;
        Category::try_from(record)
    }

    async fn rename_category(
        &self,
        id: &str,
        name: &str,
    ) -> Result<Option<Category>, Box<dyn Error>> {
        if !self.categories.rename(id, name).await? {
            return Ok(None);
        }
        self.get_category(id).await
    }

    async fn delete_category(&self, id: &str) -> Result<bool, Box<dyn Error>> {
        self.categories
            .delete(id)
            .await
            .map_err(|e| format!("Failed to delete category: {e}").into())
    }

    async fn get_content(&self, id: &str) -> Result<Option<ContentItem>, Box<dyn Error>> {
        let record = self.contents.get(id).await?;
        record.map(ContentItem::try_from).transpose()
    }

    async fn list_contents(
        &self,
        conds: &ContentConditions,
        sort: &[ContentSort],
        pager: Option<&Pager>,
    ) -> Result<Vec<ContentItem>, Box<dyn Error>> {
        let records = self.contents.list(conds, sort, pager).await?;
        records.into_iter().map(ContentItem::try_from).collect()
    }

    async fn count_contents(&self, conds: &ContentConditions) -> Result<i64, Box<dyn Error>> {
        Ok(self.contents.count(conds).await?)
    }

    async fn insert_content(
        &self,
        draft: &ContentDraft,
        now: Timestamp,
    ) -> Result<ContentItem, Box<dyn Error>> {
        let id = self.generate_uid().await?;
        let record = contents::ContentRecord::from_draft(id.clone(), draft, now)?;
        self.contents
            .upsert(&record)
            .await
            .map_err(|e| format!("Failed to insert content item: {e}"))?;

        self.get_content(&id)
            .await?
            .ok_or_else(|| "Content item vanished after insert".into())
    }

    async fn update_content(
        &self,
        id: &str,
        patch: &ContentPatch,
        now: Timestamp,
    ) -> Result<Option<ContentItem>, Box<dyn Error>> {
        let Some(mut item) = self.get_content(id).await? else {
            return Ok(None);
        };

        patch.apply_to(&mut item);
        item.updated_at = now;
        let record = contents::ContentRecord::from_item(&item)?;
        self.contents
            .upsert(&record)
            .await
            .map_err(|e| format!("Failed to update content item: {e}"))?;

        self.get_content(id).await
    }

    async fn delete_content(&self, id: &str) -> Result<bool, Box<dyn Error>> {
        Ok(self.contents.delete(id).await?)
    }
}

impl LocalDb {
    async fn generate_uid(&self) -> Result<String, Box<dyn Error>> {
        for _ in 0..16 {
            let uid = uuid::Uuid::new_v4().to_string();
            if self.categories.get(&uid).await?.is_some() || self.contents.get(&uid).await?.is_some()
            {
                continue;
            }
            return Ok(uid);
        }

        Err("Failed to generate a unique UID after multiple attempts".into())
    }
}

fn parse_timestamp(s: &str) -> Result<Timestamp, Box<dyn Error>> {
    s.parse()
        .map_err(|e| format!("Invalid timestamp in database: {s}: {e}").into())
}
