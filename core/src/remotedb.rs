// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use async_trait::async_trait;
use jiff::Timestamp;
use jiff::civil::Date;
use plancal_rest::{Query, RestClient, RestError};

use crate::store::ContentStore;
use crate::{
    Category, ContentConditions, ContentDraft, ContentItem, ContentPatch, ContentSort,
    MAX_TIMELINE_DAYS, Pager, Platform, Stage,
};

const CATEGORIES: &str = "categories";
const CONTENT_ITEMS: &str = "content_items";
const CONTENT_SELECT: &str = "*,category:categories(*)";

/// Content store backed by the hosted table API.
#[derive(Debug)]
pub struct RemoteDb {
    client: RestClient,
}

impl RemoteDb {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    fn content_query(conds: &ContentConditions) -> Query {
        let mut query = Query::new().select(CONTENT_SELECT);
        if let Some(category_id) = &conds.category_id {
            query = query.eq("category_id", category_id);
        }
        match conds.scheduled {
            Some(true) => query = query.not_null("scheduled_date"),
            Some(false) => query = query.is_null("scheduled_date"),
            None => {}
        }
        if let Some(stage) = conds.stage {
            query = query.eq("stage", stage);
        }
        if let Some(social) = conds.social {
            query = query.eq("social", social);
        }
        if let Some(from) = conds.scheduled_from {
            query = query.gte("scheduled_date", from);
        }
        if let Some(until) = conds.scheduled_until {
            query = query.lte("scheduled_date", until);
        }
        query
    }
}

#[async_trait]
impl ContentStore for RemoteDb {
    async fn list_categories(&self) -> Result<Vec<Category>, Box<dyn Error>> {
        let query = Query::new().select("*").order("name", true);
        Ok(self.client.select(CATEGORIES, &query).await?)
    }

    async fn get_category(&self, id: &str) -> Result<Option<Category>, Box<dyn Error>> {
        let query = Query::new().select("*").eq("id", id);
        Ok(or_missing(self.client.select_one(CATEGORIES, &query).await)?)
    }

    async fn insert_category(&self, name: &str, now: Timestamp) -> Result<Category, Box<dyn Error>> {
        let row = NewCategoryRow {
            name,
            created_at: now,
        };
        let query = Query::new().select("*");
        self.client
            .insert(CATEGORIES, &row, &query)
            .await
            .map_err(|e| format!("Failed to insert category: {e}").into())
    }

    async fn rename_category(
        &self,
        id: &str,
        name: &str,
    ) -> Result<Option<Category>, Box<dyn Error>> {
        let query = Query::new().select("*").eq("id", id);
        let body = serde_json::json!({ "name": name });
        let rows: Vec<Category> = or_missing(self.client.update(CATEGORIES, &query, &body).await)?;
        Ok(rows.into_iter().next())
    }

    async fn delete_category(&self, id: &str) -> Result<bool, Box<dyn Error>> {
        let query = Query::new().eq("id", id);
        let deleted = self
            .client
            .delete(CATEGORIES, &query)
            .await
            .map_err(|e| format!("Failed to delete category: {e}"))?;
        Ok(deleted > 0)
    }

    async fn get_content(&self, id: &str) -> Result<Option<ContentItem>, Box<dyn Error>> {
        let query = Query::new().select(CONTENT_SELECT).eq("id", id);
        let item = or_missing(self.client.select_one(CONTENT_ITEMS, &query).await)?;
        Ok(item.map(clamp_timeline))
    }

    async fn list_contents(
        &self,
        conds: &ContentConditions,
        sort: &[ContentSort],
        pager: Option<&Pager>,
    ) -> Result<Vec<ContentItem>, Box<dyn Error>> {
        let mut query = Self::content_query(conds);
        // postgres sorts nulls last ascending and first descending
        for s in sort {
            query = query.order(s.key.column(), s.order.is_asc());
        }
        query = query.order("created_at", true).order("id", true);
        if let Some(pager) = pager {
            query = query.limit(pager.limit).offset(pager.offset);
        }
        let items: Vec<ContentItem> = self.client.select(CONTENT_ITEMS, &query).await?;
        Ok(items.into_iter().map(clamp_timeline).collect())
    }

    async fn count_contents(&self, conds: &ContentConditions) -> Result<i64, Box<dyn Error>> {
        let query = Self::content_query(conds);
        Ok(self.client.count(CONTENT_ITEMS, &query).await?)
    }

    async fn insert_content(
        &self,
        draft: &ContentDraft,
        now: Timestamp,
    ) -> Result<ContentItem, Box<dyn Error>> {
        let row = NewContentRow {
            category_id: &draft.category_id,
            name: &draft.name,
            raw_file_urls: &draft.raw_file_urls,
            inspo_urls: &draft.inspo_urls,
            final_url: draft.final_url.as_deref(),
            stage: draft.stage,
            social: draft.social,
            timeline_days: draft.timeline_days,
            scheduled_date: draft.scheduled_date,
            created_at: now,
            updated_at: now,
        };
        let query = Query::new().select(CONTENT_SELECT);
        let item = self
            .client
            .insert(CONTENT_ITEMS, &row, &query)
            .await
            .map_err(|e| format!("Failed to insert content item: {e}"))?;
        Ok(clamp_timeline(item))
    }

    async fn update_content(
        &self,
        id: &str,
        patch: &ContentPatch,
        now: Timestamp,
    ) -> Result<Option<ContentItem>, Box<dyn Error>> {
        let query = Query::new().select(CONTENT_SELECT).eq("id", id);
        let body = PatchRow {
            patch,
            updated_at: now,
        };
        let rows: Vec<ContentItem> =
            or_missing(self.client.update(CONTENT_ITEMS, &query, &body).await)
                .map_err(|e| format!("Failed to update content item: {e}"))?;
        Ok(rows.into_iter().next().map(clamp_timeline))
    }

    async fn delete_content(&self, id: &str) -> Result<bool, Box<dyn Error>> {
        let query = Query::new().eq("id", id);
        Ok(self.client.delete(CONTENT_ITEMS, &query).await? > 0)
    }
}

/// Treats an id the server cannot parse, such as a number against a uuid
/// column, as matching no row.
fn or_missing<T: Default>(result: Result<T, RestError>) -> Result<T, RestError> {
    match result {
        Err(RestError::Status {
            status: 400,
            message,
        }) if message.contains("invalid input syntax") => {
            tracing::debug!(reason = %message, "id rejected by server, treating it as missing");
            Ok(T::default())
        }
        other => other,
    }
}

/// Rows written by other clients may exceed the timeline limit the month
/// grid fetches by, so they are capped on the way in.
fn clamp_timeline(mut item: ContentItem) -> ContentItem {
    if item.timeline_days > MAX_TIMELINE_DAYS {
        tracing::warn!(id = %item.id, days = item.timeline_days, "capping timeline of remote item");
        item.timeline_days = MAX_TIMELINE_DAYS;
    }
    item
}

#[derive(Debug, serde::Serialize)]
struct NewCategoryRow<'a> {
    name: &'a str,
    created_at: Timestamp,
}

#[derive(Debug, serde::Serialize)]
struct NewContentRow<'a> {
    category_id: &'a str,
    name: &'a str,
    raw_file_urls: &'a [String],
    inspo_urls: &'a [String],
    final_url: Option<&'a str>,
    stage: Stage,
    social: Platform,
    timeline_days: u32,
    scheduled_date: Option<Date>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

#[derive(Debug, serde::Serialize)]
struct PatchRow<'a> {
    #[serde(flatten)]
    patch: &'a ContentPatch,
    updated_at: Timestamp,
}
