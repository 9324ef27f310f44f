// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use jiff::Timestamp;
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Sqlite, SqlitePool};

use crate::localdb::parse_timestamp;
use crate::{
    Category, ContentConditions, ContentDraft, ContentItem, ContentSort, ContentSortKey, Pager,
};

const SELECT: &str = "\
SELECT c.id, c.category_id, c.name, c.raw_file_urls, c.inspo_urls, c.final_url, c.stage,
       c.social, c.timeline_days, c.scheduled_date, c.created_at, c.updated_at,
       k.name AS category_name, k.created_at AS category_created_at
FROM content_items c
LEFT JOIN categories k ON k.id = c.category_id
";

#[derive(Debug, Clone)]
pub struct Contents {
    pool: SqlitePool,
}

impl Contents {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn upsert(&self, content: &ContentRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO content_items (id, category_id, name, raw_file_urls, inspo_urls, final_url, stage,
                           social, timeline_days, scheduled_date, created_at, updated_at)
VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
ON CONFLICT(id) DO UPDATE SET
    category_id    = excluded.category_id,
    name           = excluded.name,
    raw_file_urls  = excluded.raw_file_urls,
    inspo_urls     = excluded.inspo_urls,
    final_url      = excluded.final_url,
    stage          = excluded.stage,
    social         = excluded.social,
    timeline_days  = excluded.timeline_days,
    scheduled_date = excluded.scheduled_date,
    updated_at     = excluded.updated_at;
";

        sqlx::query(SQL)
            .bind(&content.id)
            .bind(&content.category_id)
            .bind(&content.name)
            .bind(&content.raw_file_urls)
            .bind(&content.inspo_urls)
            .bind(&content.final_url)
            .bind(&content.stage)
            .bind(&content.social)
            .bind(content.timeline_days)
            .bind(&content.scheduled_date)
            .bind(&content.created_at)
            .bind(&content.updated_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Option<ContentRecord>, sqlx::Error> {
        let sql = format!("{SELECT}WHERE c.id = ?;");
        sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list(
        &self,
        conds: &ContentConditions,
        sort: &[ContentSort],
        pager: Option<&Pager>,
    ) -> Result<Vec<ContentRecord>, sqlx::Error> {
        let mut sql = SELECT.to_string();
        sql += &Self::build_where(conds);

        sql += "ORDER BY ";
        for s in sort {
            sql += "c.";
            sql += s.key.column();
            sql += " ";
            sql += s.order.sql_keyword();
            if s.key == ContentSortKey::ScheduledDate {
                sql += match s.order.is_asc() {
                    true => " NULLS LAST",
                    false => " NULLS FIRST",
                };
            }
            sql += ", ";
        }
        sql += "c.created_at ASC, c.id ASC";

        if pager.is_some() {
            sql += " LIMIT ? OFFSET ?";
        }
        sql += ";";

        let mut query = sqlx::query_as(&sql);
        query = Self::bind_conditions(conds, query);
        if let Some(pager) = pager {
            query = query.bind(pager.limit).bind(pager.offset);
        }
        query.fetch_all(&self.pool).await
    }

    pub async fn count(&self, conds: &ContentConditions) -> Result<i64, sqlx::Error> {
        let mut sql = "SELECT COUNT(*) FROM content_items c ".to_string();
        sql += &Self::build_where(conds);
        sql += ";";

        let mut query = sqlx::query_as(&sql);
        query = Self::bind_conditions(conds, query);
        let row: (i64,) = query.fetch_one(&self.pool).await?;
        Ok(row.0)
    }

    /// Deletes a content item, returning whether it existed.
    pub async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        const SQL: &str = "DELETE FROM content_items WHERE id = ?;";

        let result = sqlx::query(SQL).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    fn build_where(conds: &ContentConditions) -> String {
        let mut where_clauses = Vec::new();
        if conds.category_id.is_some() {
            where_clauses.push("c.category_id = ?");
        }
        match conds.scheduled {
            Some(true) => where_clauses.push("c.scheduled_date IS NOT NULL"),
            Some(false) => where_clauses.push("c.scheduled_date IS NULL"),
            None => {}
        }
        if conds.stage.is_some() {
            where_clauses.push("c.stage = ?");
        }
        if conds.social.is_some() {
            where_clauses.push("c.social = ?");
        }
        if conds.scheduled_from.is_some() {
            where_clauses.push("c.scheduled_date >= ?");
        }
        if conds.scheduled_until.is_some() {
            where_clauses.push("c.scheduled_date <= ?");
        }

        if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {} ", where_clauses.join(" AND "))
        }
    }

    fn bind_conditions<'a, O>(
        conds: &'a ContentConditions,
        mut query: QueryAs<'a, Sqlite, O, SqliteArguments<'a>>,
    ) -> QueryAs<'a, Sqlite, O, SqliteArguments<'a>> {
        if let Some(category_id) = &conds.category_id {
            query = query.bind(category_id);
        }
        if let Some(stage) = &conds.stage {
            let stage: &str = stage.as_ref();
            query = query.bind(stage);
        }
        if let Some(social) = &conds.social {
            let social: &str = social.as_ref();
            query = query.bind(social);
        }
        if let Some(from) = conds.scheduled_from {
            query = query.bind(from.to_string());
        }
        if let Some(until) = conds.scheduled_until {
            query = query.bind(until.to_string());
        }
        query
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContentRecord {
    id: String,
    category_id: String,
    name: String,
    raw_file_urls: String,
    inspo_urls: String,
    final_url: Option<String>,
    stage: String,
    social: String,
    timeline_days: i64,
    scheduled_date: Option<String>,
    created_at: String,
    updated_at: String,

    #[sqlx(default)]
    category_name: Option<String>,
    #[sqlx(default)]
    category_created_at: Option<String>,
}

impl ContentRecord {
    pub fn from_draft(
        id: String,
        draft: &ContentDraft,
        now: Timestamp,
    ) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            id,
            category_id: draft.category_id.clone(),
            name: draft.name.clone(),
            raw_file_urls: serde_json::to_string(&draft.raw_file_urls)?,
            inspo_urls: serde_json::to_string(&draft.inspo_urls)?,
            final_url: draft.final_url.clone(),
            stage: draft.stage.to_string(),
            social: draft.social.to_string(),
            timeline_days: i64::from(draft.timeline_days),
            scheduled_date: draft.scheduled_date.map(|d| d.to_string()),
            created_at: now.to_string(),
            updated_at: now.to_string(),
            category_name: None,
            category_created_at: None,
        })
    }

    pub fn from_item(item: &ContentItem) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            id: item.id.clone(),
            category_id: item.category_id.clone(),
            name: item.name.clone(),
            raw_file_urls: serde_json::to_string(&item.raw_file_urls)?,
            inspo_urls: serde_json::to_string(&item.inspo_urls)?,
            final_url: item.final_url.clone(),
            stage: item.stage.to_string(),
            social: item.social.to_string(),
            timeline_days: i64::from(item.timeline_days),
            scheduled_date: item.scheduled_date.map(|d| d.to_string()),
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
            category_name: None,
            category_created_at: None,
        })
    }
}

impl TryFrom<ContentRecord> for ContentItem {
    type Error = Box<dyn Error>;

    fn try_from(record: ContentRecord) -> Result<Self, Self::Error> {
        let category = match (record.category_name, record.category_created_at) {
            (Some(name), Some(created_at)) => Some(Category {
                id: record.category_id.clone(),
                short_id: None,
                name,
                created_at: parse_timestamp(&created_at)?,
            }),
            _ => None,
        };

        let scheduled_date = record
            .scheduled_date
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(|e| format!("Invalid scheduled date in database: {e}"))?;

        Ok(ContentItem {
            short_id: None,
            category_id: record.category_id,
            name: record.name,
            raw_file_urls: serde_json::from_str(&record.raw_file_urls)?,
            inspo_urls: serde_json::from_str(&record.inspo_urls)?,
            final_url: record.final_url,
            stage: record.stage.parse()?,
            social: record.social.parse()?,
            timeline_days: u32::try_from(record.timeline_days)?,
            scheduled_date,
            created_at: parse_timestamp(&record.created_at)?,
            updated_at: parse_timestamp(&record.updated_at)?,
            category,
            id: record.id,
        })
    }
}
