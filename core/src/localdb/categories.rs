// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use jiff::Timestamp;
use sqlx::SqlitePool;

use crate::Category;
use crate::localdb::parse_timestamp;

#[derive(Debug, Clone)]
pub struct Categories {
    pool: SqlitePool,
}

impl Categories {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, category: &CategoryRecord) -> Result<(), sqlx::Error> {
        const SQL: &str = "\
INSERT INTO categories (id, name, created_at)
VALUES (?, ?, ?);
";

        sqlx::query(SQL)
            .bind(&category.id)
            .bind(&category.name)
            .bind(&category.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<Option<CategoryRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, name, created_at
FROM categories
WHERE id = ?;
";

        sqlx::query_as(SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list(&self) -> Result<Vec<CategoryRecord>, sqlx::Error> {
        const SQL: &str = "\
SELECT id, name, created_at
FROM categories
ORDER BY name ASC, created_at ASC;
";

        sqlx::query_as(SQL).fetch_all(&self.pool).await
    }

    /// Renames a category, returning whether it existed.
    pub async fn rename(&self, id: &str, name: &str) -> Result<bool, sqlx::Error> {
        const SQL: &str = "UPDATE categories SET name = ? WHERE id = ?;";

        let result = sqlx::query(SQL)
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Deletes a category, returning whether it existed.
    pub async fn delete(&self, id: &str) -> Result<bool, sqlx::Error> {
        const SQL: &str = "DELETE FROM categories WHERE id = ?;";

        let result = sqlx::query(SQL).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRecord {
    id: String,
    name: String,
    created_at: String,
}

impl CategoryRecord {
    pub fn new(id: String, name: &str, now: Timestamp) -> Self {
        Self {
            id,
            name: name.to_string(),
            created_at: now.to_string(),
        }
    }
}

impl TryFrom<CategoryRecord> for Category {
    type Error = Box<dyn Error>;

    fn try_from(record: CategoryRecord) -> Result<Self, Self::Error> {
        Ok(Category {
            created_at: parse_timestamp(&record.created_at)?,
            id: record.id,
            short_id: None,
            name: record.name,
        })
    }
}
