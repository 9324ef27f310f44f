// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::num::NonZeroU32;

use sqlx::SqlitePool;

use crate::Kind;

#[derive(Debug, Clone)]
pub struct ShortIds {
    pool: SqlitePool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UidAndShortId {
    pub uid: String,
    pub kind: Kind,
    pub short_id: NonZeroU32,
}

impl ShortIds {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_by_short_id(
        &self,
        short_id: NonZeroU32,
    ) -> Result<Option<UidAndShortId>, sqlx::Error> {
        let row: Option<(String, String)> =
            sqlx::query_as("SELECT uid, kind FROM short_ids WHERE short_id = ?")
                .bind(i64::from(short_id.get()))
                .fetch_optional(&self.pool)
                .await?;

        let Some((uid, kind)) = row else {
            return Ok(None);
        };

        match kind.parse() {
            Ok(kind) => Ok(Some(UidAndShortId {
                uid,
                kind,
                short_id,
            })),
            Err(_) => {
                tracing::warn!(%kind, "unknown short_id kind");
                Ok(None)
            }
        }
    }

    pub async fn get_or_assign_short_id(
        &self,
        uid: &str,
        kind: Kind,
    ) -> Result<NonZeroU32, sqlx::Error> {
        const SQL: &str = "
INSERT INTO short_ids (uid, kind) VALUES (?, ?)
ON CONFLICT(uid) DO NOTHING
RETURNING short_id
";

        if let Some((short_id,)) = sqlx::query_as::<_, (i64,)>(SQL)
            .bind(uid)
            .bind(kind.as_ref())
            .fetch_optional(&self.pool)
            .await?
        {
            return to_short_id(short_id);
        }

        // if the insert did not return a short_id, it means the uid already exists
        let (short_id,): (i64,) = sqlx::query_as("SELECT short_id FROM short_ids WHERE uid = ?")
            .bind(uid)
            .fetch_one(&self.pool)
            .await?;

        to_short_id(short_id)
    }

    pub async fn remove(&self, uid: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM short_ids WHERE uid = ?")
            .bind(uid)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Removes all short ids so numbering starts over from 1.
    pub async fn flush(&self) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM short_ids")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

fn to_short_id(value: i64) -> Result<NonZeroU32, sqlx::Error> {
    u32::try_from(value)
        .ok()
        .and_then(NonZeroU32::new)
        .ok_or_else(|| sqlx::Error::Decode(format!("invalid short_id: {value}").into()))
}

#[cfg(test)]
mod tests {
    use crate::localdb::LocalDb;

    use super::*;

    #[tokio::test]
    async fn assigns_sequential_ids_once() {
        let db = LocalDb::open(None).await.unwrap();

        let a = db
            .short_ids
            .get_or_assign_short_id("uid-a", Kind::Category)
            .await
            .unwrap();
        let b = db
            .short_ids
            .get_or_assign_short_id("uid-b", Kind::Content)
            .await
            .unwrap();
        let a_again = db
            .short_ids
            .get_or_assign_short_id("uid-a", Kind::Category)
            .await
            .unwrap();

        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
        assert_eq!(a, a_again);
    }

    #[tokio::test]
    async fn looks_up_uid_and_kind() {
        let db = LocalDb::open(None).await.unwrap();
        let id = db
            .short_ids
            .get_or_assign_short_id("uid-a", Kind::Content)
            .await
            .unwrap();

        let found = db.short_ids.get_by_short_id(id).await.unwrap().unwrap();
        assert_eq!(found.uid, "uid-a");
        assert_eq!(found.kind, Kind::Content);

        let missing = NonZeroU32::new(99).unwrap();
        assert!(db.short_ids.get_by_short_id(missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn flush_restarts_numbering() {
        let db = LocalDb::open(None).await.unwrap();
        for uid in ["a", "b", "c"] {
            db.short_ids
                .get_or_assign_short_id(uid, Kind::Content)
                .await
                .unwrap();
        }

        assert_eq!(db.short_ids.flush().await.unwrap(), 3);
        let id = db
            .short_ids
            .get_or_assign_short_id("d", Kind::Content)
            .await
            .unwrap();
        assert_eq!(id.get(), 1);
    }

    #[tokio::test]
    async fn remove_forgets_uid() {
        let db = LocalDb::open(None).await.unwrap();
        let id = db
            .short_ids
            .get_or_assign_short_id("a", Kind::Category)
            .await
            .unwrap();

        db.short_ids.remove("a").await.unwrap();
        assert!(db.short_ids.get_by_short_id(id).await.unwrap().is_none());
    }
}
