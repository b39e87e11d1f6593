use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{HistoryKind, HistoryRecord, HistoryRow};

#[async_trait]
pub trait HistoryRepo: Send + Sync {
    async fn insert(
        &self,
        user_id: Uuid,
        kind: HistoryKind,
        payload: &serde_json::Value,
    ) -> anyhow::Result<HistoryRecord>;

    /// Newest first.
    async fn list_recent(
        &self,
        user_id: Uuid,
        kind: HistoryKind,
        limit: i64,
    ) -> anyhow::Result<Vec<HistoryRecord>>;

    /// Returns false when the record is absent or owned by someone else.
    async fn delete_owned(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool>;

    async fn clear(&self, user_id: Uuid, kind: Option<HistoryKind>) -> anyhow::Result<u64>;
}

#[derive(Clone)]
pub struct PgHistoryRepo {
    db: PgPool,
}

impl PgHistoryRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HistoryRepo for PgHistoryRepo {
    async fn insert(
        &self,
        user_id: Uuid,
        kind: HistoryKind,
        payload: &serde_json::Value,
    ) -> anyhow::Result<HistoryRecord> {
        let row = sqlx::query_as::<_, HistoryRow>(
            r#"
            INSERT INTO history (user_id, kind, payload)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, kind, payload, created_at
            "#,
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(sqlx::types::Json(payload))
        .fetch_one(&self.db)
        .await
        .context("insert history")?;
        row.try_into()
    }

    async fn list_recent(
        &self,
        user_id: Uuid,
        kind: HistoryKind,
        limit: i64,
    ) -> anyhow::Result<Vec<HistoryRecord>> {
        let rows = sqlx::query_as::<_, HistoryRow>(
            r#"
            SELECT id, user_id, kind, payload, created_at
              FROM history
             WHERE user_id = $1 AND kind = $2
             ORDER BY created_at DESC
             LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(limit)
        .fetch_all(&self.db)
        .await
        .context("list history")?;
        rows.into_iter().map(HistoryRecord::try_from).collect()
    }

    async fn delete_owned(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM history WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.db)
            .await
            .context("delete history")?;
        Ok(res.rows_affected() > 0)
    }

    async fn clear(&self, user_id: Uuid, kind: Option<HistoryKind>) -> anyhow::Result<u64> {
        let res = match kind {
            Some(kind) => {
                sqlx::query("DELETE FROM history WHERE user_id = $1 AND kind = $2")
                    .bind(user_id)
                    .bind(kind.as_str())
                    .execute(&self.db)
                    .await
            }
            None => {
                sqlx::query("DELETE FROM history WHERE user_id = $1")
                    .bind(user_id)
                    .execute(&self.db)
                    .await
            }
        }
        .context("clear history")?;
        Ok(res.rows_affected())
    }
}
