use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Contact message left through the help form.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HelpMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl HelpMessage {
    pub async fn create(db: &PgPool, name: &str, email: &str, message: &str) -> anyhow::Result<HelpMessage> {
        let row = sqlx::query_as::<_, HelpMessage>(
            r#"
            INSERT INTO help_messages (name, email, message)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, message, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(message)
        .fetch_one(db)
        .await
        .context("insert help message")?;
        Ok(row)
    }

    /// Newest first.
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<HelpMessage>> {
        let rows = sqlx::query_as::<_, HelpMessage>(
            r#"
            SELECT id, name, email, message, created_at
              FROM help_messages
             ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await
        .context("list help messages")?;
        Ok(rows)
    }
}
