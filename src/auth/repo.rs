use crate::auth::repo_types::User;
use sqlx::PgPool;
use uuid::Uuid;

impl User {
    /// Find a user by email.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, favorite_food, is_admin, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, favorite_food, is_admin, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
        favorite_food: Option<&str>,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, favorite_food)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, favorite_food, is_admin, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(favorite_food)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, favorite_food, is_admin, created_at
            FROM users
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(users)
    }
}
