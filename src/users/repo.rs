use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub profile_url: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub is_deleted: bool,
}

impl User {
    /// Find a live user by email. Soft-deleted rows never surface.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, nickname, password_hash, profile_url, created_at, updated_at, is_deleted
            FROM users
            WHERE email = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create a new user with hashed password.
    pub async fn create(
        db: &PgPool,
        email: &str,
        nickname: &str,
        password_hash: &str,
    ) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, nickname, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, email, nickname, password_hash, profile_url, created_at, updated_at, is_deleted
            "#,
        )
        .bind(email)
        .bind(nickname)
        .bind(password_hash)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    pub async fn email_taken(db: &PgPool, email: &str) -> anyhow::Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND is_deleted = FALSE)
            "#,
        )
        .bind(email)
        .fetch_one(db)
        .await?;
        Ok(taken)
    }

    pub async fn nickname_taken(db: &PgPool, nickname: &str) -> anyhow::Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE nickname = $1 AND is_deleted = FALSE)
            "#,
        )
        .bind(nickname)
        .fetch_one(db)
        .await?;
        Ok(taken)
    }

    /// True when another live user already holds this nickname.
    pub async fn nickname_taken_by_other(
        db: &PgPool,
        nickname: &str,
        email: &str,
    ) -> anyhow::Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM users
                WHERE nickname = $1 AND email <> $2 AND is_deleted = FALSE
            )
            "#,
        )
        .bind(nickname)
        .bind(email)
        .fetch_one(db)
        .await?;
        Ok(taken)
    }

    /// Overwrite nickname and, when supplied, the profile URL.
    pub async fn update_profile(
        db: &PgPool,
        email: &str,
        nickname: &str,
        profile_url: Option<&str>,
    ) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET nickname = $2,
                profile_url = COALESCE($3, profile_url),
                updated_at = now()
            WHERE email = $1 AND is_deleted = FALSE
            RETURNING id, email, nickname, password_hash, profile_url, created_at, updated_at, is_deleted
            "#,
        )
        .bind(email)
        .bind(nickname)
        .bind(profile_url)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Flip the delete flag; the row stays in place.
    pub async fn soft_delete(db: &PgPool, email: &str) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET is_deleted = TRUE, updated_at = now()
            WHERE email = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(email)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
