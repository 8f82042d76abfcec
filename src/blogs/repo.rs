use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Blog record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub is_deleted: bool,
}

impl Blog {
    pub async fn create(
        db: &PgPool,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Blog> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            INSERT INTO blogs (user_id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, title, content, created_at, updated_at, is_deleted
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(content)
        .fetch_one(db)
        .await?;
        Ok(blog)
    }

    /// All live blogs, newest first.
    pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<Blog>> {
        let rows = sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, user_id, title, content, created_at, updated_at, is_deleted
            FROM blogs
            WHERE is_deleted = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    pub async fn list_by_user(db: &PgPool, user_id: i64) -> anyhow::Result<Vec<Blog>> {
        let rows = sqlx::query_as::<_, Blog>(
            r#"
            SELECT id, user_id, title, content, created_at, updated_at, is_deleted
            FROM blogs
            WHERE user_id = $1 AND is_deleted = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(rows)
    }

    /// Owner-checked update. Returns `None` when no live row belongs to the
    /// caller.
    pub async fn update(
        db: &PgPool,
        blog_id: i64,
        user_id: i64,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Option<Blog>> {
        let blog = sqlx::query_as::<_, Blog>(
            r#"
            UPDATE blogs
            SET title = $3, content = $4, updated_at = now()
            WHERE id = $1 AND user_id = $2 AND is_deleted = FALSE
            RETURNING id, user_id, title, content, created_at, updated_at, is_deleted
            "#,
        )
        .bind(blog_id)
        .bind(user_id)
        .bind(title)
        .bind(content)
        .fetch_optional(db)
        .await?;
        Ok(blog)
    }

    /// Owner-checked soft delete.
    pub async fn soft_delete(db: &PgPool, blog_id: i64, user_id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE blogs
            SET is_deleted = TRUE, updated_at = now()
            WHERE id = $1 AND user_id = $2 AND is_deleted = FALSE
            "#,
        )
        .bind(blog_id)
        .bind(user_id)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
