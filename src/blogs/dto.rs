use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::blogs::repo::Blog;

/// Request body for blog create and update.
#[derive(Debug, Deserialize)]
pub struct BlogPayload {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<Blog> for BlogResponse {
    fn from(b: Blog) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            title: b.title,
            content: b.content,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

/// Confirmation returned after a blog soft-deletion.
#[derive(Debug, Serialize)]
pub struct DeletedBlogResponse {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_deserializes() {
        let payload: BlogPayload =
            serde_json::from_str(r#"{"title":"hello","content":"world"}"#).unwrap();
        assert_eq!(payload.title, "hello");
        assert_eq!(payload.content, "world");
    }

    #[test]
    fn response_hides_delete_flag() {
        let blog = Blog {
            id: 1,
            user_id: 2,
            title: "t".into(),
            content: "c".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
            is_deleted: false,
        };
        let json = serde_json::to_string(&BlogResponse::from(blog)).unwrap();
        assert!(json.contains("\"title\":\"t\""));
        assert!(!json.contains("is_deleted"));
    }
}
