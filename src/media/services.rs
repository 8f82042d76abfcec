use bytes::Bytes;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::state::AppState;
use crate::storage::StorageError;

/// Upload a profile image under a timestamp-prefixed key and return the
/// durable retrieval URL.
pub async fn upload_profile_image(
    st: &AppState,
    body: Bytes,
    content_type: &str,
) -> Result<String, StorageError> {
    let ext = ext_from_mime(content_type).unwrap_or("bin");
    let key = format!(
        "profiles/{}-{}.{}",
        OffsetDateTime::now_utc().unix_timestamp(),
        Uuid::new_v4(),
        ext
    );
    st.storage.put_object(&key, body, content_type).await?;
    Ok(st.storage.object_url(&key))
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::state::AppState;
    use bytes::Bytes;

    #[test]
    fn test_ext_from_mime() {
        assert_eq!(super::ext_from_mime("image/jpeg"), Some("jpg"));
        assert_eq!(super::ext_from_mime("image/jpg"), Some("jpg"));
        assert_eq!(super::ext_from_mime("image/png"), Some("png"));
        assert_eq!(super::ext_from_mime("image/webp"), Some("webp"));
        assert_eq!(super::ext_from_mime("image/heic"), Some("heic"));
        assert_eq!(super::ext_from_mime("application/octet-stream"), None);
        assert_eq!(super::ext_from_mime("whatever/else"), None);
    }

    #[tokio::test]
    async fn upload_returns_storage_url_with_timestamped_key() {
        let state = AppState::fake();

        let url = super::upload_profile_image(&state, Bytes::from_static(b"jpeg"), "image/jpeg")
            .await
            .unwrap();

        assert!(url.starts_with("https://fake.local/profiles/"));
        assert!(url.ends_with(".jpg"));
    }

    #[tokio::test]
    async fn upload_falls_back_to_bin_extension() {
        let state = AppState::fake();

        let url = super::upload_profile_image(&state, Bytes::from_static(b"?"), "application/pdf")
            .await
            .unwrap();

        assert!(url.ends_with(".bin"));
    }
}
