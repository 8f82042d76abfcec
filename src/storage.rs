use async_trait::async_trait;
use aws_config::{defaults, BehaviorVersion};
use aws_credential_types::Credentials;
use aws_sdk_s3::{
    config::{Builder as S3ConfigBuilder, Region},
    Client,
};
use aws_smithy_types::byte_stream::ByteStream;
use bytes::Bytes;
use thiserror::Error;

use crate::config::S3Config;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage credentials are not configured")]
    MissingCredentials,
    #[error("storage transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn put_object(&self, key: &str, body: Bytes, content_type: &str)
        -> Result<(), StorageError>;
    async fn bucket_names(&self) -> Result<Vec<String>, StorageError>;
    /// Durable public URL for a stored object.
    fn object_url(&self, key: &str) -> String;
}

#[derive(Clone, Debug)]
pub struct Storage {
    client: Client,
    bucket: String,
    region: String,
    endpoint: Option<String>,
}

impl Storage {
    pub async fn new(cfg: &S3Config) -> Result<Self, StorageError> {
        if cfg.access_key.trim().is_empty() || cfg.secret_key.trim().is_empty() {
            return Err(StorageError::MissingCredentials);
        }

        let shared = defaults(BehaviorVersion::latest())
            .region(Region::new(cfg.region.clone()))
            .credentials_provider(Credentials::new(
                cfg.access_key.clone(),
                cfg.secret_key.clone(),
                None,
                None,
                "static",
            ))
            .load()
            .await;

        let mut builder = S3ConfigBuilder::from(&shared);
        if let Some(endpoint) = &cfg.endpoint {
            // MinIO-style endpoints need path-style addressing
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: cfg.bucket.clone(),
            region: cfg.region.clone(),
            endpoint: cfg.endpoint.clone(),
        })
    }
}

#[async_trait]
impl StorageClient for Storage {
    async fn put_object(
        &self,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;
        Ok(())
    }

    async fn bucket_names(&self) -> Result<Vec<String>, StorageError> {
        let out = self
            .client
            .list_buckets()
            .send()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;
        Ok(out
            .buckets()
            .iter()
            .filter_map(|b| b.name().map(str::to_string))
            .collect())
    }

    fn object_url(&self, key: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key),
            None => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s3_config(access_key: &str, secret_key: &str) -> S3Config {
        S3Config {
            bucket: "profiles".into(),
            region: "us-east-1".into(),
            endpoint: None,
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    #[tokio::test]
    async fn new_rejects_blank_credentials() {
        let err = Storage::new(&s3_config("", "")).await.unwrap_err();
        assert!(matches!(err, StorageError::MissingCredentials));

        let err = Storage::new(&s3_config("key", " ")).await.unwrap_err();
        assert!(matches!(err, StorageError::MissingCredentials));
    }

    #[tokio::test]
    async fn object_url_uses_virtual_hosted_style() {
        let storage = Storage::new(&s3_config("key", "secret")).await.expect("storage");
        assert_eq!(
            storage.object_url("profiles/1-a.jpg"),
            "https://profiles.s3.us-east-1.amazonaws.com/profiles/1-a.jpg"
        );
    }

    #[tokio::test]
    async fn object_url_prefers_custom_endpoint() {
        let mut cfg = s3_config("key", "secret");
        cfg.endpoint = Some("http://localhost:9000/".into());
        let storage = Storage::new(&cfg).await.expect("storage");
        assert_eq!(
            storage.object_url("profiles/1-a.jpg"),
            "http://localhost:9000/profiles/profiles/1-a.jpg"
        );
    }
}
