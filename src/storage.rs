//! Object storage behind a trait, with a Supabase Storage implementation.
//!
//! Uploads are all-or-nothing and never retried here; a failed upload is a
//! job-level failure and retries are the orchestrator's concern.

use async_trait::async_trait;
use serde_json::json;

use crate::config::SupabaseConfig;
use crate::error::StorageError;

/// Storage seam used by the orchestrator and the download gateway.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload a blob to `path`. All-or-nothing; no partial-write visibility.
    async fn upload_file(&self, path: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Fetch a stored blob.
    async fn download_file(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Remove a stored blob. Used when a retry invalidates old materials.
    async fn delete_file(&self, path: &str) -> Result<(), StorageError>;

    /// Issue a time-limited signed URL for `path`.
    ///
    /// The returned URL's native validity is an implementation detail: the
    /// download gateway authorizes against the Material's stored expiry,
    /// never against the signature itself.
    async fn create_signed_url(
        &self,
        path: &str,
        expires_in_secs: u64,
    ) -> Result<String, StorageError>;
}

/// Supabase Storage REST client.
pub struct SupabaseStorage {
    config: SupabaseConfig,
    client: reqwest::Client,
}

impl SupabaseStorage {
    pub fn new(config: SupabaseConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.config.url, self.config.bucket, path
        )
    }

    fn sign_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/sign/{}/{}",
            self.config.url, self.config.bucket, path
        )
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StorageError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn upload_file(&self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let response = self
            .client
            .post(self.object_url(path))
            .bearer_auth(&self.config.service_key)
            .header("x-upsert", "false")
            .header("content-type", "application/octet-stream")
            .body(data.to_vec())
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        Self::check(response).await?;
        log::debug!("uploaded {} bytes to {path}", data.len());
        Ok(())
    }

    async fn download_file(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        let response = self
            .client
            .get(self.object_url(path))
            .bearer_auth(&self.config.service_key)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        let response = Self::check(response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn delete_file(&self, path: &str) -> Result<(), StorageError> {
        let response = self
            .client
            .delete(self.object_url(path))
            .bearer_auth(&self.config.service_key)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    async fn create_signed_url(
        &self,
        path: &str,
        expires_in_secs: u64,
    ) -> Result<String, StorageError> {
        let response = self
            .client
            .post(self.sign_url(path))
            .bearer_auth(&self.config.service_key)
            .json(&json!({ "expiresIn": expires_in_secs }))
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;
        let response = Self::check(response).await?;
        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| StorageError::MalformedResponse(e.to_string()))?;
        let signed_path = body
            .get("signedURL")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                StorageError::MalformedResponse("sign response missing signedURL".to_string())
            })?;
        Ok(format!("{}/storage/v1{signed_path}", self.config.url))
    }
}
