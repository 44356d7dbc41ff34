// Receipt storage backends (implement BaseReceiptStore)

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

use super::BaseReceiptStore;

// =============================================================================
// Supabase Storage
// =============================================================================

/// Uploads receipts to a Supabase Storage bucket with the service-role key
pub struct SupabaseReceiptStore {
    client: Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseReceiptStore {
    pub fn new(base_url: &str, service_key: String, bucket: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            bucket,
        }
    }

    fn object_url(&self, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, self.bucket, path)
    }
}

#[async_trait]
impl BaseReceiptStore for SupabaseReceiptStore {
    async fn upload(&self, path: &str, content_type: &str, bytes: Bytes) -> Result<String> {
        let size = bytes.len();
        let response = self
            .client
            .post(self.object_url(path))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .header("x-upsert", "false")
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .context("Receipt upload request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(path = %path, status = %status, body = %body, "Receipt upload rejected");
            anyhow::bail!("Storage API error {}: {}", status, body);
        }

        info!(path = %path, bytes = size, bucket = %self.bucket, "Receipt uploaded");
        Ok(path.to_string())
    }

    async fn remove(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.object_url(path))
            .bearer_auth(&self.service_key)
            .header("apikey", &self.service_key)
            .send()
            .await
            .context("Receipt delete request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Storage API error {}: {}", status, body);
        }

        info!(path = %path, bucket = %self.bucket, "Receipt removed");
        Ok(())
    }
}

// =============================================================================
// Local filesystem
// =============================================================================

/// Writes receipts under a local directory. Used when Supabase is not configured.
pub struct LocalReceiptStore {
    root: PathBuf,
}

impl LocalReceiptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes || path.is_empty() {
            anyhow::bail!("Refusing to store receipt outside the receipts directory: {}", path);
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BaseReceiptStore for LocalReceiptStore {
    async fn upload(&self, path: &str, _content_type: &str, bytes: Bytes) -> Result<String> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        // Never overwrite an existing receipt
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .await
            .with_context(|| format!("Failed to create {}", target.display()))?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        info!(path = %path, bytes = bytes.len(), "Receipt stored locally");
        Ok(path.to_string())
    }

    async fn remove(&self, path: &str) -> Result<()> {
        let target = self.resolve(path)?;
        tokio::fs::remove_file(&target)
            .await
            .with_context(|| format!("Failed to remove {}", target.display()))?;
        info!(path = %path, "Receipt removed locally");
        Ok(())
    }
}
