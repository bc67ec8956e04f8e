use anyhow::{bail, Context, Result};
use reqwest::header::CONTENT_TYPE;

use crate::store::traits::ObjectStore;

/// HTTP gateway to the hosted object store. The service speaks a
/// bucket-style REST dialect: POST uploads by path, public objects are
/// served under a `/object/public/` prefix, and deletion takes a batch of
/// paths in one request.
#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
    bucket: String,
    service_key: String,
}

impl HttpObjectStore {
    pub fn new(endpoint: &str, bucket: &str, service_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            bucket: bucket.to_string(),
            service_key: service_key.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for HttpObjectStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let url = format!("{}/object/{}/{}", self.endpoint, self.bucket, path);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.service_key)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .context("Failed to reach object storage")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Upload of '{path}' failed ({status}): {body}");
        }

        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/object/public/{}/{}", self.endpoint, self.bucket, path)
    }

    async fn remove(&self, paths: &[String]) -> Result<()> {
        let url = format!("{}/object/{}", self.endpoint, self.bucket);
        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.service_key)
            .json(&serde_json::json!({ "prefixes": paths }))
            .send()
            .await
            .context("Failed to reach object storage")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("Batch delete of {} object(s) failed ({status}): {body}", paths.len());
        }

        Ok(())
    }
}
