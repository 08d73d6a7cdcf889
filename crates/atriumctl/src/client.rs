//! Portal Client - HTTP client for the atriumd API

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// HTTP client for the portal daemon
pub struct PortalClient {
    client: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .with_context(|| unreachable_hint(&self.base_url))?;
        Self::decode(resp).await
    }

    pub async fn get_text(&self, path: &str) -> Result<String> {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .with_context(|| unreachable_hint(&self.base_url))?;
        if !resp.status().is_success() {
            bail!("Daemon returned {}", resp.status());
        }
        resp.text().await.context("Failed to read response body")
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| unreachable_hint(&self.base_url))?;
        Self::decode(resp).await
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            bail!("Daemon returned {}: {}", status, text);
        }
        resp.json().await.context("Invalid JSON from daemon")
    }
}

fn unreachable_hint(base_url: &str) -> String {
    format!(
        "Cannot reach the portal daemon at {}. Is atriumd running?",
        base_url
    )
}
