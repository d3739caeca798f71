//! Hyperspell API client for adding and querying memories
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};

use super::models::{AddMemoryResponse, NewMemory, SearchRequest, SearchResponse};
use crate::core::AppConfig;

#[async_trait]
pub trait MemoryStore: Send + Sync {
    async fn add_memory(&self, memory: &NewMemory) -> Result<AddMemoryResponse>;

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse>;
}

pub struct HyperspellClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl HyperspellClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api_key = config.require_hyperspell_key()?;
        Ok(Self::new(&config.hyperspell_api_url, api_key))
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let res = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("Hyperspell request to {} failed: {} ({})", path, status, text);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl MemoryStore for HyperspellClient {
    async fn add_memory(&self, memory: &NewMemory) -> Result<AddMemoryResponse> {
        self.post_json("/memories/add", memory).await
    }

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.post_json("/memories/query", request).await
    }
}
