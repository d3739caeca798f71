//! AgentMail API client for listing inboxes, threads and messages and
//! sending mail
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::models::{
    Inbox, ListInboxesResponse, ListMessagesResponse, ListThreadsResponse, Message,
    MessageSummary, SendMessageRequest, Thread,
};
use crate::core::AppConfig;

/// The mailbox operations the rest of the app depends on. Implemented
/// by [`AgentMailClient`] and by fakes in tests.
#[async_trait]
pub trait MailboxProvider: Send + Sync {
    async fn list_inboxes(&self) -> Result<Vec<Inbox>>;

    async fn list_threads(&self, inbox_id: &str, limit: usize) -> Result<Vec<Thread>>;

    async fn list_messages(&self, inbox_id: &str, limit: usize) -> Result<Vec<MessageSummary>>;

    async fn get_message(&self, inbox_id: &str, message_id: &str) -> Result<Message>;

    async fn send_message(&self, inbox_id: &str, request: &SendMessageRequest) -> Result<Value>;
}

pub struct AgentMailClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl AgentMailClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Build a fresh client from config. Clients are not cached between
    /// requests.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let api_key = config.require_agentmail_key()?;
        Ok(Self::new(&config.agentmail_api_url, api_key))
    }

    fn inbox_url(&self, inbox_id: &str, rest: &str) -> String {
        format!(
            "{}/v0/inboxes/{}{}",
            self.base_url,
            urlencoding::encode(inbox_id),
            rest
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let res = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("AgentMail request to {} failed: {} ({})", url, status, text);
        }
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl MailboxProvider for AgentMailClient {
    async fn list_inboxes(&self) -> Result<Vec<Inbox>> {
        let url = format!("{}/v0/inboxes", self.base_url);
        let resp: ListInboxesResponse = self.get_json(&url, &[]).await?;
        Ok(resp.inboxes)
    }

    async fn list_threads(&self, inbox_id: &str, limit: usize) -> Result<Vec<Thread>> {
        let url = self.inbox_url(inbox_id, "/threads");
        let resp: ListThreadsResponse = self
            .get_json(&url, &[("limit", limit.to_string())])
            .await?;
        Ok(resp.threads)
    }

    async fn list_messages(&self, inbox_id: &str, limit: usize) -> Result<Vec<MessageSummary>> {
        let url = self.inbox_url(inbox_id, "/messages");
        let resp: ListMessagesResponse = self
            .get_json(&url, &[("limit", limit.to_string())])
            .await?;
        Ok(resp.messages)
    }

    async fn get_message(&self, inbox_id: &str, message_id: &str) -> Result<Message> {
        let url = self.inbox_url(
            inbox_id,
            &format!("/messages/{}", urlencoding::encode(message_id)),
        );
        self.get_json(&url, &[]).await
    }

    async fn send_message(&self, inbox_id: &str, request: &SendMessageRequest) -> Result<Value> {
        let url = self.inbox_url(inbox_id, "/messages/send");
        let res = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await.unwrap_or_default();
        if !status.is_success() {
            anyhow::bail!("AgentMail send failed: {} ({})", status, text);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
