use std::env;

use anyhow::{Result, anyhow};

pub const DEFAULT_AGENTMAIL_API_URL: &str = "https://api.agentmail.to";
pub const DEFAULT_HYPERSPELL_API_URL: &str = "https://api.hyperspell.com";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub storage_path: String,
    pub db_path: String,
    pub static_path: String,
    pub agentmail_api_url: String,
    pub agentmail_api_key: Option<String>,
    pub hyperspell_api_url: String,
    pub hyperspell_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

impl AppConfig {
    /// Build the config from an arbitrary variable lookup. Empty values
    /// are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let storage_path = var("PLAIPIN_STORAGE_PATH").unwrap_or("./".to_string());
        let db_path = format!("{}/db", storage_path.trim_end_matches('/'));
        let static_path = var("PLAIPIN_STATIC_PATH").unwrap_or("./client/dist".to_string());
        let agentmail_api_url =
            var("AGENTMAIL_API_URL").unwrap_or_else(|| DEFAULT_AGENTMAIL_API_URL.to_string());
        let hyperspell_api_url =
            var("HYPERSPELL_API_URL").unwrap_or_else(|| DEFAULT_HYPERSPELL_API_URL.to_string());

        Self {
            storage_path,
            db_path,
            static_path,
            agentmail_api_url,
            agentmail_api_key: var("AGENTMAIL_API_KEY"),
            hyperspell_api_url,
            hyperspell_api_key: var("HYPERSPELL_TOKEN"),
            openai_api_key: var("OPENAI_API_KEY"),
        }
    }

    pub fn require_agentmail_key(&self) -> Result<&str> {
        self.agentmail_api_key
            .as_deref()
            .ok_or_else(|| anyhow!("AGENTMAIL_API_KEY not found in environment variables"))
    }

    pub fn require_hyperspell_key(&self) -> Result<&str> {
        self.hyperspell_api_key
            .as_deref()
            .ok_or_else(|| anyhow!("HYPERSPELL_TOKEN not found in environment variables"))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }
}
