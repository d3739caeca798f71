//! Public types for the debug API
use serde::{Deserialize, Serialize};

use crate::core::AppConfig;

/// Which credentials are configured. Only presence and length are
/// reported, never the values.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvReport {
    pub has_agent_mail_key: bool,
    pub has_hyperspell_token: bool,
    #[serde(rename = "hasOpenAIKey")]
    pub has_openai_key: bool,
    pub agent_mail_key_length: usize,
    pub hyperspell_token_length: usize,
}

impl From<&AppConfig> for EnvReport {
    fn from(config: &AppConfig) -> Self {
        let len = |v: &Option<String>| v.as_ref().map_or(0, |s| s.len());
        Self {
            has_agent_mail_key: config.agentmail_api_key.is_some(),
            has_hyperspell_token: config.hyperspell_api_key.is_some(),
            has_openai_key: config.openai_api_key.is_some(),
            agent_mail_key_length: len(&config.agentmail_api_key),
            hyperspell_token_length: len(&config.hyperspell_api_key),
        }
    }
}
