use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Collection every email narrative is written to and searched from.
pub const EMAIL_COLLECTION: &str = "agentmail_emails";
pub const ANSWER_MODEL: &str = "gpt-4o";

/// Tag stored alongside each email memory so duplicates can be traced
/// back to the message they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryTag {
    pub email_id: String,
    pub from: String,
    pub subject: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewMemory {
    pub text: String,
    pub collection: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MemoryTag>,
}

impl NewMemory {
    pub fn email(text: String, tag: MemoryTag) -> Self {
        Self {
            text,
            collection: EMAIL_COLLECTION.to_string(),
            metadata: Some(tag),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddMemoryResponse {
    #[serde(default)]
    pub resource_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VaultOptions {
    pub collection: String,
}

#[derive(Debug, Serialize)]
pub struct SearchOptions {
    pub vault: VaultOptions,
    pub max_results: usize,
}

/// Body of a memory query. Always asks the provider for a generated
/// answer on top of the matching documents.
#[derive(Debug, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub sources: Vec<String>,
    pub options: SearchOptions,
    pub answer: bool,
    pub answer_model: String,
}

impl SearchRequest {
    pub fn emails(query: &str, max_results: usize) -> Self {
        Self {
            query: query.to_string(),
            sources: vec![String::from("vault")],
            options: SearchOptions {
                vault: VaultOptions {
                    collection: EMAIL_COLLECTION.to_string(),
                },
                max_results,
            },
            answer: true,
            answer_model: ANSWER_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub documents: Vec<Value>,
}
