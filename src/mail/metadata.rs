//! Metadata envelope embedded in email bodies.
//!
//! Outgoing mail carries a block of pretty-printed JSON between two
//! sentinel lines so the receiving side (and any LLM reading the
//! mail) can recover who sent it, from where, and what they are into:
//!
//! ```text
//! hello
//!
//! --- PLAIPIN METADATA ---
//! {
//!   "deviceId": "plaipin_742",
//!   ...
//! }
//! ---
//!
//! This message was sent from Plaipin, an AI companion platform.
//! ```
//!
//! The block is parsed back out of arbitrary text, so the markers are
//! a wire format and must not change.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const METADATA_MARKER: &str = "PLAIPIN METADATA";
const FENCE: &str = "---";
pub const EMAIL_FOOTER: &str = "This message was sent from Plaipin, an AI companion platform.";

/// Every field is optional and read leniently: a field with an
/// unexpected type is dropped on its own instead of failing the block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMetadata {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_topics", skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Topics must be an array. Non-string entries are skipped.
fn lenient_topics<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let topics = match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(topic) => Some(topic),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    };
    Ok(topics)
}

impl EmailMetadata {
    /// The fixed envelope attached to every message sent from the demo.
    pub fn demo() -> Self {
        Self {
            user_id: Some(String::from("user_demo_123")),
            device_id: Some(String::from("plaipin_742")),
            device_name: Some(String::from("Plaipin #742")),
            latitude: Some(37.7749),
            longitude: Some(-122.4194),
            topics: Some(vec![
                String::from("robots"),
                String::from("raves"),
                String::from("hiking"),
            ]),
            location_name: Some(String::from("Blue Bottle Coffee, SF")),
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Append the metadata block and footer to `text`.
pub fn encode(text: &str, metadata: &EmailMetadata) -> String {
    // Serializing a struct of strings and numbers can't fail but fall
    // back to an empty object rather than panic.
    let json = serde_json::to_string_pretty(metadata).unwrap_or_else(|_| String::from("{}"));
    format!("{text}\n\n{FENCE} {METADATA_MARKER} {FENCE}\n{json}\n{FENCE}\n\n{EMAIL_FOOTER}")
}

/// Extract the metadata block from `text`. Returns an empty envelope
/// when there is no block or its contents don't parse.
pub fn decode(text: &str) -> EmailMetadata {
    let Some(raw) = find_block(text) else {
        return EmailMetadata::default();
    };

    match serde_json::from_str(raw) {
        Ok(metadata) => metadata,
        Err(e) => {
            tracing::warn!("Failed to parse metadata block: {}", e);
            EmailMetadata::default()
        }
    }
}

/// Locate the JSON object between `--- PLAIPIN METADATA ---` and the
/// closing `---`. Whitespace around each marker is optional. The
/// object ends at the first `}` followed by the closing fence, and
/// the first complete block in the text wins.
fn find_block(text: &str) -> Option<&str> {
    for (idx, _) in text.match_indices(METADATA_MARKER) {
        if !text[..idx].trim_end().ends_with(FENCE) {
            continue;
        }

        let Some(after_header) = text[idx + METADATA_MARKER.len()..]
            .trim_start()
            .strip_prefix(FENCE)
        else {
            continue;
        };

        let body = after_header.trim_start();
        if !body.starts_with('{') {
            continue;
        }

        let closing = body
            .match_indices('}')
            .map(|(end, _)| end)
            .find(|end| body[end + 1..].trim_start().starts_with(FENCE));

        if let Some(end) = closing {
            return Some(&body[..=end]);
        }
    }
    None
}
