//! Public types for the search history API
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    pub id: String,
    pub query: String,
    pub answer: String,
    /// Documents returned with the answer, as JSON text
    pub documents: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<String>,
}

impl HistoryQuery {
    /// Requested page size. Anything that isn't a positive integer falls
    /// back to the default.
    pub fn limit(&self) -> usize {
        self.limit
            .as_deref()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: Option<&str>) -> HistoryQuery {
        HistoryQuery {
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn it_parses_limit() {
        assert_eq!(query(None).limit(), 100);
        assert_eq!(query(Some("5")).limit(), 5);
        assert_eq!(query(Some("abc")).limit(), 100);
        assert_eq!(query(Some("0")).limit(), 100);
        assert_eq!(query(Some("-3")).limit(), 100);
    }
}
