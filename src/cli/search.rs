use anyhow::Result;
use serde_json::json;

use crate::core::AppConfig;
use crate::hyperspell::{HyperspellClient, MemoryStore, SearchRequest};

pub async fn run(config: &AppConfig, query: String, max_results: usize) -> Result<()> {
    let client = HyperspellClient::from_config(config)?;
    let response = client
        .search(&SearchRequest::emails(&query, max_results))
        .await?;
    println!(
        "{}",
        json!({
            "query": query,
            "answer": response.answer,
            "documents": response.documents.len(),
        })
    );
    Ok(())
}
