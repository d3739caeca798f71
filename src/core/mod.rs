mod config;
pub mod db;

pub use config::{AppConfig, DEFAULT_AGENTMAIL_API_URL, DEFAULT_HYPERSPELL_API_URL};
