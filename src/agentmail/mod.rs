mod client;
pub mod models;

pub use client::{AgentMailClient, MailboxProvider};
pub use models::*;
