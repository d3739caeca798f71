mod client;
pub mod models;

pub use client::{HyperspellClient, MemoryStore};
pub use models::*;
