pub mod agentmail;
pub mod api;
pub mod cli;
pub mod core;
pub mod hyperspell;
pub mod mail;
