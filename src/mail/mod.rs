//! Email pipeline: metadata envelope, cross-inbox views and the
//! narratives written to the memory store.
pub mod inbox;
pub mod metadata;
pub mod narrative;

pub use inbox::{
    ConversationSummary, NormalizedEmail, ingest_email, ingest_emails, list_conversations,
    list_emails,
};
pub use metadata::EmailMetadata;
