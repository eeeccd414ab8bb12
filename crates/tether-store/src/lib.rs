//! Conversation log store, contact directory, and session objects.
//!
//! The authoritative state of the chat application: an append-only log of
//! [`tether_core::types::MessageRecord`]s shared by every chat view, an
//! incrementally maintained contact index partitioned by relationship tag,
//! and an explicitly owned [`Session`] holding the per-login state.

pub mod directory;
pub mod error;
pub mod log;
pub mod session;

pub use directory::ContactDirectory;
pub use error::StoreError;
pub use log::ConversationLog;
pub use session::{MessageDraft, Session};
