//! Explicitly owned session state.
//!
//! The current user, the conversation log, and the in-progress message live
//! in one [`Session`] owned by the caller and passed by reference to
//! handlers. No ambient globals.

use tether_core::emoji::EmojiCatalog;
use tether_core::types::{Contact, MessageRecord, Timestamp};
use tracing::info;
use uuid::Uuid;

use crate::directory::ContactDirectory;
use crate::error::StoreError;
use crate::log::ConversationLog;

// =============================================================================
// MessageDraft
// =============================================================================

/// The message currently being composed.
///
/// Emoji picks append to the draft; sending takes and clears it.
#[derive(Debug, Clone, Default)]
pub struct MessageDraft {
    text: String,
}

impl MessageDraft {
    pub fn append_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Append the unicode for a named emoji. Returns `false` when the name
    /// is not in the catalog, leaving the draft unchanged.
    pub fn append_emoji(&mut self, catalog: &EmojiCatalog, name: &str) -> bool {
        match catalog.lookup(name) {
            Some(emoji) => {
                self.text.push_str(emoji);
                true
            }
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Take the composed text, leaving the draft empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

// =============================================================================
// Session
// =============================================================================

/// One logical login of an owner (the MND patient).
///
/// Holds the conversation log, the contact directory, and the current draft.
/// Lives for the duration of the session; the log is only ever appended to,
/// or replaced wholesale by a history import.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    owner: String,
    log: ConversationLog,
    directory: ContactDirectory,
    draft: MessageDraft,
}

impl Session {
    /// Start a session for the given owner. The login gate: blank owner
    /// names are rejected.
    pub fn new(owner: impl Into<String>) -> Result<Self, StoreError> {
        let owner = owner.into();
        if owner.trim().is_empty() {
            return Err(StoreError::EmptyOwner);
        }
        let session = Self {
            id: Uuid::new_v4(),
            owner,
            log: ConversationLog::new(),
            directory: ContactDirectory::new(),
            draft: MessageDraft::default(),
        };
        info!(id = %session.id, owner = %session.owner, "Session started");
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn draft_mut(&mut self) -> &mut MessageDraft {
        &mut self.draft
    }

    /// Contacts the owner can chat with under a tag.
    pub fn contacts(&self, tag: &str) -> Vec<Contact> {
        self.directory.list_contacts(&self.owner, tag)
    }

    /// Add a contact for this session. Writes no message record.
    pub fn add_contact(
        &mut self,
        name: &str,
        subtag: &str,
        tag: &str,
    ) -> Result<Contact, StoreError> {
        self.directory.add_contact(&self.owner, name, subtag, tag)
    }

    /// Append one message to the thread with `correspondent`.
    ///
    /// Sending is gated on non-empty content. The subtag is resolved from
    /// the directory (explicit addition first, then earliest record, else
    /// "unknown"); the sender must be the owner or the correspondent, which
    /// record validation enforces.
    pub fn send_message(
        &mut self,
        correspondent: &str,
        tag: &str,
        sender: &str,
        text: &str,
    ) -> Result<MessageRecord, StoreError> {
        if text.trim().is_empty() {
            return Err(StoreError::EmptyMessage);
        }
        let subtag = self.directory.resolve_subtag(&self.owner, tag, correspondent);
        let record = MessageRecord::new(
            &self.owner,
            correspondent,
            tag,
            subtag,
            Timestamp::now(),
            text,
            sender,
        )?;
        let stored = self.log.append(record);
        self.directory.observe(&stored);
        Ok(stored)
    }

    /// Send the current draft, clearing it on success.
    pub fn send_draft(
        &mut self,
        correspondent: &str,
        tag: &str,
        sender: &str,
    ) -> Result<MessageRecord, StoreError> {
        if self.draft.is_empty() {
            return Err(StoreError::EmptyMessage);
        }
        let text = self.draft.as_str().to_string();
        let stored = self.send_message(correspondent, tag, sender, &text)?;
        self.draft.take();
        Ok(stored)
    }

    /// The thread between the owner and one correspondent, in append order.
    pub fn thread(&self, correspondent: &str) -> Vec<MessageRecord> {
        self.log.query(&self.owner, correspondent)
    }

    /// Replace the log with an imported CSV history and rebuild the contact
    /// index from it. Failure leaves both untouched.
    pub fn import_history(&mut self, bytes: &[u8]) -> Result<usize, StoreError> {
        let records = tether_transfer::import(bytes)?;
        let count = records.len();
        self.log.replace_all(records)?;
        self.directory.rebuild(&self.log.records());
        info!(records = count, "History imported into session");
        Ok(count)
    }

    /// Export the full log as CSV bytes.
    pub fn export_history(&self) -> Result<Vec<u8>, StoreError> {
        Ok(tether_transfer::export(&self.log.records())?)
    }
}
