//! Contact directory: who can an owner chat with under a given tag?
//!
//! Maintains an explicit index keyed by `(owner, tag)` that is updated
//! incrementally as records are appended and contacts are added, instead of
//! rescanning the whole log on every render. Two ordered lists exist per
//! scope: contacts inferred from history (first record for a correspondent
//! wins, so the inferred subtag comes from the earliest matching record) and
//! contacts added explicitly during this session.

use std::collections::HashMap;

use tether_core::types::{Contact, MessageRecord, ValidationError, UNKNOWN_SUBTAG};
use tracing::debug;

use crate::error::StoreError;

type ScopeKey = (String, String);

fn key(owner: &str, tag: &str) -> ScopeKey {
    (owner.to_string(), tag.to_string())
}

/// Session-scoped contact index.
#[derive(Debug, Default)]
pub struct ContactDirectory {
    /// Contacts derived from log history, in first-appearance order.
    inferred: HashMap<ScopeKey, Vec<Contact>>,
    /// Contacts added explicitly this session, in addition order.
    added: HashMap<ScopeKey, Vec<Contact>>,
}

impl ContactDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the correspondent of a freshly appended record.
    ///
    /// The first record observed for a correspondent fixes the inferred
    /// subtag; later records never change it.
    pub fn observe(&mut self, record: &MessageRecord) {
        let contacts = self
            .inferred
            .entry(key(&record.owner, &record.tag))
            .or_default();
        if !contacts.iter().any(|c| c.name == record.correspondent) {
            contacts.push(Contact::new(
                record.correspondent.clone(),
                record.subtag.clone(),
                record.tag.clone(),
            ));
        }
    }

    /// Add a contact explicitly for this session.
    ///
    /// Fails with [`StoreError::DuplicateContact`] if the name is already
    /// visible in [`ContactDirectory::list_contacts`] for the scope. Writes
    /// no message record: a contact with zero messages exists only in memory
    /// until a message is sent.
    pub fn add_contact(
        &mut self,
        owner: &str,
        name: &str,
        subtag: &str,
        tag: &str,
    ) -> Result<Contact, StoreError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "name" }.into());
        }
        if self
            .list_contacts(owner, tag)
            .iter()
            .any(|c| c.name == name)
        {
            return Err(StoreError::DuplicateContact(name.to_string()));
        }
        let contact = Contact::new(name, subtag, tag);
        self.added
            .entry(key(owner, tag))
            .or_default()
            .push(contact.clone());
        debug!(owner, name, tag, "Contact added");
        Ok(contact)
    }

    /// Ordered contact list for one `(owner, tag)` scope.
    ///
    /// History-derived contacts come first, then explicit additions not
    /// already present. Where a name exists in both, it appears once and the
    /// explicit addition's subtag takes precedence.
    pub fn list_contacts(&self, owner: &str, tag: &str) -> Vec<Contact> {
        let scope = key(owner, tag);
        let inferred = self.inferred.get(&scope).map(Vec::as_slice).unwrap_or(&[]);
        let added = self.added.get(&scope).map(Vec::as_slice).unwrap_or(&[]);

        let mut contacts: Vec<Contact> = inferred
            .iter()
            .map(|c| match added.iter().find(|a| a.name == c.name) {
                Some(explicit) => explicit.clone(),
                None => c.clone(),
            })
            .collect();
        for contact in added {
            if !contacts.iter().any(|c| c.name == contact.name) {
                contacts.push(contact.clone());
            }
        }
        contacts
    }

    /// Subtag for a correspondent: explicit addition first, then the
    /// earliest matching record, else `"unknown"`.
    pub fn resolve_subtag(&self, owner: &str, tag: &str, correspondent: &str) -> String {
        let scope = key(owner, tag);
        if let Some(contact) = self
            .added
            .get(&scope)
            .and_then(|v| v.iter().find(|c| c.name == correspondent))
        {
            return contact.subtag.clone();
        }
        if let Some(contact) = self
            .inferred
            .get(&scope)
            .and_then(|v| v.iter().find(|c| c.name == correspondent))
        {
            return contact.subtag.clone();
        }
        UNKNOWN_SUBTAG.to_string()
    }

    /// Drop all inferred state and replay a record sequence in order.
    ///
    /// Used after a bulk import. Explicit session additions survive.
    pub fn rebuild(&mut self, records: &[MessageRecord]) {
        self.inferred.clear();
        for record in records {
            self.observe(record);
        }
        debug!(records = records.len(), "Contact index rebuilt");
    }
}
