//! The append-only conversation log.
//!
//! All chat views read and write the same log; a thread is just a filtered
//! view of it. Records are never mutated or removed, only appended or
//! replaced wholesale by the import path.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tether_core::types::{MessageRecord, Timestamp};
use tracing::debug;

use crate::error::StoreError;

#[derive(Debug, Default)]
struct LogInner {
    records: Vec<MessageRecord>,
    /// Highest timestamp ever issued or loaded; the monotonic floor for
    /// the next append.
    last_stamp: Option<Timestamp>,
}

/// Authoritative append-only log of all messages across owners, tags, and
/// correspondents.
///
/// Mutations are serialized through an interior mutex so that append order
/// stays chronological even when the log is shared across callers. Appends
/// stamp records with the current wall clock, clamped to never run backwards
/// within the process.
#[derive(Debug, Default)]
pub struct ConversationLog {
    inner: Mutex<LogInner>,
}

impl ConversationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LogInner> {
        // Every mutation leaves the log in a valid state (append is a single
        // push, replace is a staged swap), so a poisoned lock is still safe
        // to recover.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a record, assigning its timestamp at this moment.
    ///
    /// The assigned timestamp is `now()` clamped to the highest timestamp
    /// already issued, keeping append order equal to chronological order.
    /// Returns the record as stored.
    pub fn append(&self, mut record: MessageRecord) -> MessageRecord {
        let mut inner = self.lock();
        let mut stamp = Timestamp::now();
        if let Some(last) = inner.last_stamp {
            if stamp < last {
                stamp = last;
            }
        }
        record.timestamp = stamp;
        inner.last_stamp = Some(stamp);
        inner.records.push(record.clone());
        debug!(
            owner = %record.owner,
            correspondent = %record.correspondent,
            len = inner.records.len(),
            "Record appended"
        );
        record
    }

    /// All records for one thread, in append order.
    pub fn query(&self, owner: &str, correspondent: &str) -> Vec<MessageRecord> {
        self.lock()
            .records
            .iter()
            .filter(|r| r.owner == owner && r.correspondent == correspondent)
            .cloned()
            .collect()
    }

    /// Discard the current log and load a bulk sequence in its place.
    ///
    /// Every incoming record is validated first; on any failure the prior
    /// log is left exactly as it was. On success, the monotonic floor for
    /// future appends resumes from the highest loaded timestamp.
    pub fn replace_all(&self, records: Vec<MessageRecord>) -> Result<(), StoreError> {
        for (idx, record) in records.iter().enumerate() {
            record
                .validate()
                .map_err(|e| StoreError::SchemaMismatch(format!("record {}: {e}", idx + 1)))?;
        }
        let last_stamp = records.iter().map(|r| r.timestamp).max();
        let mut inner = self.lock();
        debug!(
            dropped = inner.records.len(),
            loaded = records.len(),
            "Log replaced"
        );
        inner.records = records;
        inner.last_stamp = last_stamp;
        Ok(())
    }

    /// Snapshot of every record, in append order (for export).
    pub fn records(&self) -> Vec<MessageRecord> {
        self.lock().records.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(owner: &str, correspondent: &str, message: &str, sender: &str) -> MessageRecord {
        MessageRecord::new(
            owner,
            correspondent,
            "family",
            "",
            Timestamp::now(),
            message,
            sender,
        )
        .unwrap()
    }

    #[test]
    fn test_append_grows_by_one() {
        let log = ConversationLog::new();
        assert!(log.is_empty());
        log.append(record("Alice", "Bob", "hi", "Alice"));
        assert_eq!(log.len(), 1);
        log.append(record("Alice", "Bob", "hello", "Bob"));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_query_filters_on_both_fields() {
        let log = ConversationLog::new();
        log.append(record("Alice", "Bob", "to bob", "Alice"));
        log.append(record("Alice", "Carol", "to carol", "Alice"));
        log.append(record("Dave", "Bob", "dave to bob", "Dave"));

        let thread = log.query("Alice", "Bob");
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].message, "to bob");
        assert!(log.query("Alice", "Eve").is_empty());
    }

    #[test]
    fn test_query_is_prefix_extended_by_append() {
        let log = ConversationLog::new();
        let mut previous = Vec::new();
        for i in 0..5 {
            log.append(record("Alice", "Bob", &format!("msg {i}"), "Alice"));
            let current = log.query("Alice", "Bob");
            assert_eq!(&current[..previous.len()], &previous[..]);
            assert_eq!(current.len(), previous.len() + 1);
            previous = current;
        }
    }

    #[test]
    fn test_timestamps_are_monotonic_non_decreasing() {
        let log = ConversationLog::new();
        for _ in 0..10 {
            log.append(record("Alice", "Bob", "x", "Alice"));
        }
        let thread = log.query("Alice", "Bob");
        for pair in thread.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[test]
    fn test_append_clamps_to_loaded_future_timestamp() {
        let log = ConversationLog::new();
        let future = Timestamp::parse("2099-01-01 00:00:00").unwrap();
        let loaded = MessageRecord::new("Alice", "Bob", "family", "", future, "hi", "Bob").unwrap();
        log.replace_all(vec![loaded]).unwrap();

        let stored = log.append(record("Alice", "Bob", "reply", "Alice"));
        assert!(stored.timestamp >= future);
    }

    #[test]
    fn test_replace_all_swaps_the_log() {
        let log = ConversationLog::new();
        log.append(record("Alice", "Bob", "old", "Alice"));

        let loaded = vec![
            record("Alice", "Carol", "new 1", "Alice"),
            record("Alice", "Carol", "new 2", "Carol"),
        ];
        log.replace_all(loaded).unwrap();

        assert_eq!(log.len(), 2);
        assert!(log.query("Alice", "Bob").is_empty());
        assert_eq!(log.query("Alice", "Carol").len(), 2);
    }

    #[test]
    fn test_replace_all_is_atomic_on_invalid_record() {
        let log = ConversationLog::new();
        log.append(record("Alice", "Bob", "keep me", "Alice"));

        let mut bad = record("Alice", "Carol", "x", "Alice");
        bad.sender = "Mallory".to_string();
        let err = log
            .replace_all(vec![record("Alice", "Carol", "ok", "Alice"), bad])
            .unwrap_err();
        assert!(matches!(err, StoreError::SchemaMismatch(_)));

        // Prior log untouched.
        assert_eq!(log.len(), 1);
        assert_eq!(log.query("Alice", "Bob")[0].message, "keep me");
    }

    #[test]
    fn test_records_snapshot_preserves_order() {
        let log = ConversationLog::new();
        log.append(record("Alice", "Bob", "first", "Alice"));
        log.append(record("Alice", "Bob", "second", "Bob"));
        let all = log.records();
        assert_eq!(all[0].message, "first");
        assert_eq!(all[1].message, "second");
    }
}
