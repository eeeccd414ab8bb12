use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Subtag assigned to a correspondent whose relationship sub-category could
/// not be determined from an explicit addition or prior history.
pub const UNKNOWN_SUBTAG: &str = "unknown";

/// Wall-clock format used everywhere a timestamp crosses a boundary
/// (CSV rows, thread rendering).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Validation
// =============================================================================

/// Errors raised when a record violates the schema contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("field `{field}` must not be empty")]
    EmptyField { field: &'static str },

    #[error("sender `{sender}` is neither the owner `{owner}` nor the correspondent `{correspondent}`")]
    UnknownSender {
        sender: String,
        owner: String,
        correspondent: String,
    },
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

// =============================================================================
// Timestamp
// =============================================================================

/// A point in time with second precision.
///
/// Compared by value; append order over monotonically issued timestamps is
/// chronological order. Serialized as `YYYY-MM-DD HH:MM:SS` so CSV rows and
/// JSON payloads carry the same representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub NaiveDateTime);

impl Timestamp {
    /// The current local time, truncated to whole seconds.
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        Self(now.with_nanosecond(0).unwrap_or(now))
    }

    /// Parse a `YYYY-MM-DD HH:MM:SS` string.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map(Self)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Timestamp::parse(&s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// MessageRecord
// =============================================================================

/// One logged chat message.
///
/// The `(owner, correspondent, tag)` triple determines which conversation
/// thread the record belongs to; `subtag` is informational. Construct through
/// [`MessageRecord::new`] so the schema contract holds; bulk loaders that
/// obtain records structurally (serde) must re-check with
/// [`MessageRecord::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// The primary user the thread is anchored on (the MND patient).
    pub owner: String,
    /// The other party in the conversation.
    pub correspondent: String,
    /// Relationship category, e.g. "family" or "schoolmate".
    pub tag: String,
    /// Relationship sub-category, e.g. "wife". May be empty or "unknown".
    pub subtag: String,
    /// Assigned at append time; monotonic non-decreasing within a process.
    pub timestamp: Timestamp,
    /// Free-form message text.
    pub message: String,
    /// Who wrote the message. Must equal `owner` or `correspondent`.
    pub sender: String,
}

impl MessageRecord {
    /// Build a validated record.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        owner: impl Into<String>,
        correspondent: impl Into<String>,
        tag: impl Into<String>,
        subtag: impl Into<String>,
        timestamp: Timestamp,
        message: impl Into<String>,
        sender: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let record = Self {
            owner: owner.into(),
            correspondent: correspondent.into(),
            tag: tag.into(),
            subtag: subtag.into(),
            timestamp,
            message: message.into(),
            sender: sender.into(),
        };
        record.validate()?;
        Ok(record)
    }

    /// Re-check the schema contract on an existing record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if is_blank(&self.owner) {
            return Err(ValidationError::EmptyField { field: "owner" });
        }
        if is_blank(&self.correspondent) {
            return Err(ValidationError::EmptyField {
                field: "correspondent",
            });
        }
        if is_blank(&self.tag) {
            return Err(ValidationError::EmptyField { field: "tag" });
        }
        if is_blank(&self.sender) {
            return Err(ValidationError::EmptyField { field: "sender" });
        }
        if self.sender != self.owner && self.sender != self.correspondent {
            return Err(ValidationError::UnknownSender {
                sender: self.sender.clone(),
                owner: self.owner.clone(),
                correspondent: self.correspondent.clone(),
            });
        }
        Ok(())
    }

    /// Whether the owner wrote this message (vs the correspondent).
    pub fn sent_by_owner(&self) -> bool {
        self.sender == self.owner
    }
}

// =============================================================================
// Contact
// =============================================================================

/// A known correspondent, unique by name within an `(owner, tag)` scope.
///
/// The subtag is fixed at creation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub subtag: String,
    pub tag: String,
}

impl Contact {
    pub fn new(
        name: impl Into<String>,
        subtag: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            subtag: subtag.into(),
            tag: tag.into(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    #[test]
    fn test_timestamp_display_format() {
        let t = ts("2024-03-01 09:30:00");
        assert_eq!(t.to_string(), "2024-03-01 09:30:00");
    }

    #[test]
    fn test_timestamp_parse_rejects_other_shapes() {
        assert!(Timestamp::parse("2024-03-01T09:30:00").is_err());
        assert!(Timestamp::parse("not a time").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn test_timestamp_ordering() {
        let a = ts("2024-03-01 09:30:00");
        let b = ts("2024-03-01 09:30:01");
        assert!(a < b);
        assert_eq!(a, ts("2024-03-01 09:30:00"));
    }

    #[test]
    fn test_timestamp_now_has_second_precision() {
        let t = Timestamp::now();
        assert_eq!(t.0.nanosecond(), 0);
    }

    #[test]
    fn test_timestamp_serde_round_trip() {
        let t = ts("2024-03-01 09:30:00");
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"2024-03-01 09:30:00\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_record_new_valid() {
        let r = MessageRecord::new(
            "Alice",
            "Bob",
            "family",
            "brother",
            ts("2024-03-01 09:30:00"),
            "hi",
            "Alice",
        )
        .unwrap();
        assert!(r.sent_by_owner());
        assert_eq!(r.subtag, "brother");
    }

    #[test]
    fn test_record_rejects_empty_fields() {
        let stamp = ts("2024-03-01 09:30:00");
        let err = MessageRecord::new("", "Bob", "family", "", stamp, "hi", "Bob").unwrap_err();
        assert_eq!(err, ValidationError::EmptyField { field: "owner" });

        let err = MessageRecord::new("Alice", "  ", "family", "", stamp, "hi", "Alice").unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyField {
                field: "correspondent"
            }
        );

        let err = MessageRecord::new("Alice", "Bob", "", "", stamp, "hi", "Alice").unwrap_err();
        assert_eq!(err, ValidationError::EmptyField { field: "tag" });

        let err = MessageRecord::new("Alice", "Bob", "family", "", stamp, "hi", "").unwrap_err();
        assert_eq!(err, ValidationError::EmptyField { field: "sender" });
    }

    #[test]
    fn test_record_rejects_unknown_sender() {
        let err = MessageRecord::new(
            "Alice",
            "Bob",
            "family",
            "",
            ts("2024-03-01 09:30:00"),
            "hi",
            "Carol",
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownSender { .. }));
        assert!(err.to_string().contains("Carol"));
    }

    #[test]
    fn test_record_allows_empty_subtag_and_message() {
        // The send gate on empty content lives in the session, not the schema.
        let r = MessageRecord::new(
            "Alice",
            "Bob",
            "family",
            "",
            ts("2024-03-01 09:30:00"),
            "",
            "Bob",
        );
        assert!(r.is_ok());
    }

    #[test]
    fn test_record_validate_catches_structural_rows() {
        // A record deserialized from external data can bypass `new`.
        let mut r = MessageRecord::new(
            "Alice",
            "Bob",
            "family",
            "",
            ts("2024-03-01 09:30:00"),
            "hi",
            "Bob",
        )
        .unwrap();
        r.sender = "Mallory".to_string();
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_record_serde_round_trip() {
        let r = MessageRecord::new(
            "Alice",
            "Bob",
            "family",
            "brother",
            ts("2024-03-01 09:30:00"),
            "hello, Bob",
            "Alice",
        )
        .unwrap();
        let json = serde_json::to_string(&r).unwrap();
        let back: MessageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn test_contact_new() {
        let c = Contact::new("Bob", "brother", "family");
        assert_eq!(c.name, "Bob");
        assert_eq!(c.subtag, "brother");
        assert_eq!(c.tag, "family");
    }
}
