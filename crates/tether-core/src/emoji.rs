//! Named emoji catalog for message composition.
//!
//! Chat views offer a picker over emoji names; the selected name resolves to
//! its unicode string, which is appended to the message being drafted. The
//! catalog ships a small built-in set and can be replaced wholesale from a
//! JSON file mapping names to unicode strings.

use std::collections::BTreeMap;

use crate::error::Result;

/// Ordered name-to-unicode emoji map.
#[derive(Debug, Clone)]
pub struct EmojiCatalog {
    entries: BTreeMap<String, String>,
}

impl EmojiCatalog {
    /// The built-in set used when no catalog file is supplied.
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        for (name, emoji) in [
            ("grinning", "\u{1F600}"),
            ("heart", "\u{2764}\u{FE0F}"),
            ("thumbs_up", "\u{1F44D}"),
            ("smiling_face_with_tear", "\u{1F972}"),
            ("folded_hands", "\u{1F64F}"),
            ("star", "\u{2B50}"),
            ("party_popper", "\u{1F389}"),
            ("crying", "\u{1F622}"),
        ] {
            entries.insert(name.to_string(), emoji.to_string());
        }
        Self { entries }
    }

    /// Load a catalog from JSON bytes shaped `{"name": "unicode", ...}`.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let entries: BTreeMap<String, String> = serde_json::from_slice(bytes)?;
        Ok(Self { entries })
    }

    /// Resolve an emoji name to its unicode string.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// All names in picker order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for EmojiCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let catalog = EmojiCatalog::builtin();
        assert_eq!(catalog.lookup("thumbs_up"), Some("\u{1F44D}"));
        assert_eq!(catalog.lookup("no_such_emoji"), None);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_names_are_ordered() {
        let catalog = EmojiCatalog::builtin();
        let names = catalog.names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"wave": "👋", "ok": "👌"}"#.as_bytes();
        let catalog = EmojiCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.lookup("wave"), Some("\u{1F44B}"));
    }

    #[test]
    fn test_from_json_rejects_wrong_shape() {
        let json = br#"["not", "a", "map"]"#;
        assert!(EmojiCatalog::from_json(json).is_err());
    }
}
