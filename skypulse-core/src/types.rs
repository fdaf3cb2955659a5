use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// The social channel a review was collected from.
///
/// Serialized lowercase (`"twitter"`); rendered uppercase (`TWITTER`) inside
/// analysis payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Twitter,
    Google,
    Yelp,
    Reddit,
    Facebook,
    Linkedin,
}

impl Source {
    /// Lowercase channel tag, as shown in the feed panel.
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Twitter => "twitter",
            Source::Google => "google",
            Source::Yelp => "yelp",
            Source::Reddit => "reddit",
            Source::Facebook => "facebook",
            Source::Linkedin => "linkedin",
        }
    }

    /// Uppercase tag used in the `[SOURCE] text` payload lines.
    pub fn tag(self) -> &'static str {
        match self {
            Source::Twitter => "TWITTER",
            Source::Google => "GOOGLE",
            Source::Yelp => "YELP",
            Source::Reddit => "REDDIT",
            Source::Facebook => "FACEBOOK",
            Source::Linkedin => "LINKEDIN",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One review pulled from a social channel.
///
/// Immutable once created. Entries leave the [`crate::log::ReviewLog`] only
/// through capacity trimming, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewEntry {
    pub id: String,           // UUID v4 text
    pub text: String,
    pub source: Source,
    pub timestamp: DateTime<Local>,
}

impl ReviewEntry {
    /// Stamps a new entry with a fresh UUID and the given timestamp.
    pub fn new(text: impl Into<String>, source: Source, timestamp: DateTime<Local>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.into(),
            source,
            timestamp,
        }
    }

    /// Formats the entry as one analysis payload line: `[SOURCE] text`.
    pub fn payload_line(&self) -> String {
        format!("[{}] {}", self.source.tag(), self.text)
    }
}

/// A canned `(text, source)` pair from a brand's mock feed catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CannedReview {
    pub text: &'static str,
    pub source: Source,
}

/// Who authored a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
    /// Reasoning trace; displayed but never sent back as history.
    Thought,
}

/// A single chat turn. Chat buffers are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: ChatRole::User, text: text.into() }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self { role: ChatRole::Model, text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_line_uses_uppercase_tag() {
        let entry = ReviewEntry::new("Lounge was great", Source::Google, Local::now());
        assert_eq!(entry.payload_line(), "[GOOGLE] Lounge was great");
    }

    #[test]
    fn entries_get_distinct_ids() {
        let now = Local::now();
        let a = ReviewEntry::new("x", Source::Yelp, now);
        let b = ReviewEntry::new("x", Source::Yelp, now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn source_serializes_lowercase() {
        let json = serde_json::to_string(&Source::Linkedin).unwrap();
        assert_eq!(json, "\"linkedin\"");
    }
}
