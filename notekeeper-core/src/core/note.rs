//! The note record and its tag handling.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned note identifier.
pub type NoteId = i64;

/// A single note as the service stores it.
///
/// A body without `content`, `tags` or `date` still decodes: content defaults
/// to empty, tags to empty (also when sent as `null`) and the date to today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "nullable_tags")]
    pub tags: Vec<String>,
    #[serde(default = "today")]
    pub date: NaiveDate,
}

/// The mutable part of a note, sent as the body of create and update requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotePayload {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub date: NaiveDate,
}

impl Note {
    /// Builds the cached record for a payload the server accepted under `id`.
    pub fn from_payload(id: NoteId, payload: NotePayload) -> Self {
        Self {
            id,
            title: payload.title,
            content: payload.content,
            tags: payload.tags,
            date: payload.date,
        }
    }

    /// Overwrites every field except `id`.
    pub fn apply(&mut self, payload: NotePayload) {
        self.title = payload.title;
        self.content = payload.content;
        self.tags = payload.tags;
        self.date = payload.date;
    }

    /// Case-insensitive substring match on title or content.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}

/// How empty tokens are treated when a comma-separated tag string is split.
///
/// ```rust
/// use notekeeper_core::{split_tags, TagSplit};
///
/// assert_eq!(split_tags("a, b ,c", TagSplit::Verbatim), vec!["a", "b", "c"]);
/// assert_eq!(split_tags("", TagSplit::Verbatim), vec![""]);
/// assert!(split_tags("", TagSplit::DropEmpty).is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TagSplit {
    /// Keep every token, including empty ones (`""` becomes `[""]`).
    #[default]
    Verbatim,
    /// Discard tokens that are empty after trimming.
    DropEmpty,
}

/// Splits `raw` on commas and trims each token, in the order typed.
pub fn split_tags(raw: &str, policy: TagSplit) -> Vec<String> {
    let tokens = raw.split(',').map(str::trim);
    match policy {
        TagSplit::Verbatim => tokens.map(str::to_string).collect(),
        TagSplit::DropEmpty => tokens
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Joins tags back into the comma string used while editing.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(",")
}

// The service stores tags in a nullable column.
fn nullable_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Today's date in UTC, the default date of a new note.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
