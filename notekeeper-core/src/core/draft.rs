//! Form state for a note being composed or edited.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::note::{join_tags, split_tags, today, Note, NoteId, NotePayload, TagSplit};
use crate::{NotekeeperError, Result};

/// Whether a submit creates a new note or updates an existing one.
///
/// ```rust
/// use notekeeper_core::Mode;
///
/// assert_eq!(Mode::default(), Mode::Create);
/// assert_eq!(Mode::Edit(4).target(), Some(4));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Create,
    Edit(NoteId),
}

impl Mode {
    /// The note an edit is addressed to, if any.
    ///
    /// [`NoteManager::delete`](crate::NoteManager::delete) uses this to reset
    /// the form when the note under edit goes away.
    pub fn target(self) -> Option<NoteId> {
        match self {
            Self::Create => None,
            Self::Edit(id) => Some(id),
        }
    }
}

/// A note-shaped record under active composition. `tags` stays a raw comma
/// string until the draft is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: String,
    pub date: NaiveDate,
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            tags: String::new(),
            date: today(),
        }
    }
}

impl NoteDraft {
    /// Copies a cached note into editable form.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            tags: join_tags(&note.tags),
            date: note.date,
        }
    }

    /// Checks the required fields and normalises tags into a request body.
    ///
    /// # Errors
    ///
    /// Returns [`NotekeeperError::Validation`] when `title` or `content` is blank.
    pub fn to_payload(&self, policy: TagSplit) -> Result<NotePayload> {
        if self.title.trim().is_empty() {
            return Err(NotekeeperError::Validation("Title is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(NotekeeperError::Validation("Content is required".to_string()));
        }
        Ok(NotePayload {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: split_tags(&self.tags, policy),
            date: self.date,
        })
    }
}
