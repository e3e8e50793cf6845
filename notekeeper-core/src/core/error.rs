//! Error types for the Notekeeper core library.

use thiserror::Error;

use crate::NoteId;

/// All errors that can occur within the Notekeeper core library.
#[derive(Debug, Error)]
pub enum NotekeeperError {
    /// Notes were requested while the auth context is anonymous.
    #[error("Authentication required")]
    AuthRequired,

    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Request rejected with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    RemoteRejection {
        status: u16,
        /// The body's `message` or `error` field, verbatim.
        message: Option<String>,
    },

    /// A required field was empty or malformed.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A note ID was requested that is not in the local cache.
    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    /// A success body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O operation on the filesystem failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for NotekeeperError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return Self::Transport(format!("could not read response body: {e}"));
        }
        Self::Transport(e.to_string())
    }
}

/// Convenience alias that pins the error type to [`NotekeeperError`].
pub type Result<T> = std::result::Result<T, NotekeeperError>;

impl NotekeeperError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthRequired => "Please log in to view your notes.".to_string(),
            Self::Transport(_) => "Could not reach the server. Please try again later.".to_string(),
            Self::RemoteRejection { message: Some(msg), .. } => msg.clone(),
            Self::RemoteRejection { status, message: None } => {
                format!("The server rejected the request ({status}).")
            }
            Self::Validation(msg) => msg.clone(),
            Self::NoteNotFound(_) => "Note no longer exists".to_string(),
            Self::Json(e) => format!("Data format error: {e}"),
            Self::Io(e) => format!("File error: {e}"),
        }
    }

    /// True for a rejection carrying the given HTTP status.
    pub fn is_status(&self, code: u16) -> bool {
        matches!(self, Self::RemoteRejection { status, .. } if *status == code)
    }
}
