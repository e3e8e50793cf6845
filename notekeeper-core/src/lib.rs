//! Core library for Notekeeper, a client for a session-scoped notes service.
//!
//! The primary entry point is [`NoteManager`], which mirrors the logged-in
//! user's notes locally and mediates every create, edit and delete. It talks
//! to the service through the [`NotesApi`] trait, implemented over HTTP by
//! [`ApiClient`]; the same client performs login and holds the session.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    api::NotesApi,
    auth::{AuthContext, Credentials, User},
    client::{ApiClient, ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT},
    contact::ContactMessage,
    draft::{Mode, NoteDraft},
    error::{NotekeeperError, Result},
    manager::{
        DeleteOutcome, LoadOutcome, LoadTicket, ManagerOptions, NoteManager, SubmitOutcome,
        Visibility,
    },
    note::{join_tags, split_tags, today, Note, NoteId, NotePayload, TagSplit},
};
