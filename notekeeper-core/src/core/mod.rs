//! Internal domain modules for the Notekeeper core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod api;
pub mod auth;
pub mod client;
pub mod contact;
pub mod draft;
pub mod error;
pub mod manager;
pub mod note;

#[doc(inline)]
pub use api::NotesApi;
#[doc(inline)]
pub use auth::{AuthContext, Credentials, User};
#[doc(inline)]
pub use client::{ApiClient, ClientConfig};
#[doc(inline)]
pub use contact::ContactMessage;
#[doc(inline)]
pub use draft::{Mode, NoteDraft};
#[doc(inline)]
pub use error::{NotekeeperError, Result};
#[doc(inline)]
pub use manager::{ManagerOptions, NoteManager};
#[doc(inline)]
pub use note::{Note, NoteId, NotePayload, TagSplit};
