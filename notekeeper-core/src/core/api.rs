//! The notes endpoints, as seen by [`NoteManager`](crate::NoteManager).

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::core::client::ApiClient;
use crate::{Note, NoteId, NotePayload, Result};

/// Remote note collection scoped to the current session.
///
/// [`ApiClient`] is the HTTP implementation; anything else implementing it
/// (an in-memory store, a recording double) can drive a `NoteManager`.
pub trait NotesApi {
    /// `GET /notes`, in server order.
    fn list_notes(&self) -> Result<Vec<Note>>;

    /// `POST /notes`; returns the id the server assigned.
    fn create_note(&self, payload: &NotePayload) -> Result<NoteId>;

    /// `PUT /notes/{id}`.
    fn update_note(&self, id: NoteId, payload: &NotePayload) -> Result<()>;

    /// `DELETE /notes/{id}`.
    fn delete_note(&self, id: NoteId) -> Result<()>;
}

impl<T: NotesApi + ?Sized> NotesApi for &T {
    fn list_notes(&self) -> Result<Vec<Note>> {
        (**self).list_notes()
    }

    fn create_note(&self, payload: &NotePayload) -> Result<NoteId> {
        (**self).create_note(payload)
    }

    fn update_note(&self, id: NoteId, payload: &NotePayload) -> Result<()> {
        (**self).update_note(id, payload)
    }

    fn delete_note(&self, id: NoteId) -> Result<()> {
        (**self).delete_note(id)
    }
}

impl NotesApi for ApiClient {
    fn list_notes(&self) -> Result<Vec<Note>> {
        debug!("GET /notes");
        // The service answers `null` for a user with no notes.
        let notes: Option<Vec<Note>> = self.execute_json(self.get("notes"))?;
        Ok(notes.unwrap_or_default())
    }

    fn create_note(&self, payload: &NotePayload) -> Result<NoteId> {
        debug!("POST /notes title={:?}", payload.title);
        let body: Value = self.execute_json(self.post("notes").json(payload))?;
        created_id(body)
    }

    fn update_note(&self, id: NoteId, payload: &NotePayload) -> Result<()> {
        debug!("PUT /notes/{id}");
        self.execute(self.put(&format!("notes/{id}")).json(payload))?;
        Ok(())
    }

    fn delete_note(&self, id: NoteId) -> Result<()> {
        debug!("DELETE /notes/{id}");
        self.execute(self.delete(&format!("notes/{id}")))?;
        Ok(())
    }
}

#[derive(Deserialize)]
struct CreatedNote {
    id: NoteId,
}

/// Pulls the new id out of either `{"note": {"id": ..}}` or a bare note body.
fn created_id(body: Value) -> Result<NoteId> {
    let note = body
        .get("note")
        .filter(|n| n.is_object())
        .cloned()
        .unwrap_or(body);
    let created: CreatedNote = serde_json::from_value(note)?;
    Ok(created.id)
}
