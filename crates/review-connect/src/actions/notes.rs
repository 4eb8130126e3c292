//! Note actions.

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::Note;

/// Note actions, obtained via [`AnkiClient::notes()`].
#[derive(Debug)]
pub struct NoteActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct AddNoteParams<'a> {
    note: &'a Note,
}

impl<'a> NoteActions<'a> {
    /// Create a note and return its id.
    ///
    /// Anki rejects duplicates of an existing first field with
    /// "cannot create note because it is a duplicate".
    pub async fn add(&self, note: &Note) -> Result<i64> {
        self.client.invoke("addNote", AddNoteParams { note }).await
    }
}
