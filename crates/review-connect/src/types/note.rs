//! Notes and note fields.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A note to create with `addNote`.
///
/// Field values are HTML and field names must match the note type exactly.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub deck_name: String,
    pub model_name: String,
    pub fields: HashMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A field value as embedded in card and note records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteField {
    pub value: String,
    pub order: i32,
}

/// Builds a [`Note`] field by field.
///
/// ```
/// use review_connect::NoteBuilder;
///
/// let note = NoteBuilder::new("Default", "Basic")
///     .field("Front", "capital of Peru")
///     .field("Back", "Lima")
///     .tag("geography")
///     .build();
///
/// assert_eq!(note.fields["Back"], "Lima");
/// ```
#[derive(Debug, Clone)]
pub struct NoteBuilder {
    note: Note,
}

impl NoteBuilder {
    pub fn new(deck: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            note: Note {
                deck_name: deck.into(),
                model_name: model.into(),
                fields: HashMap::new(),
                tags: Vec::new(),
            },
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.note.fields.insert(name.into(), value.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.note.tags.push(tag.into());
        self
    }

    pub fn build(self) -> Note {
        self.note
    }
}
