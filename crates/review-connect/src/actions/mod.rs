//! Action groups, one per AnkiConnect domain.

mod cards;
mod decks;
mod notes;

pub use cards::CardActions;
pub use decks::DeckActions;
pub use notes::NoteActions;
