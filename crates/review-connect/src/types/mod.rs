//! Records exchanged with AnkiConnect.

mod card;
mod deck;
mod note;

pub use card::{CardAnswer, CardInfo, Ease};
pub use deck::DeckStats;
pub use note::{Note, NoteBuilder, NoteField};
