//! Card records and review answers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::NoteField;

/// One card as reported by `cardsInfo`.
///
/// `question` and `answer` are the rendered HTML of each side, including any
/// card template styling and `[sound:...]` tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    pub card_id: i64,
    #[serde(default, alias = "note")]
    pub note_id: i64,
    #[serde(default)]
    pub deck_name: String,
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub fields: HashMap<String, NoteField>,
    /// 0 = new, 1 = learning, 2 = review, 3 = relearning.
    #[serde(default, rename = "type")]
    pub card_type: i32,
    /// Negative values mean suspended or buried.
    #[serde(default)]
    pub queue: i32,
    /// Queue position for new cards, day number for review cards,
    /// epoch seconds for learning cards.
    #[serde(default)]
    pub due: i64,
    #[serde(default)]
    pub interval: i64,
    /// Scheduling multiplier, 2500 meaning 250%.
    #[serde(default, alias = "factor")]
    pub ease_factor: i64,
    #[serde(default)]
    pub reps: i64,
    #[serde(default)]
    pub lapses: i64,
}

/// Recall rating submitted when answering a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u8")]
#[repr(u8)]
pub enum Ease {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl From<Ease> for u8 {
    fn from(ease: Ease) -> u8 {
        ease as u8
    }
}

impl TryFrom<i64> for Ease {
    type Error = i64;

    /// Accepts the 1-4 scale AnkiConnect uses; anything else is handed back.
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Ease::Again),
            2 => Ok(Ease::Hard),
            3 => Ok(Ease::Good),
            4 => Ok(Ease::Easy),
            other => Err(other),
        }
    }
}

/// One entry of an `answerCards` batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardAnswer {
    pub card_id: i64,
    pub ease: Ease,
}

impl CardAnswer {
    pub fn new(card_id: i64, ease: Ease) -> Self {
        Self { card_id, ease }
    }
}
