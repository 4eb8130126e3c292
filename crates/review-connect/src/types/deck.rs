use serde::{Deserialize, Serialize};

/// Per-deck counters returned by `getDeckStats`, keyed by deck id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckStats {
    #[serde(default)]
    pub deck_id: i64,
    pub name: String,
    #[serde(default)]
    pub new_count: i64,
    #[serde(default)]
    pub learn_count: i64,
    #[serde(default)]
    pub review_count: i64,
    #[serde(default)]
    pub total_in_deck: i64,
}
