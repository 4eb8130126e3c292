//! Filter expressions in, ordered plain-text cards out.
//!
//! # Example
//!
//! ```no_run
//! use review_engine::{AnkiClient, QueryEngine};
//!
//! # async fn example() -> review_engine::Result<()> {
//! let client = AnkiClient::new()?;
//! let due = QueryEngine::new(&client).cards("is:due").await?;
//!
//! for card in due.iter().take(5) {
//!     println!("{} -> {}", card.question, card.answer);
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use review_connect::CardInfo;

use crate::Result;
use crate::backend::Backend;
use crate::normalize::normalize;

/// A card as handed to clients: both sides as plain text plus its due order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub card_id: i64,
    pub question: String,
    pub answer: String,
    /// Lower is sooner. Only meaningful relative to other cards.
    pub due: i64,
}

impl From<CardInfo> for Card {
    fn from(info: CardInfo) -> Self {
        Self {
            card_id: info.card_id,
            question: normalize(&info.question),
            answer: normalize(&info.answer),
            due: info.due,
        }
    }
}

/// Runs Anki searches and shapes the matches into [`Card`]s.
pub struct QueryEngine<'a> {
    backend: &'a dyn Backend,
}

impl<'a> QueryEngine<'a> {
    pub fn new(backend: &'a dyn Backend) -> Self {
        Self { backend }
    }

    /// Cards matching `filter`, soonest due first.
    ///
    /// The filter goes to Anki verbatim. Details for all matches are fetched
    /// in one batch; cards with equal `due` keep the order Anki returned them
    /// in. No matches is an empty list, not an error.
    pub async fn cards(&self, filter: &str) -> Result<Vec<Card>> {
        let ids = self.backend.find_cards(filter).await?;
        debug!(filter, matches = ids.len(), "Searched cards");
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let infos = self.backend.cards_info(&ids).await?;
        let mut cards: Vec<Card> = infos.into_iter().map(Card::from).collect();
        cards.sort_by_key(|card| card.due);

        Ok(cards)
    }
}
