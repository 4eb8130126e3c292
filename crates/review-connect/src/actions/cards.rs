//! Card actions: search, inspect, answer and reschedule.
//!
//! ```no_run
//! use review_connect::{AnkiClient, CardAnswer, Ease};
//!
//! # async fn example() -> review_connect::Result<()> {
//! let client = AnkiClient::new()?;
//!
//! let due = client.cards().find("deck:Spanish is:due").await?;
//! if let Some(&first) = due.first() {
//!     client.cards().answer(&[CardAnswer::new(first, Ease::Good)]).await?;
//! }
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::{CardAnswer, CardInfo};

/// Card actions, obtained via [`AnkiClient::cards()`].
#[derive(Debug)]
pub struct CardActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct QueryParams<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct CardsParams<'a> {
    cards: &'a [i64],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EaseFactorsParams<'a> {
    cards: &'a [i64],
    ease_factors: &'a [i64],
}

#[derive(Serialize)]
struct AnswersParams<'a> {
    answers: &'a [CardAnswer],
}

impl<'a> CardActions<'a> {
    /// Ids of the cards matching an Anki search, in the order Anki returns them.
    ///
    /// The query is sent untouched, e.g. `is:due`, `deck:"Spanish"`, `nid:123`.
    pub async fn find(&self, query: &str) -> Result<Vec<i64>> {
        self.client.invoke("findCards", QueryParams { query }).await
    }

    /// Full records for a batch of cards, in request order.
    pub async fn info(&self, card_ids: &[i64]) -> Result<Vec<CardInfo>> {
        self.client
            .invoke("cardsInfo", CardsParams { cards: card_ids })
            .await
    }

    /// Submit review answers. Each answer gets its own success flag.
    pub async fn answer(&self, answers: &[CardAnswer]) -> Result<Vec<bool>> {
        self.client
            .invoke("answerCards", AnswersParams { answers })
            .await
    }

    /// Suspend cards. Anki answers `false` when nothing changed.
    pub async fn suspend(&self, card_ids: &[i64]) -> Result<bool> {
        self.client
            .invoke("suspend", CardsParams { cards: card_ids })
            .await
    }

    /// Unsuspend cards. Anki answers `false` when nothing changed.
    pub async fn unsuspend(&self, card_ids: &[i64]) -> Result<bool> {
        self.client
            .invoke("unsuspend", CardsParams { cards: card_ids })
            .await
    }

    /// Suspension state per card; `None` for ids Anki does not know.
    pub async fn are_suspended(&self, card_ids: &[i64]) -> Result<Vec<Option<bool>>> {
        self.client
            .invoke("areSuspended", CardsParams { cards: card_ids })
            .await
    }

    /// Whether each card is due now.
    pub async fn are_due(&self, card_ids: &[i64]) -> Result<Vec<bool>> {
        self.client
            .invoke("areDue", CardsParams { cards: card_ids })
            .await
    }

    /// Reset cards to the new state, dropping their review progress.
    pub async fn forget(&self, card_ids: &[i64]) -> Result<()> {
        self.client
            .invoke_void("forgetCards", CardsParams { cards: card_ids })
            .await
    }

    /// Ease factor per card (2500 = 250%).
    pub async fn ease_factors(&self, card_ids: &[i64]) -> Result<Vec<i64>> {
        self.client
            .invoke("getEaseFactors", CardsParams { cards: card_ids })
            .await
    }

    /// Overwrite ease factors pairwise. Each pair gets its own success flag.
    pub async fn set_ease_factors(
        &self,
        card_ids: &[i64],
        ease_factors: &[i64],
    ) -> Result<Vec<bool>> {
        self.client
            .invoke(
                "setEaseFactors",
                EaseFactorsParams {
                    cards: card_ids,
                    ease_factors,
                },
            )
            .await
    }
}
