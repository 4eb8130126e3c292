//! Reviewing, adding and listing cards.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info};

use review_connect::{CardAnswer, Ease, NoteBuilder};

use super::{Operation, args, pretty, require_all};
use crate::backend::Backend;
use crate::error::join_ids;
use crate::query::QueryEngine;
use crate::{Error, Result};

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// Id of the card being answered
    #[serde(deserialize_with = "args::number")]
    pub card_id: i64,
    /// 1 = Again, 2 = Hard, 3 = Good, 4 = Easy
    #[serde(deserialize_with = "args::ease")]
    #[schemars(with = "u8")]
    pub ease: Ease,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateCardsArgs {
    /// One rating per reviewed card
    pub answers: Vec<Answer>,
}

/// Record review answers for cards.
pub struct UpdateCards;

#[async_trait]
impl Operation for UpdateCards {
    type Args = UpdateCardsArgs;

    const NAME: &'static str = "update_cards";
    const DESCRIPTION: &'static str =
        "After the user answers cards you've quizzed them on, use this tool to mark them answered \
         and update their ease";

    fn validate(&self, args: &UpdateCardsArgs) -> Result<()> {
        if args.answers.is_empty() {
            return Err(Error::Validation("answers must not be empty".to_string()));
        }
        Ok(())
    }

    async fn execute(&self, backend: &dyn Backend, args: UpdateCardsArgs) -> Result<String> {
        let (ids, answers): (Vec<i64>, Vec<CardAnswer>) = args
            .answers
            .iter()
            .map(|a| (a.card_id, CardAnswer::new(a.card_id, a.ease)))
            .unzip();
        debug!(count = answers.len(), "Answering cards");

        let results = backend.answer_cards(&answers).await?;
        require_all(&ids, &results, "update")?;

        info!(count = ids.len(), "Cards answered");
        Ok(format!("Updated cards {}", join_ids(&ids)))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddCardArgs {
    /// The front of the card. Plain text or HTML.
    #[serde(deserialize_with = "args::string")]
    pub front: String,
    /// The back of the card. Plain text or HTML.
    #[serde(deserialize_with = "args::string")]
    pub back: String,
}

/// Create a two-sided card in the configured deck.
pub struct AddCard {
    pub deck: String,
    pub model: String,
}

#[async_trait]
impl Operation for AddCard {
    type Args = AddCardArgs;

    const NAME: &'static str = "add_card";
    const DESCRIPTION: &'static str =
        "Create a new flashcard in Anki for the user. Must use HTML formatting only. \
         IMPORTANT FORMATTING NOTES: 1. Use <br> for new lines 2. Use <b>, <i>, <ul>, <li> for \
         emphasis and lists 3. Do not use markdown";

    async fn execute(&self, backend: &dyn Backend, args: AddCardArgs) -> Result<String> {
        debug!(deck = %self.deck, model = %self.model, "Adding card");
        let note = NoteBuilder::new(&self.deck, &self.model)
            .field("Front", args.front)
            .field("Back", args.back)
            .build();

        let note_id = backend.add_note(&note).await?;
        let card_id = backend
            .find_cards(&format!("nid:{note_id}"))
            .await?
            .first()
            .copied()
            .ok_or(Error::NoteWithoutCards(note_id))?;

        info!(note_id, card_id, "Card created");
        Ok(format!("Created card with id {card_id}"))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CountArgs {
    /// How many cards to return at most
    #[serde(deserialize_with = "args::count")]
    pub num: usize,
}

async fn first_cards(backend: &dyn Backend, filter: &str, num: usize) -> Result<String> {
    let mut cards = QueryEngine::new(backend).cards(filter).await?;
    cards.truncate(num);
    pretty(&cards)
}

/// The soonest due cards.
pub struct GetDueCards;

#[async_trait]
impl Operation for GetDueCards {
    type Args = CountArgs;

    const NAME: &'static str = "get_due_cards";
    const DESCRIPTION: &'static str = "Returns a given number (num) of cards due for review.";
    const READ_ONLY: bool = true;

    async fn execute(&self, backend: &dyn Backend, args: CountArgs) -> Result<String> {
        first_cards(backend, "is:due", args.num).await
    }
}

/// Cards never studied.
pub struct GetNewCards;

#[async_trait]
impl Operation for GetNewCards {
    type Args = CountArgs;

    const NAME: &'static str = "get_new_cards";
    const DESCRIPTION: &'static str = "Returns a given number (num) of new and unseen cards.";
    const READ_ONLY: bool = true;

    async fn execute(&self, backend: &dyn Backend, args: CountArgs) -> Result<String> {
        first_cards(backend, "is:new", args.num).await
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeckArgs {
    /// Exact deck name
    #[serde(deserialize_with = "args::string")]
    pub deck: String,
}

/// Filter matching exactly the named deck.
pub(crate) fn deck_filter(deck: &str) -> String {
    format!("deck:\"{}\"", deck.replace('"', "\\\""))
}

/// Every card of one deck.
pub struct GetAllCardsInDeck;

#[async_trait]
impl Operation for GetAllCardsInDeck {
    type Args = DeckArgs;

    const NAME: &'static str = "get_all_cards_in_deck";
    const DESCRIPTION: &'static str = "Get all cards in a specific deck.";
    const READ_ONLY: bool = true;

    async fn execute(&self, backend: &dyn Backend, args: DeckArgs) -> Result<String> {
        let cards = QueryEngine::new(backend).cards(&deck_filter(&args.deck)).await?;
        pretty(&cards)
    }
}
