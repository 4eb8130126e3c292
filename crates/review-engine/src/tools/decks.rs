//! Deck tools.

use std::collections::BTreeMap;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{debug, info};

use super::{NoArgs, Operation, args, pretty};
use crate::Result;
use crate::backend::Backend;

/// Names of all decks.
pub struct ListDecks;

#[async_trait]
impl Operation for ListDecks {
    type Args = NoArgs;

    const NAME: &'static str = "list_decks";
    const DESCRIPTION: &'static str = "Get a list of all Anki decks.";
    const READ_ONLY: bool = true;

    async fn execute(&self, backend: &dyn Backend, _args: NoArgs) -> Result<String> {
        let names = backend.deck_names().await?;
        debug!(count = names.len(), "Listed decks");
        pretty(&names)
    }
}

/// Deck names mapped to deck ids.
pub struct ListDecksWithIds;

#[async_trait]
impl Operation for ListDecksWithIds {
    type Args = NoArgs;

    const NAME: &'static str = "list_decks_with_ids";
    const DESCRIPTION: &'static str = "Get a list of all Anki decks with their IDs.";
    const READ_ONLY: bool = true;

    async fn execute(&self, backend: &dyn Backend, _args: NoArgs) -> Result<String> {
        let decks: BTreeMap<_, _> = backend.deck_names_and_ids().await?.into_iter().collect();
        pretty(&decks)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateDeckArgs {
    /// Name of the new deck. Use `::` to nest, e.g. `Spanish::Verbs`.
    #[serde(deserialize_with = "args::string")]
    pub name: String,
}

pub struct CreateDeck;

#[async_trait]
impl Operation for CreateDeck {
    type Args = CreateDeckArgs;

    const NAME: &'static str = "create_deck";
    const DESCRIPTION: &'static str =
        "Create a new Anki deck. Does nothing if a deck with that name already exists.";

    async fn execute(&self, backend: &dyn Backend, args: CreateDeckArgs) -> Result<String> {
        debug!(name = %args.name, "Creating deck");
        let id = backend.create_deck(&args.name).await?;
        info!(name = %args.name, id, "Deck created");
        Ok(format!("Created deck '{}' with ID: {}", args.name, id))
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DecksArgs {
    /// Deck names
    #[serde(deserialize_with = "args::strings")]
    pub decks: Vec<String>,
}

pub struct DeleteDecks;

#[async_trait]
impl Operation for DeleteDecks {
    type Args = DecksArgs;

    const NAME: &'static str = "delete_decks";
    const DESCRIPTION: &'static str =
        "Delete decks and all cards in them. This cannot be undone.";
    const DESTRUCTIVE: bool = true;

    async fn execute(&self, backend: &dyn Backend, args: DecksArgs) -> Result<String> {
        debug!(decks = ?args.decks, "Deleting decks");
        backend.delete_decks(&args.decks).await?;
        info!(count = args.decks.len(), "Decks deleted");
        Ok(format!("Deleted decks {}", args.decks.join(", ")))
    }
}

pub struct GetDeckStats;

#[async_trait]
impl Operation for GetDeckStats {
    type Args = DecksArgs;

    const NAME: &'static str = "get_deck_stats";
    const DESCRIPTION: &'static str =
        "Get new, learning and review counts plus the total number of cards for the given decks.";
    const READ_ONLY: bool = true;

    async fn execute(&self, backend: &dyn Backend, args: DecksArgs) -> Result<String> {
        let stats: BTreeMap<_, _> = backend.deck_stats(&args.decks).await?.into_iter().collect();
        pretty(&stats)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct MoveCardsArgs {
    /// Card ids to move
    #[serde(deserialize_with = "args::numbers")]
    pub cards: Vec<i64>,
    /// Target deck, created if it does not exist
    #[serde(deserialize_with = "args::string")]
    pub deck: String,
}

pub struct MoveCardsToDeck;

#[async_trait]
impl Operation for MoveCardsToDeck {
    type Args = MoveCardsArgs;

    const NAME: &'static str = "move_cards_to_deck";
    const DESCRIPTION: &'static str = "Move cards to a different deck.";

    async fn execute(&self, backend: &dyn Backend, args: MoveCardsArgs) -> Result<String> {
        debug!(count = args.cards.len(), deck = %args.deck, "Moving cards");
        backend.change_deck(&args.cards, &args.deck).await?;
        info!(count = args.cards.len(), deck = %args.deck, "Cards moved");
        Ok(format!("Moved {} cards to '{}'", args.cards.len(), args.deck))
    }
}
