//! Deck actions.

use std::collections::HashMap;

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::DeckStats;

/// Deck actions, obtained via [`AnkiClient::decks()`].
#[derive(Debug)]
pub struct DeckActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct CreateDeckParams<'a> {
    deck: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteDecksParams<'a> {
    decks: &'a [&'a str],
    cards_too: bool,
}

#[derive(Serialize)]
struct DecksParams<'a> {
    decks: &'a [&'a str],
}

#[derive(Serialize)]
struct ChangeDeckParams<'a> {
    cards: &'a [i64],
    deck: &'a str,
}

impl<'a> DeckActions<'a> {
    /// All deck names, including nested `Parent::Child` decks.
    pub async fn names(&self) -> Result<Vec<String>> {
        self.client.invoke_without_params("deckNames").await
    }

    /// Deck name to deck id.
    pub async fn names_and_ids(&self) -> Result<HashMap<String, i64>> {
        self.client.invoke_without_params("deckNamesAndIds").await
    }

    /// Create a deck and return its id. An existing deck's id is returned unchanged.
    pub async fn create(&self, name: &str) -> Result<i64> {
        self.client
            .invoke("createDeck", CreateDeckParams { deck: name })
            .await
    }

    /// Delete decks. With `cards_too` the cards go with them, which cannot be undone.
    pub async fn delete(&self, decks: &[&str], cards_too: bool) -> Result<()> {
        self.client
            .invoke_void("deleteDecks", DeleteDecksParams { decks, cards_too })
            .await
    }

    /// Counters per deck, keyed by deck id as a string.
    pub async fn stats(&self, decks: &[&str]) -> Result<HashMap<String, DeckStats>> {
        self.client
            .invoke("getDeckStats", DecksParams { decks })
            .await
    }

    /// Move cards into `deck`, creating it if needed.
    pub async fn move_cards(&self, cards: &[i64], deck: &str) -> Result<()> {
        self.client
            .invoke_void("changeDeck", ChangeDeckParams { cards, deck })
            .await
    }
}
