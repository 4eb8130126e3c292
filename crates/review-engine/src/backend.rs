//! The seam between the engine and AnkiConnect.
//!
//! Everything in this crate talks to Anki through [`Backend`], so the live
//! [`AnkiClient`] can be swapped for an in-memory fake in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use review_connect::{AnkiClient, CardAnswer, CardInfo, DeckStats, Note, Result};

/// The AnkiConnect actions the engine consumes.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn find_cards(&self, query: &str) -> Result<Vec<i64>>;

    async fn cards_info(&self, card_ids: &[i64]) -> Result<Vec<CardInfo>>;

    async fn answer_cards(&self, answers: &[CardAnswer]) -> Result<Vec<bool>>;

    async fn add_note(&self, note: &Note) -> Result<i64>;

    async fn deck_names(&self) -> Result<Vec<String>>;

    async fn deck_names_and_ids(&self) -> Result<HashMap<String, i64>>;

    async fn create_deck(&self, name: &str) -> Result<i64>;

    /// Always removes the decks' cards as well.
    async fn delete_decks(&self, names: &[String]) -> Result<()>;

    async fn deck_stats(&self, names: &[String]) -> Result<HashMap<String, DeckStats>>;

    async fn change_deck(&self, card_ids: &[i64], deck: &str) -> Result<()>;

    async fn suspend(&self, card_ids: &[i64]) -> Result<bool>;

    async fn unsuspend(&self, card_ids: &[i64]) -> Result<bool>;

    async fn are_suspended(&self, card_ids: &[i64]) -> Result<Vec<Option<bool>>>;

    async fn are_due(&self, card_ids: &[i64]) -> Result<Vec<bool>>;

    async fn forget(&self, card_ids: &[i64]) -> Result<()>;

    async fn ease_factors(&self, card_ids: &[i64]) -> Result<Vec<i64>>;

    async fn set_ease_factors(&self, card_ids: &[i64], ease_factors: &[i64])
    -> Result<Vec<bool>>;
}

#[async_trait]
impl Backend for AnkiClient {
    async fn find_cards(&self, query: &str) -> Result<Vec<i64>> {
        self.cards().find(query).await
    }

    async fn cards_info(&self, card_ids: &[i64]) -> Result<Vec<CardInfo>> {
        self.cards().info(card_ids).await
    }

    async fn answer_cards(&self, answers: &[CardAnswer]) -> Result<Vec<bool>> {
        self.cards().answer(answers).await
    }

    async fn add_note(&self, note: &Note) -> Result<i64> {
        self.notes().add(note).await
    }

    async fn deck_names(&self) -> Result<Vec<String>> {
        self.decks().names().await
    }

    async fn deck_names_and_ids(&self) -> Result<HashMap<String, i64>> {
        self.decks().names_and_ids().await
    }

    async fn create_deck(&self, name: &str) -> Result<i64> {
        self.decks().create(name).await
    }

    async fn delete_decks(&self, names: &[String]) -> Result<()> {
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        self.decks().delete(&names, true).await
    }

    async fn deck_stats(&self, names: &[String]) -> Result<HashMap<String, DeckStats>> {
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        self.decks().stats(&names).await
    }

    async fn change_deck(&self, card_ids: &[i64], deck: &str) -> Result<()> {
        self.decks().move_cards(card_ids, deck).await
    }

    async fn suspend(&self, card_ids: &[i64]) -> Result<bool> {
        self.cards().suspend(card_ids).await
    }

    async fn unsuspend(&self, card_ids: &[i64]) -> Result<bool> {
        self.cards().unsuspend(card_ids).await
    }

    async fn are_suspended(&self, card_ids: &[i64]) -> Result<Vec<Option<bool>>> {
        self.cards().are_suspended(card_ids).await
    }

    async fn are_due(&self, card_ids: &[i64]) -> Result<Vec<bool>> {
        self.cards().are_due(card_ids).await
    }

    async fn forget(&self, card_ids: &[i64]) -> Result<()> {
        self.cards().forget(card_ids).await
    }

    async fn ease_factors(&self, card_ids: &[i64]) -> Result<Vec<i64>> {
        self.cards().ease_factors(card_ids).await
    }

    async fn set_ease_factors(
        &self,
        card_ids: &[i64],
        ease_factors: &[i64],
    ) -> Result<Vec<bool>> {
        self.cards().set_ease_factors(card_ids, ease_factors).await
    }
}
