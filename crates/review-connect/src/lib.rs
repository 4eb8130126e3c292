//! Async client for the subset of the AnkiConnect API used during card review.
//!
//! AnkiConnect is an Anki add-on that accepts JSON actions over HTTP on
//! `127.0.0.1:8765`. This crate wraps the card, deck and note actions that a
//! review workflow needs behind typed methods.
//!
//! ```no_run
//! use review_connect::AnkiClient;
//!
//! # async fn example() -> review_connect::Result<()> {
//! let client = AnkiClient::new()?;
//!
//! let due = client.cards().find("is:due").await?;
//! let details = client.cards().info(&due).await?;
//! println!("{} cards due", details.len());
//! # Ok(())
//! # }
//! ```
//!
//! Action groups hang off the client:
//!
//! - [`AnkiClient::cards()`] - search, inspect, answer, suspend and reschedule cards
//! - [`AnkiClient::decks()`] - list, create, delete and inspect decks
//! - [`AnkiClient::notes()`] - add notes

pub mod actions;
pub mod client;
pub mod error;
mod request;
pub mod types;

pub use client::{AnkiClient, ClientBuilder};
pub use error::{Error, Result};
pub use types::{CardAnswer, CardInfo, DeckStats, Ease, Note, NoteBuilder, NoteField};
