//! Anki review workflows for agents.
//!
//! This crate sits between an agent protocol and [`review_connect`]. It turns
//! Anki searches into ordered plain-text cards, exposes a few saved searches
//! as resources, and routes named tool calls with loosely typed JSON
//! arguments to the right AnkiConnect actions.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use review_engine::tools::{catalog, ToolSettings};
//! use review_engine::{AnkiClient, Dispatcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AnkiClient::new()?;
//! let dispatcher = Dispatcher::new(Arc::new(client), catalog(&ToolSettings::default()));
//!
//! let args = serde_json::json!({"num": 5});
//! let due = dispatcher
//!     .invoke("get_due_cards", args.as_object().cloned())
//!     .await?;
//! println!("{due}");
//! # Ok(())
//! # }
//! ```
//!
//! Everything that reaches Anki goes through the [`Backend`] trait, which
//! [`AnkiClient`] implements.

pub mod backend;
pub mod dispatch;
mod error;
pub mod normalize;
pub mod query;
pub mod resources;
pub mod tools;

pub use backend::Backend;
pub use dispatch::Dispatcher;
pub use error::{DispatchError, Error, Result};
pub use normalize::normalize;
pub use query::{Card, QueryEngine};
pub use resources::{ResourceBody, ResourceDescriptor};

pub use review_connect::{AnkiClient, ClientBuilder};
