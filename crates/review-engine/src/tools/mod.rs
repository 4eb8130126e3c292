//! The tool catalog.
//!
//! Each tool is a unit struct implementing [`Operation`]: a typed argument
//! record, an optional validation step and an async body run against a
//! [`Backend`]. A blanket impl turns every operation into an object-safe
//! [`ToolHandler`], and [`ToolRegistry`] keeps them by name in declaration
//! order. The advertised input schema is generated from the same argument
//! record the call is deserialized into.

pub mod args;
mod cards;
mod decks;
mod review;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::backend::Backend;
use crate::{Error, Result};

pub use cards::{
    CheckDueStatus, CheckSuspendedStatus, ForgetCards, GetCardsInfo, GetEaseFactors,
    SetEaseFactors, SuspendCards, UnsuspendCards,
};
pub use decks::{
    CreateDeck, DeleteDecks, GetDeckStats, ListDecks, ListDecksWithIds, MoveCardsToDeck,
};
pub use review::{AddCard, GetAllCardsInDeck, GetDueCards, GetNewCards, UpdateCards};

/// A JSON object, the shape of every argument bag and input schema.
pub type JsonObject = serde_json::Map<String, Value>;

/// What a client sees of a tool before calling it.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: JsonObject,
    /// The tool never changes the collection.
    pub read_only: bool,
    /// The tool removes data that cannot be recovered.
    pub destructive: bool,
}

/// A single tool, with its arguments as a typed record.
#[async_trait]
pub trait Operation: Send + Sync + 'static {
    type Args: DeserializeOwned + JsonSchema + Send;

    const NAME: &'static str;
    const DESCRIPTION: &'static str;
    const READ_ONLY: bool = false;
    const DESTRUCTIVE: bool = false;

    /// Checks that run before anything is sent to Anki.
    fn validate(&self, _args: &Self::Args) -> Result<()> {
        Ok(())
    }

    async fn execute(&self, backend: &dyn Backend, args: Self::Args) -> Result<String>;
}

/// Object-safe form of [`Operation`], working on raw argument bags.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn descriptor(&self) -> ToolDescriptor;

    async fn call(&self, backend: &dyn Backend, args: JsonObject) -> Result<String>;
}

#[async_trait]
impl<O: Operation> ToolHandler for O {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: O::NAME,
            description: O::DESCRIPTION,
            input_schema: input_schema::<O::Args>(),
            read_only: O::READ_ONLY,
            destructive: O::DESTRUCTIVE,
        }
    }

    async fn call(&self, backend: &dyn Backend, args: JsonObject) -> Result<String> {
        let args: O::Args =
            serde_json::from_value(Value::Object(args)).map_err(Error::InvalidArguments)?;
        self.validate(&args)?;
        self.execute(backend, args).await
    }
}

/// JSON Schema of an argument record as a plain object.
pub fn input_schema<T: JsonSchema>() -> JsonObject {
    match serde_json::to_value(schemars::schema_for!(T)) {
        Ok(Value::Object(schema)) => schema,
        _ => JsonObject::from_iter([("type".to_string(), Value::from("object"))]),
    }
}

struct Entry {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

/// Tools by name, remembering registration order.
#[derive(Default)]
pub struct ToolRegistry {
    entries: Vec<Entry>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool. A tool with the same name is replaced in place.
    pub fn register<H: ToolHandler + 'static>(&mut self, handler: H) -> &mut Self {
        let descriptor = handler.descriptor();
        let entry = Entry {
            descriptor,
            handler: Arc::new(handler),
        };
        match self.index.get(entry.descriptor.name) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(entry.descriptor.name, self.entries.len());
                self.entries.push(entry);
            }
        }
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<H: ToolHandler + 'static>(mut self, handler: H) -> Self {
        self.register(handler);
        self
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.entries.iter().map(|entry| &entry.descriptor)
    }

    pub fn get(&self, name: &str) -> Option<(&ToolDescriptor, Arc<dyn ToolHandler>)> {
        self.index.get(name).map(|&i| {
            let entry = &self.entries[i];
            (&entry.descriptor, Arc::clone(&entry.handler))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Startup choices that change what tools do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    /// Deck `add_card` puts new cards in.
    pub default_deck: String,
    /// Note type `add_card` creates. Needs `Front` and `Back` fields.
    pub default_model: String,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            default_deck: "Default".to_string(),
            default_model: "Basic".to_string(),
        }
    }
}

/// Every tool this crate offers, in the order they are listed to clients.
///
/// ```
/// use review_engine::tools::{catalog, ToolSettings};
///
/// let tools = catalog(&ToolSettings::default());
/// assert_eq!(tools.descriptors().next().unwrap().name, "update_cards");
/// assert!(tools.get("get_due_cards").is_some());
/// ```
pub fn catalog(settings: &ToolSettings) -> ToolRegistry {
    ToolRegistry::new()
        .with(UpdateCards)
        .with(AddCard {
            deck: settings.default_deck.clone(),
            model: settings.default_model.clone(),
        })
        .with(GetDueCards)
        .with(GetNewCards)
        .with(ListDecks)
        .with(ListDecksWithIds)
        .with(CreateDeck)
        .with(DeleteDecks)
        .with(GetDeckStats)
        .with(MoveCardsToDeck)
        .with(GetCardsInfo)
        .with(SuspendCards)
        .with(UnsuspendCards)
        .with(CheckSuspendedStatus)
        .with(CheckDueStatus)
        .with(ForgetCards)
        .with(GetEaseFactors)
        .with(SetEaseFactors)
        .with(GetAllCardsInDeck)
}

/// Arguments of tools that take none.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct NoArgs {}

pub(crate) fn pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Fails unless Anki reported success for every id.
///
/// A missing result counts as a failure. Items that did succeed stay applied.
pub(crate) fn require_all(ids: &[i64], results: &[bool], action: &'static str) -> Result<()> {
    let failed: Vec<i64> = ids
        .iter()
        .enumerate()
        .filter(|&(i, _)| !results.get(i).copied().unwrap_or(false))
        .map(|(_, &id)| id)
        .collect();

    if failed.is_empty() {
        Ok(())
    } else {
        Err(Error::PartialFailure { action, failed })
    }
}
