//! Shared fixtures: an in-memory backend and a mock AnkiConnect server.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use review_connect::{CardAnswer, CardInfo, DeckStats, Error, Note, Result};
use review_engine::tools::{ToolSettings, catalog};
use review_engine::{AnkiClient, Backend, Dispatcher};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Backend answering from canned results keyed by AnkiConnect action name.
///
/// Every call is recorded with its parameters, so tests can check what was
/// sent, or that nothing was.
#[derive(Default)]
pub struct FakeBackend {
    responses: HashMap<&'static str, std::result::Result<Value, String>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, action: &'static str, result: Value) -> Self {
        self.responses.insert(action, Ok(result));
        self
    }

    pub fn fail(mut self, action: &'static str, message: &str) -> Self {
        self.responses.insert(action, Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn actions(&self) -> Vec<String> {
        self.calls().into_iter().map(|(action, _)| action).collect()
    }

    fn call<R: DeserializeOwned>(&self, action: &'static str, params: Value) -> Result<R> {
        self.calls.lock().unwrap().push((action.to_string(), params));
        match self.responses.get(action) {
            Some(Ok(result)) => Ok(serde_json::from_value(result.clone())?),
            Some(Err(message)) => Err(Error::AnkiConnect(message.clone())),
            None => panic!("unexpected action {action}"),
        }
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn find_cards(&self, query: &str) -> Result<Vec<i64>> {
        self.call("findCards", json!({ "query": query }))
    }

    async fn cards_info(&self, card_ids: &[i64]) -> Result<Vec<CardInfo>> {
        self.call("cardsInfo", json!({ "cards": card_ids }))
    }

    async fn answer_cards(&self, answers: &[CardAnswer]) -> Result<Vec<bool>> {
        self.call("answerCards", json!({ "answers": answers }))
    }

    async fn add_note(&self, note: &Note) -> Result<i64> {
        self.call("addNote", json!({ "note": note }))
    }

    async fn deck_names(&self) -> Result<Vec<String>> {
        self.call("deckNames", Value::Null)
    }

    async fn deck_names_and_ids(&self) -> Result<HashMap<String, i64>> {
        self.call("deckNamesAndIds", Value::Null)
    }

    async fn create_deck(&self, name: &str) -> Result<i64> {
        self.call("createDeck", json!({ "deck": name }))
    }

    async fn delete_decks(&self, names: &[String]) -> Result<()> {
        self.call("deleteDecks", json!({ "decks": names, "cardsToo": true }))
    }

    async fn deck_stats(&self, names: &[String]) -> Result<HashMap<String, DeckStats>> {
        self.call("getDeckStats", json!({ "decks": names }))
    }

    async fn change_deck(&self, card_ids: &[i64], deck: &str) -> Result<()> {
        self.call("changeDeck", json!({ "cards": card_ids, "deck": deck }))
    }

    async fn suspend(&self, card_ids: &[i64]) -> Result<bool> {
        self.call("suspend", json!({ "cards": card_ids }))
    }

    async fn unsuspend(&self, card_ids: &[i64]) -> Result<bool> {
        self.call("unsuspend", json!({ "cards": card_ids }))
    }

    async fn are_suspended(&self, card_ids: &[i64]) -> Result<Vec<Option<bool>>> {
        self.call("areSuspended", json!({ "cards": card_ids }))
    }

    async fn are_due(&self, card_ids: &[i64]) -> Result<Vec<bool>> {
        self.call("areDue", json!({ "cards": card_ids }))
    }

    async fn forget(&self, card_ids: &[i64]) -> Result<()> {
        self.call("forgetCards", json!({ "cards": card_ids }))
    }

    async fn ease_factors(&self, card_ids: &[i64]) -> Result<Vec<i64>> {
        self.call("getEaseFactors", json!({ "cards": card_ids }))
    }

    async fn set_ease_factors(
        &self,
        card_ids: &[i64],
        ease_factors: &[i64],
    ) -> Result<Vec<bool>> {
        self.call(
            "setEaseFactors",
            json!({ "cards": card_ids, "easeFactors": ease_factors }),
        )
    }
}

/// A dispatcher over `backend` with the default tool settings.
pub fn dispatcher(backend: &Arc<FakeBackend>) -> Dispatcher {
    let backend: Arc<dyn Backend> = backend.clone();
    Dispatcher::new(backend, catalog(&ToolSettings::default()))
}

/// Argument bag from a JSON object literal.
pub fn bag(value: Value) -> Option<serde_json::Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map),
        other => panic!("argument bag must be an object, got {other}"),
    }
}

/// A `cardsInfo` record with just the fields the query engine reads.
pub fn card_info(card_id: i64, question: &str, answer: &str, due: i64) -> Value {
    json!({
        "cardId": card_id,
        "note": card_id + 1000,
        "deckName": "Default",
        "modelName": "Basic",
        "question": question,
        "answer": answer,
        "fields": {},
        "type": 2,
        "queue": 2,
        "due": due,
        "interval": 3,
        "factor": 2500,
        "reps": 4,
        "lapses": 0
    })
}

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn client_for(server: &MockServer) -> AnkiClient {
    AnkiClient::builder().url(server.uri()).build().unwrap()
}

pub fn mock_anki_response<T: Serialize>(result: T) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "result": result,
        "error": null
    }))
}

pub fn mock_anki_error(error: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "result": null,
        "error": error
    }))
}

/// Expect `action` to be called exactly `times` times with a body containing `params`.
pub async fn mock_action_times(
    server: &MockServer,
    action: &str,
    params: Value,
    response: ResponseTemplate,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": action,
            "params": params
        })))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

/// Expect exactly one call of `action`, whatever its parameters.
pub async fn mock_action(server: &MockServer, action: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "action": action })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}
