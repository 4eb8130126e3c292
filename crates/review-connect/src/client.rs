//! The AnkiConnect client and its builder.

use std::time::Duration;

use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};

use crate::actions::{CardActions, DeckActions, NoteActions};
use crate::error::{Error, Result};
use crate::request::{AnkiRequest, AnkiResponse};

/// Where AnkiConnect listens unless configured otherwise.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8765";

/// Upper bound for a single action round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Handle to one AnkiConnect endpoint.
///
/// Cloning is cheap: clones share the underlying connection pool.
///
/// ```no_run
/// use review_connect::AnkiClient;
///
/// # async fn example() -> review_connect::Result<()> {
/// let client = AnkiClient::new()?;
/// let decks = client.decks().names().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AnkiClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl AnkiClient {
    /// Client for `http://127.0.0.1:8765` with a 30 second timeout.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Start configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Card actions.
    pub fn cards(&self) -> CardActions<'_> {
        CardActions { client: self }
    }

    /// Deck actions.
    pub fn decks(&self) -> DeckActions<'_> {
        DeckActions { client: self }
    }

    /// Note actions.
    pub fn notes(&self) -> NoteActions<'_> {
        NoteActions { client: self }
    }

    /// Run an action whose reply must carry a result.
    pub(crate) async fn invoke<P, R>(&self, action: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let response: AnkiResponse<R> = self.post(action, Some(params)).await?;
        match (response.result, response.error) {
            (_, Some(err)) => Err(classify(err)),
            (Some(result), None) => Ok(result),
            (None, None) => Err(Error::EmptyResponse),
        }
    }

    /// Run a parameterless action whose reply must carry a result.
    pub(crate) async fn invoke_without_params<R>(&self, action: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response: AnkiResponse<R> = self.post::<(), R>(action, None).await?;
        match (response.result, response.error) {
            (_, Some(err)) => Err(classify(err)),
            (Some(result), None) => Ok(result),
            (None, None) => Err(Error::EmptyResponse),
        }
    }

    /// Run an action that answers `null` on success.
    pub(crate) async fn invoke_void<P>(&self, action: &str, params: P) -> Result<()>
    where
        P: Serialize,
    {
        let response: AnkiResponse<serde_json::Value> = self.post(action, Some(params)).await?;
        match response.error {
            Some(err) => Err(classify(err)),
            None => Ok(()),
        }
    }

    async fn post<P, R>(&self, action: &str, params: Option<P>) -> Result<AnkiResponse<R>>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let request = AnkiRequest::new(action, params, self.api_key.as_deref());
        let response = self
            .http_client
            .post(&self.base_url)
            .json(&request)
            .send()
            .await?;

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

fn classify(message: String) -> Error {
    if message.contains("permission") {
        Error::PermissionDenied
    } else {
        Error::AnkiConnect(message)
    }
}

/// Configures an [`AnkiClient`].
///
/// ```no_run
/// use std::time::Duration;
/// use review_connect::AnkiClient;
///
/// # fn example() -> review_connect::Result<()> {
/// let client = AnkiClient::builder()
///     .url("http://localhost:8765")
///     .api_key("secret")
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// AnkiConnect endpoint.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Key sent with every request when AnkiConnect has `apiKey` configured.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Per-request timeout. A request that exceeds it fails with [`Error::Timeout`].
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    pub fn build(self) -> Result<AnkiClient> {
        let http_client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(AnkiClient {
            http_client,
            base_url: self.base_url,
            api_key: self.api_key,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
