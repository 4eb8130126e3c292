//! Errors raised while talking to AnkiConnect.
//!
//! The variants you will usually branch on:
//!
//! - [`Error::ConnectionRefused`]: Anki is closed or the add-on is missing
//! - [`Error::AnkiConnect`]: the action ran and Anki rejected it
//! - [`Error::Timeout`]: Anki accepted the connection but never answered
//!
//! ```no_run
//! use review_connect::{AnkiClient, Error};
//!
//! # async fn example() -> review_connect::Result<()> {
//! let client = AnkiClient::new()?;
//!
//! match client.decks().names().await {
//!     Ok(decks) => println!("{} decks", decks.len()),
//!     Err(Error::ConnectionRefused) => eprintln!("start Anki first"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Errors from AnkiConnect requests.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure other than a refused connection or a timeout.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The action reached Anki and Anki reported an error.
    ///
    /// Typical messages are "deck was not found" or
    /// "cannot create note because it is a duplicate".
    #[error("AnkiConnect error: {0}")]
    AnkiConnect(String),

    /// Neither `result` nor `error` was set on a non-void action.
    #[error("AnkiConnect returned empty response")]
    EmptyResponse,

    /// The request could not be encoded or the reply could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Nothing is listening on the configured address.
    #[error("Could not connect to Anki. Is Anki running with AnkiConnect installed?")]
    ConnectionRefused,

    /// The request exceeded the client timeout.
    #[error("AnkiConnect did not respond within the configured timeout")]
    Timeout,

    /// AnkiConnect wants an API key or an approval in the Anki window.
    #[error("Permission denied. Request permission first or check API key.")]
    PermissionDenied,

    /// The HTTP client could not be constructed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Error::ConnectionRefused
        } else if err.is_timeout() {
            Error::Timeout
        } else {
            Error::Http(err)
        }
    }
}

/// Result alias for AnkiConnect operations.
pub type Result<T> = std::result::Result<T, Error>;
