//! Error types for review-engine.
//!
//! Operations fail with [`Error`]. The dispatcher wraps those into
//! [`DispatchError`], which is the only error shape a client ever sees:
//!
//! ```
//! use review_engine::{DispatchError, Error};
//!
//! let err = DispatchError::Tool {
//!     name: "update_cards".to_string(),
//!     source: Error::PartialFailure { action: "update", failed: vec![2] },
//! };
//! assert_eq!(err.to_string(), "Error in tool update_cards: Failed to update cards 2");
//! ```

use thiserror::Error;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating or executing an operation.
#[derive(Debug, Error)]
pub enum Error {
    /// AnkiConnect failed or rejected the action.
    #[error(transparent)]
    Backend(#[from] review_connect::Error),

    /// The argument bag does not fit the operation's argument record.
    #[error("invalid arguments: {0}")]
    InvalidArguments(#[source] serde_json::Error),

    /// The arguments are well-formed but inconsistent.
    #[error("validation error: {0}")]
    Validation(String),

    /// Some items of a batch failed. Items that succeeded stay applied.
    #[error("Failed to {action} cards {}", join_ids(.failed))]
    PartialFailure {
        action: &'static str,
        failed: Vec<i64>,
    },

    /// Anki answered a per-card query with a different number of results.
    #[error("{action} returned {got} results for {expected} cards")]
    ResultCount {
        action: &'static str,
        expected: usize,
        got: usize,
    },

    /// A freshly added note produced no cards.
    #[error("note {0} was created but has no cards")]
    NoteWithoutCards(i64),

    /// A resource URI without a readable filter segment.
    #[error("invalid resource URI: {0}")]
    InvalidResourceUri(String),

    /// A mutating tool was called while the server is read-only.
    #[error("write operation '{0}' is not allowed in read-only mode")]
    ReadOnly(&'static str),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Whether the caller sent something malformed, as opposed to Anki failing.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            Error::InvalidArguments(_)
                | Error::Validation(_)
                | Error::InvalidResourceUri(_)
                | Error::ReadOnly(_)
        )
    }
}

/// Failure of a single tool invocation.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The call carried no argument bag at all.
    #[error("No arguments provided")]
    MissingArguments,

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The tool ran and failed.
    #[error("Error in tool {name}: {source}")]
    Tool {
        name: String,
        #[source]
        source: Error,
    },
}

pub(crate) fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
