//! Wire envelopes for AnkiConnect version 6.

use serde::{Deserialize, Serialize};

/// The protocol version every request is pinned to.
pub(crate) const API_VERSION: u8 = 6;

#[derive(Debug, Serialize)]
pub(crate) struct AnkiRequest<'a, P> {
    pub action: &'a str,
    pub version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<P>,
}

impl<'a, P> AnkiRequest<'a, P> {
    pub fn new(action: &'a str, params: Option<P>, key: Option<&'a str>) -> Self {
        Self {
            action,
            version: API_VERSION,
            key,
            params,
        }
    }
}

/// Every reply carries both slots; exactly one of them should be non-null.
#[derive(Debug, Deserialize)]
pub(crate) struct AnkiResponse<R> {
    pub result: Option<R>,
    pub error: Option<String>,
}
