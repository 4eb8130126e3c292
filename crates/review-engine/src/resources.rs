//! Saved searches exposed as readable resources.
//!
//! A resource URI carries its filter expression percent-encoded in the last
//! path segment, `anki://search/is%3Adue` being the search `is:due`. The
//! catalog lists three of them, but any URI of that shape can be read.

use reqwest::Url;
use tracing::debug;

use crate::backend::Backend;
use crate::query::QueryEngine;
use crate::{Error, Result};

/// MIME type of every resource body.
pub const MIME_JSON: &str = "application/json";

/// A static catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

const CATALOG: [ResourceDescriptor; 3] = [
    ResourceDescriptor {
        uri: "anki://search/deck%3Acurrent",
        name: "Current deck",
        description: "All cards in the currently selected deck",
        mime_type: MIME_JSON,
    },
    ResourceDescriptor {
        uri: "anki://search/is%3Adue",
        name: "Due cards",
        description: "Cards in review or learning that are due now",
        mime_type: MIME_JSON,
    },
    ResourceDescriptor {
        uri: "anki://search/is%3Anew",
        name: "New cards",
        description: "Cards that have never been studied",
        mime_type: MIME_JSON,
    },
];

/// The fixed resource catalog. Never touches the backend.
pub fn list_resources() -> &'static [ResourceDescriptor] {
    &CATALOG
}

/// The contents of a resource read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBody {
    pub uri: String,
    pub mime_type: &'static str,
    pub text: String,
}

/// Extract the filter expression from a resource URI.
///
/// ```
/// use review_engine::resources::filter_from_uri;
///
/// assert_eq!(filter_from_uri("anki://search/is%3Adue").unwrap(), "is:due");
/// assert_eq!(
///     filter_from_uri("anki://search/deck%3A%22Spanish%20Verbs%22").unwrap(),
///     "deck:\"Spanish Verbs\""
/// );
/// assert!(filter_from_uri("anki://search/").is_err());
/// ```
pub fn filter_from_uri(uri: &str) -> Result<String> {
    let invalid = || Error::InvalidResourceUri(uri.to_string());

    let url = Url::parse(uri).map_err(|_| invalid())?;
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .ok_or_else(invalid)?;

    let filter = urlencoding::decode(segment).map_err(|_| invalid())?;
    Ok(filter.into_owned())
}

/// Run the search a resource URI names and render the cards as JSON.
pub async fn read_resource(backend: &dyn Backend, uri: &str) -> Result<ResourceBody> {
    let filter = filter_from_uri(uri)?;
    debug!(uri, filter = %filter, "Reading resource");

    let cards = QueryEngine::new(backend).cards(&filter).await?;
    Ok(ResourceBody {
        uri: uri.to_string(),
        mime_type: MIME_JSON,
        text: serde_json::to_string_pretty(&cards)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_stable() {
        let names: Vec<_> = list_resources().iter().map(|r| r.name).collect();
        assert_eq!(names, ["Current deck", "Due cards", "New cards"]);
        assert!(list_resources().iter().all(|r| r.mime_type == MIME_JSON));
    }

    #[test]
    fn test_catalog_uris_decode_to_filters() {
        let filters: Vec<_> = list_resources()
            .iter()
            .map(|r| filter_from_uri(r.uri).unwrap())
            .collect();
        assert_eq!(filters, ["deck:current", "is:due", "is:new"]);
    }

    #[test]
    fn test_uses_last_segment() {
        assert_eq!(filter_from_uri("anki://search/nested/is%3Anew").unwrap(), "is:new");
        assert_eq!(filter_from_uri("anki://search/tag:verb").unwrap(), "tag:verb");
    }

    #[test]
    fn test_rejects_unusable_uris() {
        for uri in ["not a uri", "anki://search/", "anki://search", "anki:"] {
            let err = filter_from_uri(uri).unwrap_err();
            assert!(matches!(err, Error::InvalidResourceUri(_)), "{uri}: {err}");
        }
    }
}
