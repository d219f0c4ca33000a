//! Wire shapes shared by the API server and the client library.
//!
//! Both sides of the HTTP contract encode and decode exactly these types, so
//! the request builder in [`client`][crate::client] can't drift from what the
//! routes in [`api`][crate::api] accept.

use serde::{Deserialize, Serialize};
use trust_dns_client::rr::{LowerName, Name, RecordType};

use crate::error::Error;

/// Record class applied to answers that don't specify one.
const DEFAULT_CLASS: &str = "IN";

/// A managed domain and the answer records served for it.
///
/// A domain maps to at most one resource. Answers are only ever replaced as a
/// whole set; there is no partial-answer patch operation.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Resource {
    /// The domain the answers belong to. Case-insensitive; must be non-empty
    /// and a syntactically valid DNS name.
    pub domain: LowerName,
    /// The answer set. Omitted from JSON when empty, which is also the shape
    /// list responses use unless full detail was requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<Answer>,
}

impl Resource {
    /// Copy of this resource with the answer detail stripped.
    #[must_use]
    pub fn summary(&self) -> Self {
        Resource {
            domain: self.domain.clone(),
            answers: Vec::new(),
        }
    }

    /// Check that the resource names a non-empty domain.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyDomain`] when the domain has no labels.
    pub fn validate(&self) -> Result<(), Error> {
        if Name::from(&self.domain).num_labels() == 0 {
            return Err(Error::EmptyDomain);
        }
        Ok(())
    }
}

/// One answer record belonging to a [`Resource`].
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq)]
pub struct Answer {
    /// Record type, serialized in its presentation form (`"A"`, `"MX"`, ...).
    #[serde(rename = "type")]
    pub kind: RecordType,
    #[serde(default = "default_class")]
    pub class: String,
    /// Record data in presentation form; its meaning depends on `kind`.
    pub value: String,
    pub ttl: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
}

fn default_class() -> String {
    DEFAULT_CLASS.to_string()
}

/// The body of every non-2xx API response.
///
/// The client treats the presence of this shape in a response body as the
/// failure signal, independent of status code parsing nuances.
#[derive(Serialize, Deserialize, Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
}

/// Options accepted by the list operation.
///
/// The server deserializes these from the request query string; the client
/// encodes them with [`ListOptions::query_pairs`]. Sharing the type keeps the
/// two ends of the query contract identical.
#[derive(Deserialize, Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ListOptions {
    /// Request complete answer detail instead of a domains-only summary.
    #[serde(default)]
    pub full: bool,
}

impl ListOptions {
    /// Encode every non-default option as a URL query pair.
    ///
    /// Each known option has its own encoder arm here; defaulted options are
    /// left out entirely so an all-default value encodes to no query string.
    #[must_use]
    pub fn query_pairs(self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if self.full {
            pairs.push(("full", true.to_string()));
        }
        pairs
    }
}
