//! Error types.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use trust_dns_proto::error::ProtoError;

/// Error enumerates the possible zonekeeper error states.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Returned when a request's shared-secret header is missing or doesn't
    /// match the configured [`Config::api_token`][`crate::config::Config::api_token`].
    ///
    /// Carries no detail about which part of the check failed.
    #[error("unauthorized")]
    Unauthorized,

    /// Returned when no resource is stored for the requested domain, or a
    /// request names a route that doesn't exist.
    #[error("not found")]
    NotFound,

    /// Returned when a resource payload or path parameter names an empty
    /// domain.
    #[error("resource domain must not be empty")]
    EmptyDomain,

    /// Returned when a request body isn't valid JSON, or its JSON doesn't
    /// match the expected shape.
    #[error("bad JSON syntax received in body")]
    BadJson(#[source] JsonRejection),

    /// Returned when a request body can't be read from the connection.
    #[error("body read failed")]
    BodyReadFail(#[source] JsonRejection),

    /// Returned when a request's query string can't be parsed.
    #[error("bad query string")]
    BadQuery(#[from] QueryRejection),

    /// Returned when a path parameter isn't a syntactically valid DNS name.
    #[error("invalid domain name")]
    BadDomain(#[from] ProtoError),

    /// Returned when a generic IO error occurs.
    #[error("an IO error occurred")]
    IO(#[from] std::io::Error),

    /// Returned when processing JSON from disk (e.g. trying to load a
    /// [`Config`][crate::config::Config::try_from_file], or trying to load a
    /// [`FileRecordStore`][crate::record_store::FileRecordStore::try_from_file])
    /// fails due to invalid JSON content.
    #[error("invalid JSON")]
    InvalidJSON(#[from] serde_json::Error),

    /// Returned when a self-signed API certificate can't be generated.
    #[error("failed to generate TLS certificate")]
    Tls(#[from] rcgen::RcgenError),

    /// Returned when the plaintext HTTP listener stops serving.
    #[error("API stopped")]
    ApiStopped(#[from] hyper::Error),
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        if matches!(rejection, JsonRejection::BytesRejection(_)) {
            Error::BodyReadFail(rejection)
        } else {
            Error::BadJson(rejection)
        }
    }
}
