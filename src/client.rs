//! Client for the record-management API.
//!
//! Operations mirror the [`api`][crate::api] routes one-to-one and exchange
//! the same [`resource`][crate::resource] shapes, so the two sides stay
//! bit-compatible. Each call sends one request with a bounded timeout and no
//! retries; retry policy belongs to the caller.

use crate::config::DEFAULT_AUTH_HEADER;
use crate::resource::{ApiError, ListOptions, Resource};
use reqwest::{Method, RequestBuilder, Response};
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use trust_dns_client::rr::LowerName;

const RECORDS: &str = "/records";

/// Timeout applied to every request unless overridden with
/// [`ApiClient::with_timeout`].
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// `ClientError` separates failures the server reported from failures to
/// reach the server at all, so callers can tell "server said no" from
/// "couldn't ask".
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// The server answered with an [`ApiError`] body; carries its message.
    #[error("{0}")]
    Api(String),

    /// The request never completed: connection, timeout, or URL failure.
    #[error("transport error")]
    Transport(#[source] reqwest::Error),

    /// The response body couldn't be decoded as the expected JSON shape.
    #[error("bad JSON in response body")]
    BadJson(#[source] reqwest::Error),

    /// The raw-dump sink refused the response bytes.
    #[error("failed to write response body to sink")]
    Sink(#[from] std::io::Error),
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    auth_header: String,
    token: String,
}

impl ApiClient {
    /// Build a client for the API at `base_url`, authenticating every request
    /// with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when the underlying HTTP client
    /// can't be constructed.
    pub fn new(base_url: &str, token: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Transport)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: DEFAULT_AUTH_HEADER.to_string(),
            token: token.to_string(),
        })
    }

    /// Send the token in a non-default header, matching a server configured
    /// with a custom `auth_header`.
    #[must_use]
    pub fn with_auth_header(mut self, header: &str) -> Self {
        self.auth_header = header.to_string();
        self
    }

    /// Replace the default request timeout. Requests still never block
    /// indefinitely; they fail with [`ClientError::Transport`] once the
    /// timeout elapses.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when the underlying HTTP client
    /// can't be rebuilt.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ClientError> {
        self.http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Transport)?;
        Ok(self)
    }

    /// List every resource, decoded into [`Resource`] values. Without
    /// options the server strips answer detail; pass
    /// [`ListOptions { full: true }`][ListOptions] for complete answers.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] for server-reported failures,
    /// [`ClientError::Transport`]/[`ClientError::BadJson`] otherwise.
    pub async fn get_records(
        &self,
        options: Option<&ListOptions>,
    ) -> Result<Vec<Resource>, ClientError> {
        decode(self.send(self.list_request(options)).await?).await
    }

    /// Stream the raw bytes of the list response into `sink` instead of
    /// decoding them. The typed path is [`ApiClient::get_records`]; the
    /// caller picks one explicitly.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::get_records`], plus [`ClientError::Sink`] when the
    /// sink refuses the bytes.
    pub async fn dump_records<W>(
        &self,
        options: Option<&ListOptions>,
        sink: &mut W,
    ) -> Result<(), ClientError>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut response = self.send(self.list_request(options)).await?;
        while let Some(chunk) = response.chunk().await.map_err(ClientError::Transport)? {
            sink.write_all(&chunk).await?;
        }
        sink.flush().await?;
        Ok(())
    }

    /// Fetch one resource by domain.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] carries the server's "not found" message when
    /// the domain isn't stored.
    pub async fn get_record(&self, domain: &LowerName) -> Result<Resource, ClientError> {
        let request = self.request(Method::GET, &format!("{RECORDS}/{domain}"));
        decode(self.send(request).await?).await
    }

    /// Store a resource, overwriting any previous resource for its domain.
    /// Returns the stored value as the server echoed it.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_records`].
    pub async fn add_record(&self, resource: &Resource) -> Result<Resource, ClientError> {
        let request = self.request(Method::POST, RECORDS).json(resource);
        decode(self.send(request).await?).await
    }

    /// Replace the answer set of an existing resource, addressed by the
    /// domain inside `resource`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_record`].
    pub async fn update_record(&self, resource: &Resource) -> Result<Resource, ClientError> {
        let request = self
            .request(Method::PUT, &format!("{RECORDS}/{}", resource.domain))
            .json(resource);
        decode(self.send(request).await?).await
    }

    /// Replace the server's entire record set with exactly `resources`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_records`].
    pub async fn replace_records(
        &self,
        resources: &[Resource],
    ) -> Result<Vec<Resource>, ClientError> {
        let request = self.request(Method::PUT, RECORDS).json(&resources);
        decode(self.send(request).await?).await
    }

    /// Remove the resource for `domain`. Deleting a domain that isn't stored
    /// fails; deletion is not idempotent.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get_record`].
    pub async fn delete_record(&self, domain: &LowerName) -> Result<(), ClientError> {
        let request = self.request(Method::DELETE, &format!("{RECORDS}/{domain}"));
        self.send(request).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{path}", self.base_url))
            .header(self.auth_header.as_str(), self.token.as_str())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json")
    }

    fn list_request(&self, options: Option<&ListOptions>) -> RequestBuilder {
        let mut request = self.request(Method::GET, RECORDS);
        if let Some(options) = options {
            let pairs = options.query_pairs();
            if !pairs.is_empty() {
                request = request.query(&pairs);
            }
        }
        request
    }

    /// Send the request and split the outcome three ways: transport failure,
    /// server-reported [`ApiError`], or a success response for the caller to
    /// decode.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(ClientError::Transport)?;
        if response.status().is_success() {
            return Ok(response);
        }
        let failure: ApiError = response.json().await.map_err(ClientError::BadJson)?;
        Err(ClientError::Api(failure.error))
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response.json().await.map_err(ClientError::BadJson)
}
