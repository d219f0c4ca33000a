use crate::error::Error;
use crate::record_store::{DynRecordStore, FileRecordStore, InMemoryRecordStore};
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use std::fs::File;
use std::io::BufReader;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use trust_dns_client::rr::LowerName;

pub type SharedConfig = Arc<Config>;

/// Header the shared-secret token is read from unless overridden by
/// [`Config::auth_header`].
pub const DEFAULT_AUTH_HEADER: &str = "X-AUTH-TOKEN";

#[serde_as]
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// Address the HTTP API binds to.
    pub api_bind_addr: SocketAddr,
    /// Shared-secret token every API request must present.
    pub api_token: String,
    /// Header carrying the token.
    #[serde(default = "default_auth_header")]
    pub auth_header: String,
    /// Serve plaintext HTTP instead of TLS.
    #[serde(default)]
    pub insecure: bool,
    /// PEM certificate chain for the API listener. When unset (and `insecure`
    /// is false) a self-signed certificate is generated for `api_domain`.
    #[serde(default)]
    pub api_cert_path: Option<String>,
    /// PEM private key matching `api_cert_path`.
    #[serde(default)]
    pub api_key_path: Option<String>,
    /// Domain the API is served under; subject of generated certificates.
    pub api_domain: LowerName,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub api_timeout: Duration,
    /// Path the record store persists its state to. The store is in-memory
    /// only when unset.
    #[serde(default)]
    pub record_state_path: Option<String>,
}

fn default_auth_header() -> String {
    DEFAULT_AUTH_HEADER.to_string()
}

impl Config {
    /// Load a `Config` from the JSON file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] if the path can't be opened, or
    /// [`Error::InvalidJSON`] if its content doesn't parse.
    pub fn try_from_file(p: impl AsRef<Path>) -> Result<Self, Error> {
        let f = File::open(p)?;
        let reader = BufReader::new(f);
        let conf: Config = serde_json::from_reader(reader)?;
        Ok(conf)
    }

    /// Build the record store this config calls for: file-backed when a state
    /// path is configured, in-memory otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IO`] or [`Error::InvalidJSON`] when the configured
    /// state file exists but can't be read or parsed.
    pub async fn record_store(&self) -> Result<DynRecordStore, Error> {
        Ok(match &self.record_state_path {
            Some(path) => Arc::new(RwLock::new(FileRecordStore::try_from_file(path).await?)),
            None => Arc::new(RwLock::new(InMemoryRecordStore::default())),
        })
    }
}
