//! Resource storage.
//!
//! Supports a generic interface for storing [`Resource`]s keyed by their
//! domain. Handlers go through this interface only; how records are persisted
//! or indexed is the store's own business.
//!
//! Two implementations are provided, [`memory::InMemoryRecordStore`] and
//! [`file::FileRecordStore`]. The former is not durable across restarts. The
//! latter writes its state to disk after each mutation and loads that state
//! again on startup.

use crate::error::Error;
use crate::resource::Resource;
use std::sync::Arc;
use tokio::sync::RwLock;
use trust_dns_client::rr::LowerName;

pub mod file;
pub mod memory;

#[allow(clippy::module_name_repetitions)]
pub use file::FileRecordStore;
#[allow(clippy::module_name_repetitions)]
pub use memory::InMemoryRecordStore;

/// `DynRecordStore` is a type alias for a [`RecordStore`] that can be used by
/// multiple read/write consumers that coordinate through an [`Arc`] and a
/// [`RwLock`] wrapping the [`RecordStore`].
#[allow(clippy::module_name_repetitions)]
pub type DynRecordStore = Arc<RwLock<dyn RecordStore + Send + Sync>>;

/// An async trait describing storage of [`Resource`]s, keyed by the domain
/// they are served for.
///
/// Writes to the same domain are ordered by the surrounding lock; the store
/// itself makes no atomicity promise beyond one call at a time.
#[async_trait::async_trait]
pub trait RecordStore {
    /// Fetch the resource stored for the given domain.
    async fn get(&self, domain: &LowerName) -> Result<Resource, Error>;

    /// Every stored resource, in no particular order.
    async fn list(&self) -> Vec<Resource>;

    /// Store a resource, replacing any previous resource for the same domain.
    async fn put(&mut self, resource: Resource) -> Result<(), Error>;

    /// Replace an existing resource's answer set.
    ///
    /// Unlike [`RecordStore::put`] this fails with [`Error::NotFound`] when
    /// no resource is stored for the domain.
    async fn update(&mut self, resource: Resource) -> Result<(), Error>;

    /// Replace the entire store contents with exactly the given resources.
    /// Domains absent from the new set are gone afterwards.
    async fn replace_all(&mut self, resources: Vec<Resource>) -> Result<(), Error>;

    /// Remove the resource for the given domain.
    ///
    /// Deleting a domain that isn't stored fails with [`Error::NotFound`];
    /// deletion is intentionally not idempotent so caller mistakes surface.
    async fn delete(&mut self, domain: &LowerName) -> Result<(), Error>;
}
