//! A JSON file-backed implementation of the [`RecordStore`][super::RecordStore]
//! trait.
//!
//! Wraps an [`InMemoryRecordStore`][super::memory::InMemoryRecordStore]
//! instance, persisting updates to a JSON file on disk that can be reloaded
//! across restarts.
use crate::error::Error;
use crate::record_store::memory::InMemoryRecordStore;
use crate::record_store::RecordStore;
use crate::resource::Resource;
use std::io::ErrorKind;
use tokio::fs::File;
use tokio::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use trust_dns_client::rr::LowerName;

/// A file-backed record store. After each mutation the JSON file on disk is
/// updated with the new data. This file can be reloaded across restarts to
/// avoid losing state.
///
/// Wraps an [`InMemoryRecordStore`][super::memory::InMemoryRecordStore],
/// operating the same way except for maintaining state beyond in-memory.
#[derive(Default, Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct FileRecordStore {
    records: InMemoryRecordStore,
    path: String,
}

impl FileRecordStore {
    /// Save the state of the record store as JSON to the store's configured
    /// path, or return an Error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJSON`] if a resource in the store can't be
    /// serialized to JSON.
    ///
    /// Returns [`Error::IO`] if the serialized state can't be written to the
    /// backing file path.
    pub async fn save(&self) -> Result<(), Error> {
        let data = serde_json::to_string_pretty(&self.records)?;
        let mut output_file = File::create(&self.path).await?;
        output_file.write_all(data.as_bytes()).await?;
        output_file.flush().await?;
        Ok(())
    }

    /// Load a [`FileRecordStore`] from the JSON state located at the given
    /// path, or return an Error. A missing file is created empty rather than
    /// treated as a failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJSON`] if the JSON state file is invalid.
    ///
    /// Returns [`Error::IO`] if the path can't be opened or read.
    pub async fn try_from_file(p: &str) -> Result<Self, Error> {
        let contents = match File::open(p).await {
            Ok(mut f) => {
                let mut buf = vec![];
                f.read_to_end(&mut buf).await?;
                buf
            }
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Self::write_empty_state(File::create(&p).await?).await?,
                _ => return Err(Error::IO(err)),
            },
        };

        let records: InMemoryRecordStore = serde_json::from_slice(&contents)?;
        Ok(Self {
            path: p.to_string(),
            records,
        })
    }

    async fn write_empty_state(mut f: File) -> io::Result<Vec<u8>> {
        let default_data = serde_json::to_string_pretty(&InMemoryRecordStore::default())?;
        let default_bytes = default_data.as_bytes();
        f.write_all(default_bytes).await?;
        f.flush().await?;
        Ok(default_bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl RecordStore for FileRecordStore {
    async fn get(&self, domain: &LowerName) -> Result<Resource, Error> {
        self.records.get(domain).await
    }

    async fn list(&self) -> Vec<Resource> {
        self.records.list().await
    }

    async fn put(&mut self, resource: Resource) -> Result<(), Error> {
        self.records.put(resource).await?;
        self.save().await
    }

    async fn update(&mut self, resource: Resource) -> Result<(), Error> {
        self.records.update(resource).await?;
        self.save().await
    }

    async fn replace_all(&mut self, resources: Vec<Resource>) -> Result<(), Error> {
        self.records.replace_all(resources).await?;
        self.save().await
    }

    async fn delete(&mut self, domain: &LowerName) -> Result<(), Error> {
        self.records.delete(domain).await?;
        self.save().await
    }
}
