use crate::error::Error;
use crate::record_store::RecordStore;
use crate::resource::Resource;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use trust_dns_client::rr::LowerName;

#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct InMemoryRecordStore {
    records: HashMap<LowerName, Resource>,
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get(&self, domain: &LowerName) -> Result<Resource, Error> {
        self.records.get(domain).cloned().ok_or(Error::NotFound)
    }

    async fn list(&self) -> Vec<Resource> {
        self.records.values().cloned().collect()
    }

    async fn put(&mut self, resource: Resource) -> Result<(), Error> {
        self.records.insert(resource.domain.clone(), resource);
        Ok(())
    }

    async fn update(&mut self, resource: Resource) -> Result<(), Error> {
        if !self.records.contains_key(&resource.domain) {
            return Err(Error::NotFound);
        }
        self.records.insert(resource.domain.clone(), resource);
        Ok(())
    }

    async fn replace_all(&mut self, resources: Vec<Resource>) -> Result<(), Error> {
        self.records = resources
            .into_iter()
            .map(|resource| (resource.domain.clone(), resource))
            .collect();
        Ok(())
    }

    async fn delete(&mut self, domain: &LowerName) -> Result<(), Error> {
        self.records.remove(domain).map(|_| ()).ok_or(Error::NotFound)
    }
}
