//! Zonekeeper
//!
//! A small record-management service for a DNS database. Resources (a domain
//! plus its answer records) are created, listed, replaced, and deleted over a
//! JSON HTTP(S) API guarded by a shared-secret token, and the bundled
//! [`client`] speaks the same wire contract the [`api`] serves.
//!
//! Record storage sits behind the [`record_store::RecordStore`] trait; how a
//! DNS frontend resolves queries against the stored records is outside this
//! crate.
//!
#![warn(clippy::pedantic)]

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod record_store;
pub mod resource;
pub mod tls;

use crate::record_store::{file, memory};
pub use api::new as new_http;
pub use client::ApiClient;
pub use config::{Config, SharedConfig};
pub use file::FileRecordStore;
pub use memory::InMemoryRecordStore;
pub use resource::{Answer, ApiError, ListOptions, Resource};
