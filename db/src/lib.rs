//! Persistence for roster users.
//!
//! [`storage::Storage`] is the seam the API talks to. Two backends implement
//! it: [`storage::mongodb::MongoDBStorage`] for deployments and
//! [`storage::memory::MemoryStorage`] for tests and throwaway local runs.

pub mod models;
pub mod storage;
