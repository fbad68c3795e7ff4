use std::fmt::Debug;

use async_trait::async_trait;
use ::mongodb::bson::oid::ObjectId;
use roster_common::params::{CreateUserParams, UpdateUserParams};
use thiserror::Error;

use crate::models::DbUser;

pub mod memory;
pub mod mongodb;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Query Error: {0}")]
    MongoDB(#[from] ::mongodb::error::Error),
}

#[async_trait]
pub trait Storage: UserStore + Debug + Send + Sync + 'static {
    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct UserFilter {
    pub id: Option<Vec<String>>,
    pub email: Option<Vec<String>>,
}

/// Lookups take the id as the client sent it. An id that isn't a valid
/// ObjectId can't name a record, so it resolves to `None` like any other
/// missing user.
#[async_trait]
pub trait UserStore {
    /// All users matching `filter`, oldest first.
    async fn list(&self, filter: UserFilter) -> Result<Vec<DbUser>, StoreError>;
    async fn get(&self, id: &str) -> Result<Option<DbUser>, StoreError>;
    async fn create(&self, params: CreateUserParams) -> Result<DbUser, StoreError>;
    /// Returns the record as it is after the update.
    async fn update(
        &self,
        id: &str,
        params: UpdateUserParams,
    ) -> Result<Option<DbUser>, StoreError>;
    /// Returns the record as it was before removal.
    async fn delete(&self, id: &str) -> Result<Option<DbUser>, StoreError>;
}

pub(crate) fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}
