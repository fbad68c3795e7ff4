use async_trait::async_trait;
use roster_common::params::{CreateUserParams, UpdateUserParams};
use tokio::sync::RwLock;

use crate::{
    models::DbUser,
    storage::{Storage, StoreError, UserFilter, UserStore, parse_id},
};

/// Process-local storage. Records are kept in insertion order and vanish
/// with the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    users: RwLock<Vec<DbUser>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(filter: &UserFilter, user: &DbUser) -> bool {
    let id_ok = filter
        .id
        .as_ref()
        .is_none_or(|ids| ids.iter().any(|id| parse_id(id) == Some(user.id)));
    let email_ok = filter
        .email
        .as_ref()
        .is_none_or(|emails| emails.contains(&user.email));
    id_ok && email_ok
}

#[async_trait]
impl UserStore for MemoryStorage {
    async fn list(&self, filter: UserFilter) -> Result<Vec<DbUser>, StoreError> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| matches(&filter, u)).cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<DbUser>, StoreError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == oid).cloned())
    }

    async fn create(&self, params: CreateUserParams) -> Result<DbUser, StoreError> {
        let user = DbUser::new(params);
        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: &str,
        params: UpdateUserParams,
    ) -> Result<Option<DbUser>, StoreError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.id == oid).map(|user| {
            user.apply(params);
            user.clone()
        }))
    }

    async fn delete(&self, id: &str) -> Result<Option<DbUser>, StoreError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        let mut users = self.users.write().await;
        let idx = users.iter().position(|u| u.id == oid);
        Ok(idx.map(|idx| users.remove(idx)))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
