use std::sync::Arc;

use anyhow::Context;
use roster_auth::TokenCodec;
use roster_db::storage::{Storage, memory::MemoryStorage, mongodb::MongoDBStorage};
use tracing::info;

use crate::{
    auth::{AuthManager, BearerAuthProvider},
    config::{ApiConfig, StorageBackend},
};

#[derive(Debug, Clone)]
pub struct ApiContext {
    pub config: ApiConfig,
    pub db: Arc<dyn Storage>,
    pub auth_manager: Arc<AuthManager>,
}

impl ApiContext {
    pub fn new(config: ApiConfig, db: Arc<dyn Storage>, codec: TokenCodec) -> Self {
        let auth_manager = AuthManager::new().with_provider(BearerAuthProvider::new(codec));

        Self {
            config,
            db,
            auth_manager: Arc::new(auth_manager),
        }
    }

    /// Connect the configured storage backend and load the token secret.
    pub async fn from_config(config: ApiConfig) -> anyhow::Result<Self> {
        let secret = config.get_jwt_secret()?;
        let codec = TokenCodec::new(secret.as_bytes()).context("invalid JWT secret")?;

        let db: Arc<dyn Storage> = match config.storage {
            StorageBackend::Mongodb => {
                info!("Connecting to MongoDB");
                Arc::new(
                    MongoDBStorage::new(&config.mongodb_uri)
                        .await
                        .context("failed to connect to MongoDB")?,
                )
            }
            StorageBackend::Memory => {
                info!("Using in-memory storage, users will not survive a restart");
                Arc::new(MemoryStorage::new())
            }
        };

        Ok(Self::new(config, db, codec))
    }
}
