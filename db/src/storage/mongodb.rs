use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database,
    bson::{self, Document, doc, oid::ObjectId},
    options::{FindOptions, ReturnDocument},
};
use roster_common::params::{CreateUserParams, UpdateUserParams};
use tracing::instrument;

use crate::{
    models::DbUser,
    storage::{Storage, StoreError, UserFilter, UserStore, parse_id},
};

#[derive(Debug)]
pub struct MongoDBStorage(Client);

impl MongoDBStorage {
    pub async fn new(uri: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(uri).await?;
        Ok(Self(client))
    }

    fn get_db(&self) -> Database {
        self.0
            .default_database()
            .unwrap_or_else(|| self.0.database(DEFAULT_DATABASE))
    }

    fn users(&self) -> Collection<DbUser> {
        self.get_db().collection::<DbUser>(MONGODB_COLLECTION_USERS)
    }
}

pub const DEFAULT_DATABASE: &str = "roster";
pub const MONGODB_COLLECTION_USERS: &str = "users";

fn filter_document(filter: UserFilter) -> Document {
    let mut filter_doc = doc! {};
    if let Some(ids) = filter.id {
        let ids: Vec<ObjectId> = ids.iter().filter_map(|id| parse_id(id)).collect();
        filter_doc.insert("_id", doc! { "$in": ids });
    }
    if let Some(emails) = filter.email {
        filter_doc.insert("email", doc! { "$in": emails });
    }
    filter_doc
}

fn update_document(params: UpdateUserParams) -> Document {
    let mut set = doc! { "updated_at": bson::DateTime::now() };
    if let Some(name) = params.name {
        set.insert("name", name);
    }
    if let Some(email) = params.email {
        set.insert("email", email);
    }
    if let Some(description) = params.description {
        set.insert("description", description);
    }
    if let Some(password) = params.password {
        set.insert("password", password);
    }
    doc! { "$set": set }
}

#[async_trait]
impl UserStore for MongoDBStorage {
    #[instrument(skip(self))]
    async fn list(&self, filter: UserFilter) -> Result<Vec<DbUser>, StoreError> {
        let find_options = FindOptions::builder().sort(doc! { "_id": 1 }).build();

        self.users()
            .find(filter_document(filter))
            .with_options(find_options)
            .await?
            .try_collect()
            .await
            .map_err(StoreError::MongoDB)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &str) -> Result<Option<DbUser>, StoreError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        Ok(self.users().find_one(doc! { "_id": oid }).await?)
    }

    #[instrument(skip_all)]
    async fn create(&self, params: CreateUserParams) -> Result<DbUser, StoreError> {
        let user = DbUser::new(params);
        self.users().insert_one(&user).await?;
        Ok(user)
    }

    #[instrument(skip(self, params))]
    async fn update(
        &self,
        id: &str,
        params: UpdateUserParams,
    ) -> Result<Option<DbUser>, StoreError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        Ok(self
            .users()
            .find_one_and_update(doc! { "_id": oid }, update_document(params))
            .return_document(ReturnDocument::After)
            .await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<Option<DbUser>, StoreError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        Ok(self.users().find_one_and_delete(doc! { "_id": oid }).await?)
    }
}

#[async_trait]
impl Storage for MongoDBStorage {
    async fn ping(&self) -> Result<(), StoreError> {
        self.get_db().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
