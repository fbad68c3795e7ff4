use std::fmt::Display;

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use roster_common::{
    params::{CreateUserParams, UpdateUserParams},
    views::User,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbUser {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub password: String,
    /// Absent on documents written before the field existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<bson::DateTime>,
}

impl Display for DbUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DbUser {{ id: {}, name: {}, email: {} }}",
            self.id, self.name, self.email
        )
    }
}

impl DbUser {
    /// Build a fresh record with a newly generated id.
    pub fn new(params: CreateUserParams) -> Self {
        Self {
            id: ObjectId::new(),
            name: params.name,
            email: params.email,
            description: params.description,
            password: params.password,
            updated_at: Some(bson::DateTime::now()),
        }
    }

    /// Get the creation time of this user based on the ObjectId's timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.id.timestamp().to_system_time().into()
    }

    /// Last modification time, or the creation time for a record that was
    /// never stamped.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
            .map(|t| t.to_system_time().into())
            .unwrap_or_else(|| self.created_at())
    }

    /// Merge the fields present in `params` into this record.
    pub fn apply(&mut self, params: UpdateUserParams) {
        if let Some(name) = params.name {
            self.name = name;
        }
        if let Some(email) = params.email {
            self.email = email;
        }
        if let Some(description) = params.description {
            self.description = Some(description);
        }
        if let Some(password) = params.password {
            self.password = password;
        }
        self.updated_at = Some(bson::DateTime::now());
    }
}

impl From<DbUser> for User {
    fn from(value: DbUser) -> Self {
        Self {
            id: value.id.to_hex(),
            created_at: value.created_at(),
            updated_at: value.updated_at(),
            name: value.name,
            email: value.email,
            description: value.description,
        }
    }
}
