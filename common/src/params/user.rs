use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Raised when a user payload breaks one of the record invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: &'static str,
}

impl ValidationError {
    fn empty(field: &'static str) -> Self {
        Self {
            field,
            reason: "must not be empty",
        }
    }
}

/// Body of a create request. Every field except `description` is required.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateUserParams {
    /// The user's name. Must contain at least one non-whitespace character.
    pub name: String,

    /// The user's email address.
    pub email: String,

    /// Free-form description of the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The user's password, stored as provided.
    pub password: String,
}

impl CreateUserParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::empty("email"));
        }
        if self.password.is_empty() {
            return Err(ValidationError::empty("password"));
        }
        Ok(())
    }
}

/// Body of an update request. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UpdateUserParams {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ValidationError::empty("name"));
        }
        if self.email.as_deref().is_some_and(|e| e.trim().is_empty()) {
            return Err(ValidationError::empty("email"));
        }
        if self.password.as_deref().is_some_and(str::is_empty) {
            return Err(ValidationError::empty("password"));
        }
        Ok(())
    }
}
