use std::sync::Arc;

use chrono::{Duration, Utc};
use roster_common::caller::{ApiCaller, Caller, CallerKind, PERMISSION_ADMIN};
use serde::{Deserialize, Serialize};

use crate::TokenError;

/// Claims carried by a roster bearer token.
///
/// The subject is serialized as `_id`, the shape issued by the login flow;
/// tokens that use the registered `sub` claim instead are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject - the id of the user the token was issued for
    #[serde(rename = "_id", alias = "sub")]
    pub sub: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    /// Issued at timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiry timestamp. Only enforced when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenClaims {
    pub fn new(sub: impl Into<String>, email: impl Into<String>, is_admin: bool) -> Self {
        Self {
            sub: sub.into(),
            email: email.into(),
            is_admin,
            iat: Some(Utc::now().timestamp()),
            exp: None,
        }
    }

    /// Expire the token `ttl` after its issue time.
    pub fn with_ttl(mut self, ttl: Duration) -> Result<Self, TokenError> {
        let iat = self.iat.unwrap_or_else(|| Utc::now().timestamp());
        let exp = iat
            .checked_add(ttl.num_seconds())
            .ok_or(TokenError::TtlOutOfRange)?;
        self.exp = Some(exp);
        Ok(self)
    }

    pub fn into_caller(self) -> Caller {
        Caller::Authenticated(Arc::new(self))
    }
}

impl ApiCaller for TokenClaims {
    fn kind(&self) -> CallerKind {
        CallerKind::User
    }

    fn id(&self) -> anyhow::Result<String> {
        Ok(self.sub.clone())
    }

    fn email(&self) -> Option<String> {
        Some(self.email.clone())
    }

    fn permissions(&self) -> anyhow::Result<Vec<String>> {
        if self.is_admin {
            Ok(vec![PERMISSION_ADMIN.to_string()])
        } else {
            Ok(vec![])
        }
    }
}
