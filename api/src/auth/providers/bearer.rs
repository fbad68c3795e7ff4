//! Bearer token authentication provider.
//!
//! Validates `Authorization: Bearer <jwt>` headers against the configured
//! HS256 secret. The token's claims become the request's [`Caller`]; nothing
//! is looked up in storage, so a token stays valid for as long as its
//! signature does (or until its `exp`, when it has one).

use async_trait::async_trait;
use axum::http::{header, request::Parts};
use roster_auth::TokenCodec;
use roster_common::caller::Caller;
use tracing::{debug, instrument};

use crate::auth::{error::AuthError, provider::AuthProvider};

const BEARER_SCHEME: &str = "Bearer";

#[derive(Debug, Clone)]
pub struct BearerAuthProvider {
    codec: TokenCodec,
}

impl BearerAuthProvider {
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    /// Extract Bearer token from Authorization header. The scheme name is
    /// matched case-insensitively.
    fn extract_bearer_token(headers: &header::HeaderMap) -> Option<String> {
        let (scheme, token) = headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .split_once(' ')?;

        scheme
            .eq_ignore_ascii_case(BEARER_SCHEME)
            .then(|| token.trim().to_string())
    }
}

#[async_trait]
impl AuthProvider for BearerAuthProvider {
    #[instrument(skip(self, parts), fields(scheme = "bearer"))]
    async fn authenticate(&self, parts: &Parts) -> Result<Caller, AuthError> {
        let token =
            Self::extract_bearer_token(&parts.headers).ok_or(AuthError::MissingCredentials)?;

        debug!("Found Bearer token, decoding JWT...");

        let claims = self.codec.verify(&token)?;

        debug!(sub = %claims.sub, is_admin = claims.is_admin, "JWT decoded successfully");

        Ok(claims.into_caller())
    }

    fn scheme(&self) -> &'static str {
        "bearer"
    }
}
