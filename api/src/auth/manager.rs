use std::fmt;

use axum::http::request::Parts;
use roster_common::caller::Caller;
use tracing::{debug, instrument, trace};

use super::{error::AuthError, provider::AuthProvider};

/// Coordinates multiple authentication providers in priority order.
///
/// The `AuthManager` tries each registered provider until one successfully
/// authenticates the request. Providers are tried in registration order.
///
/// # Flow
///
/// 1. Request comes in with some credentials (bearer token, ...)
/// 2. AuthManager asks each provider if it can authenticate
/// 3. If provider returns `MissingCredentials`, try next provider
/// 4. If provider returns success, return the `Caller`
/// 5. If provider returns other error, fail immediately (stop trying)
///
/// # Examples
///
/// ```rust,ignore
/// let auth_manager = AuthManager::new()
///     .with_provider(BearerAuthProvider::new(codec));
///
/// // In extractor:
/// let caller = auth_manager.authenticate(&request_parts).await?;
/// ```
pub struct AuthManager {
    providers: Vec<Box<dyn AuthProvider>>,
}

impl AuthManager {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    pub fn with_provider<P: AuthProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Try each provider in order until one succeeds
    #[instrument(skip_all)]
    pub async fn authenticate(&self, parts: &Parts) -> Result<Caller, AuthError> {
        for provider in &self.providers {
            trace!(scheme = provider.scheme(), "Trying auth provider");

            match provider.authenticate(parts).await {
                Ok(caller) => {
                    debug!(scheme = provider.scheme(), "Auth succeeded");
                    return Ok(caller);
                }
                Err(AuthError::MissingCredentials) => {
                    trace!(scheme = provider.scheme(), "No credentials for this scheme");
                    continue;
                }
                Err(e) => {
                    debug!(scheme = provider.scheme(), error = %e, "Auth failed");
                    return Err(e);
                }
            }
        }

        Err(AuthError::MissingCredentials)
    }
}

impl Default for AuthManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let schemes: Vec<&str> = self.providers.iter().map(|p| p.scheme()).collect();
        f.debug_struct("AuthManager")
            .field("schemes", &schemes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use axum::http::Request;
    use roster_auth::TokenClaims;

    use super::*;

    enum Outcome {
        Missing,
        Invalid,
        Accept,
    }

    struct FixedProvider {
        outcome: Outcome,
        calls: Arc<AtomicUsize>,
    }

    impl FixedProvider {
        fn new(outcome: Outcome) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    outcome,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl AuthProvider for FixedProvider {
        async fn authenticate(&self, _parts: &Parts) -> Result<Caller, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Outcome::Missing => Err(AuthError::MissingCredentials),
                Outcome::Invalid => Err(AuthError::InvalidCredentials),
                Outcome::Accept => Ok(TokenClaims::new("abc", "a@b.c", false).into_caller()),
            }
        }

        fn scheme(&self) -> &'static str {
            "fixed"
        }
    }

    fn parts() -> Parts {
        Request::builder().body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn empty_manager_reports_missing_credentials() {
        let result = AuthManager::new().authenticate(&parts()).await;
        assert!(matches!(result, Err(AuthError::MissingCredentials)));
    }

    #[tokio::test]
    async fn skips_providers_without_credentials() {
        let (missing, missing_calls) = FixedProvider::new(Outcome::Missing);
        let (accept, accept_calls) = FixedProvider::new(Outcome::Accept);
        let manager = AuthManager::new().with_provider(missing).with_provider(accept);

        let caller = manager.authenticate(&parts()).await.unwrap();

        assert!(caller.is_authenticated());
        assert_eq!(missing_calls.load(Ordering::SeqCst), 1);
        assert_eq!(accept_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stops_at_first_hard_failure() {
        let (invalid, _) = FixedProvider::new(Outcome::Invalid);
        let (accept, accept_calls) = FixedProvider::new(Outcome::Accept);
        let manager = AuthManager::new().with_provider(invalid).with_provider(accept);

        let result = manager.authenticate(&parts()).await;

        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        assert_eq!(accept_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn debug_lists_schemes() {
        let (p, _) = FixedProvider::new(Outcome::Accept);
        let manager = AuthManager::new().with_provider(p);
        assert_eq!(format!("{manager:?}"), r#"AuthManager { schemes: ["fixed"] }"#);
    }
}
