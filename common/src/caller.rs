use std::{fmt::Debug, sync::Arc};
use thiserror::Error;

/// Permission granted to callers whose token carries the admin flag.
pub const PERMISSION_ADMIN: &str = "admin";

#[derive(Debug, Error)]
pub enum CallerError {
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("An unspecified error occurred: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl CallerError {
    pub fn unauthorized(reason: Option<String>) -> Self {
        Self::Unauthorized {
            reason: reason.unwrap_or_else(|| "No reason provided".to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerKind {
    User,

    #[cfg(test)]
    MockCaller,
}

pub trait ApiCaller: Debug + Send + Sync {
    fn kind(&self) -> CallerKind;
    fn id(&self) -> anyhow::Result<String>;
    fn email(&self) -> Option<String>;
    fn permissions(&self) -> anyhow::Result<Vec<String>>;
}

/// The identity attached to a request once the auth guard has run.
#[derive(Debug, Clone)]
pub enum Caller {
    Authenticated(Arc<dyn ApiCaller>),
    Unauthenticated,
}

impl Caller {
    #[tracing::instrument(skip(self))]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Caller::Authenticated(_))
    }

    #[tracing::instrument(skip(self))]
    pub fn api_caller(&self) -> Result<Arc<dyn ApiCaller>, CallerError> {
        match self {
            Caller::Authenticated(api_caller) => Ok(api_caller.clone()),
            Caller::Unauthenticated => Err(CallerError::unauthorized(Some(
                "Caller is not authenticated".into(),
            ))),
        }
    }

    #[tracing::instrument(skip(self))]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Caller::Unauthenticated)
    }

    /// Whether the caller carries the admin flag. Never errors; a caller whose
    /// permissions can't be resolved is simply not an admin.
    pub fn is_admin(&self) -> bool {
        self.api_caller()
            .ok()
            .and_then(|c| c.permissions().ok())
            .is_some_and(|perms| perms.iter().any(|p| p == PERMISSION_ADMIN))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug)]
    struct MockApiCaller {
        id: String,
        permissions: Vec<String>,
    }

    impl ApiCaller for MockApiCaller {
        fn kind(&self) -> CallerKind {
            CallerKind::MockCaller
        }

        fn id(&self) -> anyhow::Result<String> {
            Ok(self.id.clone())
        }

        fn email(&self) -> Option<String> {
            None
        }

        fn permissions(&self) -> anyhow::Result<Vec<String>> {
            Ok(self.permissions.clone())
        }
    }

    fn mock(id: &str, permissions: &[&str]) -> Caller {
        Caller::Authenticated(Arc::new(MockApiCaller {
            id: id.to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }))
    }

    #[test]
    fn caller_authenticated_false_when_unauthenticated() {
        let caller = Caller::Unauthenticated;
        assert!(!caller.is_authenticated());
        assert!(caller.is_anonymous());
        assert!(caller.api_caller().is_err());
    }

    #[test]
    fn caller_authenticated_true_when_authenticated() {
        let caller = mock("user123", &["read"]);
        assert!(caller.is_authenticated());
        assert!(!caller.is_anonymous());
        assert_eq!(caller.api_caller().unwrap().id().unwrap(), "user123");
    }

    #[test]
    fn caller_is_admin_follows_permission() {
        assert!(mock("root", &[PERMISSION_ADMIN]).is_admin());
        assert!(!mock("plain", &["read"]).is_admin());
        assert!(!Caller::Unauthenticated.is_admin());
    }
}
