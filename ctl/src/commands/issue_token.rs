use chrono::Duration;
use clap::Parser;
use roster_auth::{TokenClaims, TokenCodec};
use roster_db::storage::{UserFilter, UserStore};

#[derive(Clone, Parser)]
pub struct IssueTokenParams {
    /// Email of the user the token is issued for.
    #[clap(short, long)]
    pub email: String,

    /// Mark the token holder as an admin.
    #[clap(long, default_value_t = false)]
    pub admin: bool,

    /// Expire the token after this many minutes. Without it the token never
    /// expires.
    #[clap(long)]
    pub ttl_minutes: Option<i64>,

    #[clap(long, env = "JWT_SECRET_KEY", hide_env_values = true)]
    pub jwt_secret: String,
}

pub async fn issue_token(stg: &impl UserStore, params: IssueTokenParams) -> anyhow::Result<String> {
    let codec = TokenCodec::new(params.jwt_secret.as_bytes())?;

    let user = UserStore::list(
        stg,
        UserFilter {
            id: None,
            email: Some(vec![params.email.clone()]),
        },
    )
    .await?
    .into_iter()
    .next()
    .ok_or_else(|| anyhow::anyhow!("no user with email {}", params.email))?;

    let mut claims = TokenClaims::new(user.id.to_hex(), user.email, params.admin);
    if let Some(minutes) = params.ttl_minutes {
        let ttl = Duration::try_minutes(minutes)
            .ok_or_else(|| anyhow::anyhow!("--ttl-minutes {minutes} is out of range"))?;
        claims = claims.with_ttl(ttl)?;
    }

    Ok(codec.issue(&claims)?)
}

#[cfg(test)]
mod tests {
    use roster_common::params::CreateUserParams;
    use roster_db::storage::memory::MemoryStorage;

    use super::*;

    const SECRET: &str = "alguma-senha-secreta";

    fn params(email: &str, ttl_minutes: Option<i64>) -> IssueTokenParams {
        IssueTokenParams {
            email: email.into(),
            admin: true,
            ttl_minutes,
            jwt_secret: SECRET.into(),
        }
    }

    async fn seeded() -> (MemoryStorage, String) {
        let stg = MemoryStorage::new();
        let user = stg
            .create(CreateUserParams {
                name: "Teste User".into(),
                email: "test@user.com".into(),
                description: None,
                password: "senha-secreta".into(),
            })
            .await
            .unwrap();
        (stg, user.id.to_hex())
    }

    #[tokio::test]
    async fn token_names_the_user() {
        let (stg, id) = seeded().await;

        let token = issue_token(&stg, params("test@user.com", None)).await.unwrap();

        let claims = TokenCodec::new(SECRET.as_bytes())
            .unwrap()
            .verify(&token)
            .unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "test@user.com");
        assert!(claims.is_admin);
        assert_eq!(claims.exp, None);
    }

    #[tokio::test]
    async fn ttl_sets_expiry() {
        let (stg, _) = seeded().await;

        let token = issue_token(&stg, params("test@user.com", Some(30))).await.unwrap();

        let claims = TokenCodec::new(SECRET.as_bytes())
            .unwrap()
            .verify(&token)
            .unwrap();
        assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 30 * 60);
    }

    #[tokio::test]
    async fn huge_ttl_is_an_error() {
        let (stg, _) = seeded().await;

        for minutes in [i64::MAX, i64::MAX / 60] {
            let result = issue_token(&stg, params("test@user.com", Some(minutes))).await;
            assert!(result.is_err(), "{minutes}");
        }
    }

    #[tokio::test]
    async fn unknown_email_is_an_error() {
        let (stg, _) = seeded().await;

        assert!(issue_token(&stg, params("ghost@user.com", None)).await.is_err());
    }
}
