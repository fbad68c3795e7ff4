#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use clap::Parser;
use roster_api::{config::ApiConfig, context::ApiContext, server};
use roster_auth::{TokenClaims, TokenCodec};
use roster_common::params::CreateUserParams;
use roster_db::{
    models::DbUser,
    storage::{UserStore, memory::MemoryStorage},
};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "alguma-senha-secreta";

/// Well-formed ObjectId that no test ever creates.
pub const UNKNOWN_ID: &str = "000000000000000000000000";

pub struct Response {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

pub struct TestApp {
    router: Router,
    pub db: Arc<MemoryStorage>,
    pub codec: TokenCodec,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        let config = ApiConfig::try_parse_from([
            "roster-api",
            "--jwt-secret",
            SECRET,
            "--storage",
            "memory",
        ])
        .unwrap();

        let db = Arc::new(MemoryStorage::new());
        let codec = TokenCodec::new(SECRET.as_bytes()).unwrap();
        let token = codec
            .issue(&TokenClaims::new("66f1c0ffee0000000000beef", "test@user.com", true))
            .unwrap();

        let context = ApiContext::new(config, db.clone(), codec.clone());
        let (router, _) = server::make(context).unwrap();

        Self {
            router,
            db,
            codec,
            token,
        }
    }

    /// Insert the fixture user straight into storage.
    pub async fn seed_user(&self) -> DbUser {
        UserStore::create(
            &*self.db,
            CreateUserParams {
                name: "Teste User".into(),
                email: "test@user.com".into(),
                description: Some("Descrição do usuário de teste".into()),
                password: "senha-secreta".into(),
            },
        )
        .await
        .unwrap()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Body>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body)
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        Response {
            status,
            headers,
            body,
        }
    }

    /// Send an authenticated request, with an optional JSON body.
    pub async fn call(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let authorization = format!("Bearer {}", self.token);
        self.send(
            method,
            uri,
            Some(&authorization),
            body.map(|v| Body::from(v.to_string())),
        )
        .await
    }
}
