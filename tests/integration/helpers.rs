//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use collabhub_api::{AppState, build_router};
use collabhub_auth::{JwtEncoder, TokenCodec};
use collabhub_core::config::AppConfig;
use collabhub_database::{CollaboratorStore, MemoryStore};
use collabhub_entity::user::User;
use collabhub_mail::OutboxMailer;

pub const INVITATION_SECRET: &str = "integration-invitation-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory persistence shared with the router
    pub store: MemoryStore,
    /// Captures every email the router sends
    pub outbox: OutboxMailer,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-jwt-secret".to_string();
        config.invitation.token_secret = INVITATION_SECRET.to_string();
        config.invitation.base_url = "https://app.test/folder-invitation".to_string();

        let store = MemoryStore::new();
        Self::with_store(config, store.clone(), Arc::new(store))
    }

    /// Wire the router over an arbitrary store. `store` is still used for
    /// seeding and inspection.
    pub fn with_store(
        config: AppConfig,
        store: MemoryStore,
        backend: Arc<dyn CollaboratorStore>,
    ) -> Self {
        let outbox = OutboxMailer::new();
        let state = AppState::new(config.clone(), backend, Arc::new(outbox.clone()));

        Self {
            router: build_router(state),
            encoder: JwtEncoder::new(&config.auth),
            store,
            outbox,
            config,
        }
    }

    pub fn user(&self, email: &str) -> User {
        self.store.add_user(email)
    }

    /// Bearer token for `user`
    pub fn token_for(&self, user: &User) -> String {
        let (token, _) = self
            .encoder
            .generate_access_token(user.id, &user.email)
            .expect("Failed to mint access token");
        token
    }

    /// Codec holding the invitation secret.
    pub fn codec(&self) -> TokenCodec {
        TokenCodec::new(INVITATION_SECRET)
    }

    /// Make a GET request
    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Request::get(uri), token, Body::empty()).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        self.send(builder, token, Body::from(body.to_string()))
            .await
    }

    async fn send(
        &self,
        mut builder: axum::http::request::Builder,
        token: Option<&str>,
        body: Body,
    ) -> (StatusCode, Value) {
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = builder.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    /// Token embedded in the most recent invitation email.
    pub fn last_emailed_token(&self) -> String {
        let sent = self.outbox.sent();
        let html = &sent.last().expect("No email sent").html;
        let start = html.find("token=").expect("No token in email") + "token=".len();
        html[start..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect()
    }
}

/// Pull the `token` query value out of a public invitation link.
pub fn token_from_link(link: &str) -> String {
    let start = link.find("token=").expect("No token in link") + "token=".len();
    link[start..].to_string()
}
