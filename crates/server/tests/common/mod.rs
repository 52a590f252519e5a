//! Common test utilities for driving the router in-process.
//!
//! The fixture wires the real SQLite stores (in memory) and a
//! [`MockBuilderClient`] so dispatch can be scripted without a network.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use bountydesk_core::config::{
    AuthConfig, AuthMethod, BuilderConfig, Config, ConnectionCodeConfig, DatabaseConfig,
    ServerConfig,
};
use bountydesk_core::testing::MockBuilderClient;
use bountydesk_core::{
    create_authenticator, Authenticator, Database, DispenseOrder, SqliteBountyStore,
    SqliteConnectionCodeStore, SqliteFeatureDirectory, SqliteTicketStore, WorkflowDispatcher,
};
use bountydesk_server::{create_router, AppState};

/// Re-export fixtures for test convenience
pub use bountydesk_core::testing::fixtures;

/// API key accepted when a fixture is built with [`TestConfig::with_api_key`].
pub const TEST_API_KEY: &str = "test-api-key";

pub struct TestFixture {
    pub router: Router,
    /// Mock builder service; script replies and inspect submitted jobs.
    pub builder: Arc<MockBuilderClient>,
    pub bounties: Arc<SqliteBountyStore>,
    pub tickets: Arc<SqliteTicketStore>,
    pub connection_codes: Arc<SqliteConnectionCodeStore>,
    pub features: Arc<SqliteFeatureDirectory>,
    /// Sent as `Authorization: Bearer` when set.
    api_key: Option<String>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub auth: AuthConfig,
    pub builder: BuilderConfig,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            auth: AuthConfig {
                method: AuthMethod::None,
                api_key: None,
            },
            builder: fixtures::builder_config(),
        }
    }
}

impl TestConfig {
    /// Require `TEST_API_KEY` on protected routes.
    pub fn with_api_key() -> Self {
        Self {
            auth: AuthConfig {
                method: AuthMethod::ApiKey,
                api_key: Some(TEST_API_KEY.to_string()),
            },
            ..Default::default()
        }
    }

    /// Builder section with neither key nor callback host.
    pub fn without_builder_credentials() -> Self {
        Self {
            builder: BuilderConfig::default(),
            ..Default::default()
        }
    }
}

impl TestFixture {
    pub async fn new() -> Self {
        Self::with_config(TestConfig::default()).await
    }

    pub async fn with_config(test_config: TestConfig) -> Self {
        let db = Arc::new(Database::in_memory().expect("Failed to open database"));

        let bounties =
            Arc::new(SqliteBountyStore::new(Arc::clone(&db)).expect("Failed to create bounty store"));
        let tickets =
            Arc::new(SqliteTicketStore::new(Arc::clone(&db)).expect("Failed to create ticket store"));
        let connection_codes = Arc::new(
            SqliteConnectionCodeStore::new(Arc::clone(&db), DispenseOrder::OldestFirst)
                .expect("Failed to create connection code store"),
        );
        let features = Arc::new(
            SqliteFeatureDirectory::new(Arc::clone(&db))
                .expect("Failed to create feature directory"),
        );

        let builder = Arc::new(MockBuilderClient::new());
        let dispatcher = WorkflowDispatcher::new(
            Arc::clone(&builder) as Arc<dyn bountydesk_core::BuilderClient>,
            Arc::clone(&features) as Arc<dyn bountydesk_core::FeatureDirectory>,
            test_config.builder.clone(),
        );

        let authenticator: Arc<dyn Authenticator> = Arc::from(
            create_authenticator(&test_config.auth).expect("Failed to create authenticator"),
        );
        let api_key = test_config.auth.api_key.clone();

        let config = Config {
            auth: test_config.auth,
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig::default(),
            builder: test_config.builder,
            connection_codes: ConnectionCodeConfig::default(),
        };

        let state = Arc::new(AppState::new(
            config,
            authenticator,
            Arc::clone(&bounties) as Arc<dyn bountydesk_core::BountyStore>,
            Arc::clone(&tickets) as Arc<dyn bountydesk_core::TicketStore>,
            Arc::clone(&connection_codes) as Arc<dyn bountydesk_core::ConnectionCodeStore>,
            Arc::clone(&features) as Arc<dyn bountydesk_core::FeatureDirectory>,
            dispatcher,
        ));

        Self {
            router: create_router(state),
            builder,
            bounties,
            tickets,
            connection_codes,
            features,
            api_key,
        }
    }

    /// Same fixture, but requests carry no credentials.
    pub fn anonymous(&self) -> AnonymousClient<'_> {
        AnonymousClient { fixture: self }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, true).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), true).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None, true).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Raw text response, for the Prometheus endpoint.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        with_credentials: bool,
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);

        if with_credentials {
            if let Some(key) = &self.api_key {
                request_builder =
                    request_builder.header("Authorization", format!("Bearer {}", key));
            }
        }

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Requests without an `Authorization` header.
pub struct AnonymousClient<'a> {
    fixture: &'a TestFixture,
}

impl AnonymousClient<'_> {
    pub async fn get(&self, path: &str) -> TestResponse {
        self.fixture.request("GET", path, None, false).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.fixture.request("POST", path, Some(body), false).await
    }

    pub async fn delete(&self, path: &str) -> TestResponse {
        self.fixture.request("DELETE", path, None, false).await
    }
}
