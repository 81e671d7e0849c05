//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers, minting actor tokens and
//! making HTTP requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU16, Ordering};
use std::time::Duration;

use anyhow::Result;
use forum_api::{create_app, create_app_state};
use forum_common::{AppConfig, JwtService};
use forum_core::Actor;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Secret shared by the test server and the tokens minted for it
pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Counter for unique test ports
static PORT_COUNTER: AtomicU16 = AtomicU16::new(19000);

/// Get a unique port for testing
pub fn get_test_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server on the in-memory backend
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config(&[])?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let port = get_test_port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry);

        let state = create_app_state(config).await?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(addr).await?;
        let actual_addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Wait for server to be ready
        tokio::time::sleep(Duration::from_millis(100)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr: actual_addr,
            client,
            jwt,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Bearer token identifying `actor` to this server
    pub fn token(&self, actor: &Actor) -> String {
        self.jwt
            .issue_access_token(actor)
            .expect("failed to issue test token")
    }

    fn request(&self, builder: RequestBuilder, actor: Option<&Actor>) -> RequestBuilder {
        match actor {
            Some(actor) => builder.bearer_auth(self.token(actor)),
            None => builder,
        }
    }

    /// Make a GET request, as `actor` if given
    pub async fn get(&self, path: &str, actor: Option<&Actor>) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.request(self.client.get(&url), actor).send().await?)
    }

    /// Make a POST request with a JSON body
    pub async fn post<T: Serialize>(
        &self,
        path: &str,
        actor: Option<&Actor>,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .request(self.client.post(&url), actor)
            .json(body)
            .send()
            .await?)
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, path: &str, actor: Option<&Actor>) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.request(self.client.post(&url), actor).send().await?)
    }

    /// Make a PUT request with a JSON body
    pub async fn put<T: Serialize>(
        &self,
        path: &str,
        actor: Option<&Actor>,
        body: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .request(self.client.put(&url), actor)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request without a body
    pub async fn put_empty(&self, path: &str, actor: Option<&Actor>) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.request(self.client.put(&url), actor).send().await?)
    }

    /// Make a GET request with a raw `Authorization` header value
    pub async fn get_with_authorization(&self, path: &str, value: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .get(&url)
            .header("Authorization", value)
            .send()
            .await?)
    }
}

/// Create a test configuration on the in-memory backend
///
/// `overrides` replace or add environment-style keys.
pub fn test_config(overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let mut vars: HashMap<String, String> = [
        ("STORAGE_BACKEND", "memory"),
        ("API_PORT", "0"),
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "10000"),
        ("RATE_LIMIT_BURST", "10000"),
        ("WORKER_ID", "7"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    for (key, value) in overrides {
        vars.insert((*key).to_string(), (*value).to_string());
    }

    AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Assert an error status and return the `error` object of the body
pub async fn assert_error(
    response: Response,
    expected_status: StatusCode,
) -> Result<crate::fixtures::ErrorDetail> {
    let body: crate::fixtures::ErrorEnvelope = assert_json(response, expected_status).await?;
    Ok(body.error)
}
