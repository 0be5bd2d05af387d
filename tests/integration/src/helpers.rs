//! Test helpers for integration tests
//!
//! Spawns an in-process server on an ephemeral port, seeds an admin account
//! directly through the repositories and wraps the common HTTP calls.

use std::net::SocketAddr;
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{anyhow, Result};
use ratecard_api::{create_app, create_app_state};
use ratecard_common::{hash_password, AppConfig};
use ratecard_core::traits::UserRepository;
use ratecard_core::{IdGenerator, RecordId, User, UserRole};
use ratecard_db::{create_pool, DatabaseConfig, PgPool, PgUserRepository};
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::fixtures::{LoginBody, LoginResponse};

/// Password given to every seeded account
pub const SEED_PASSWORD: &str = "Harbour-Master-2024";

/// Unique id for test data, drawn from a worker id the server never uses
pub fn next_id() -> RecordId {
    static GENERATOR: OnceLock<IdGenerator> = OnceLock::new();
    GENERATOR
        .get_or_init(|| IdGenerator::new(1002).unwrap())
        .generate()
}

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pool: PgPool,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let pool = create_pool(&DatabaseConfig::from(&config.database)).await?;

        let state = create_app_state(config)
            .await
            .map_err(|e| anyhow!("app state: {e}"))?;
        let app = create_app(state).map_err(|e| anyhow!("app: {e}"))?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            pool,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url(), path)
    }

    /// Insert a user with [`SEED_PASSWORD`] straight into the database
    pub async fn seed_user(&self, role: UserRole) -> Result<User> {
        let id = next_id();
        let user = User::new(id, &format!("Seeded {id}"), &format!("seed-{id}@ratecard.test"), role);
        let hash = hash_password(SEED_PASSWORD).map_err(|e| anyhow!("hash: {e}"))?;
        PgUserRepository::new(self.pool.clone())
            .create(&user, &hash)
            .await
            .map_err(|e| anyhow!("seed user: {e}"))?;
        Ok(user)
    }

    /// Seed a user with the given role and return its bearer token
    pub async fn login_as(&self, role: UserRole) -> Result<String> {
        let user = self.seed_user(role).await?;
        let response = self
            .post(
                "/auth/login",
                &LoginBody {
                    email: user.email.clone(),
                    password: SEED_PASSWORD.to_string(),
                },
            )
            .await?;
        let login: LoginResponse = assert_json(response, StatusCode::OK).await?;
        Ok(login.access_token)
    }

    /// Seed an admin and return its bearer token
    pub async fn admin_token(&self) -> Result<String> {
        self.login_as(UserRole::Admin).await
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make a POST request with auth token
    pub async fn post_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a PUT request with auth token
    pub async fn put_auth<T: Serialize>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// Make a DELETE request with auth token
    pub async fn delete_auth(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }
}

/// Configuration from the environment, with a roomy rate limit for tests
pub fn test_config() -> Result<AppConfig> {
    if std::env::var("JWT_SECRET").is_err() {
        std::env::set_var("JWT_SECRET", "integration-test-secret-not-for-production");
    }

    let mut config = AppConfig::from_env().map_err(|e| anyhow!("Config error: {e}"))?;
    config.rate_limit.requests_per_second = 1000;
    config.rate_limit.burst = 1000;
    Ok(config)
}

/// Helper to check if test environment is available
pub fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}

/// Assert an error response and return its `error.code`
pub async fn assert_error_code(response: Response, expected_status: StatusCode) -> Result<String> {
    let body: serde_json::Value = assert_json(response, expected_status).await?;
    body["error"]["code"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| anyhow!("missing error code in {body}"))
}
