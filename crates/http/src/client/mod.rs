//! Type-safe API clients that enforce authentication requirements at compile time

pub mod appointments;
pub mod auth;
pub mod doctors;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, StatusCode};
use tracing::debug;

use crate::error::ClientError;
use crate::session::SessionManager;
use crate::types::{TokenRefreshRequest, TokenRefreshResponse};

pub use auth::AuthService;

const USER_AGENT: &str = "momcare-client/0.1.0";
const REFRESH_PATH: &str = "/users/token/refresh/";

/// Client for public endpoints that don't require authentication
#[derive(Clone)]
pub struct PublicMomCareClient {
    client: Client,
    base_url: String,
}

/// Client for authenticated endpoints.
///
/// Holds the session manager; the bearer credential is read fresh at send
/// time, so a token refreshed elsewhere is picked up without re-creating the
/// client, and a handle held across logout simply stops attaching one.
#[derive(Clone)]
pub struct AuthenticatedMomCareClient {
    client: Client,
    base_url: String,
    session: Arc<SessionManager>,
}

fn build_http_client(timeout: Option<Duration>) -> Result<Client, ClientError> {
    #[cfg(not(target_arch = "wasm32"))]
    let client = {
        let mut builder = ClientBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()?
    };

    #[cfg(target_arch = "wasm32")]
    let client = {
        let _ = timeout; // Timeouts not supported on WASM
        ClientBuilder::new().user_agent(USER_AGENT).build()?
    };

    Ok(client)
}

impl PublicMomCareClient {
    /// Create a new public client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::new_with_timeout(base_url, None)
    }

    fn new_with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder without authentication
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }

    /// Bind a session manager to get an authenticated client
    pub fn authenticate(self, session: Arc<SessionManager>) -> AuthenticatedMomCareClient {
        AuthenticatedMomCareClient {
            client: self.client,
            base_url: self.base_url,
            session,
        }
    }
}

impl AuthenticatedMomCareClient {
    /// Create a new authenticated client over a session manager
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<SessionManager>,
    ) -> Result<Self, ClientError> {
        Self::new_with_timeout(base_url, session, None)
    }

    fn new_with_timeout(
        base_url: impl Into<String>,
        session: Arc<SessionManager>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url,
            session,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session manager backing this client
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Create a request builder; the credential is attached at send time
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, url)
    }

    /// Execute a request and deserialize the response body
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send_with_refresh(request).await?;
        Ok(response.json().await?)
    }

    /// Execute a request whose success response carries no body
    pub async fn execute_empty(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        self.send_with_refresh(request).await?;
        Ok(())
    }

    /// Send with the current access token, recovering once from an expired
    /// one.
    ///
    /// On a 401 the refresh token is exchanged for a new access token (one
    /// in-flight refresh is shared by all concurrent failures) and the
    /// original request is re-issued exactly once with the new credential.
    /// The retried request never re-enters this path; its status is mapped
    /// and surfaced as-is. Every non-401 error status passes through
    /// unmodified.
    async fn send_with_refresh(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        let retry = request.try_clone();
        let token = self.session.access_token();

        let request = match token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }
        if status != StatusCode::UNAUTHORIZED {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ClientError::from_status(status, message));
        }

        // Streaming bodies cannot be replayed; surface the 401 untouched.
        let Some(retry) = retry else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ClientError::from_status(status, message));
        };

        debug!("request unauthorized, exchanging refresh token");
        let access_token = self
            .session
            .refresh_access_token(token.as_deref(), |refresh| {
                self.exchange_refresh_token(refresh)
            })
            .await?;

        let response = retry.bearer_auth(access_token).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }

    /// Call the refresh endpoint; no credential is attached
    async fn exchange_refresh_token(&self, refresh: String) -> Result<String, ClientError> {
        let url = format!("{}{}", self.base_url, REFRESH_PATH);
        let response = self
            .client
            .post(url)
            .json(&TokenRefreshRequest { refresh })
            .send()
            .await?;
        let status = response.status();

        if status.is_success() {
            let body: TokenRefreshResponse = response.json().await?;
            Ok(body.access)
        } else {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::from_status(status, message))
        }
    }

    /// Create a public client sharing this client's connection pool
    pub fn to_public(&self) -> PublicMomCareClient {
        PublicMomCareClient {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

/// Type-safe builder that creates the appropriate client flavor
pub struct MomCareClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl MomCareClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
        }
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[cfg(not(target_arch = "wasm32"))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a public client
    pub fn build_public(self) -> Result<PublicMomCareClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        PublicMomCareClient::new_with_timeout(base_url, self.timeout)
    }

    /// Build an authenticated client
    pub fn build_authenticated(
        self,
        session: Arc<SessionManager>,
    ) -> Result<AuthenticatedMomCareClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        AuthenticatedMomCareClient::new_with_timeout(base_url, session, self.timeout)
    }
}

impl Default for MomCareClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
