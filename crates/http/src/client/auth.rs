//! Authentication API client methods

use std::sync::Arc;

use momcare_core::UserProfile;

use super::{AuthenticatedMomCareClient, PublicMomCareClient};
use crate::error::ClientError;
use crate::session::SessionManager;
use crate::types::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, TokenRefreshRequest,
    TokenRefreshResponse,
};

/// Authentication endpoints for the public client
impl PublicMomCareClient {
    /// Register a new patient or doctor account
    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<RegisterResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/users/register/")
            .json(&request);
        self.execute(req).await
    }

    /// Exchange credentials for a token pair and the account profile
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/users/login/")
            .json(&request);
        self.execute(req).await
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh_token(
        &self,
        request: TokenRefreshRequest,
    ) -> Result<TokenRefreshResponse, ClientError> {
        let req = self
            .request(reqwest::Method::POST, "/users/token/refresh/")
            .json(&request);
        self.execute(req).await
    }
}

/// Authentication endpoints for the authenticated client
impl AuthenticatedMomCareClient {
    /// Get the current account's profile
    pub async fn get_me(&self) -> Result<UserProfile, ClientError> {
        let request = self.request(reqwest::Method::GET, "/users/me/");
        self.execute(request).await
    }
}

/// Drives sign-in and sign-out against the session manager.
///
/// Screens call this instead of wiring the login endpoint and the manager
/// together themselves.
#[derive(Clone)]
pub struct AuthService {
    client: PublicMomCareClient,
    session: Arc<SessionManager>,
}

impl AuthService {
    pub fn new(client: PublicMomCareClient, session: Arc<SessionManager>) -> Self {
        Self { client, session }
    }

    /// Sign in and install the session. Returns the authenticated profile;
    /// its role decides where the screen layer routes next.
    pub async fn sign_in(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<UserProfile, ClientError> {
        let response = self
            .client
            .login(LoginRequest {
                email: email.into(),
                password: password.into(),
            })
            .await?;
        self.session
            .login(response.access, response.refresh, response.user.clone())
            .await?;
        Ok(response.user)
    }

    /// Create an account. The caller signs in separately afterwards.
    pub async fn sign_up(&self, request: RegisterRequest) -> Result<RegisterResponse, ClientError> {
        self.client.register(request).await
    }

    /// Clear the session. Idempotent.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        self.session.logout().await
    }
}
