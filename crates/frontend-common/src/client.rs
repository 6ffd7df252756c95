//! Client configuration and initialization

use std::sync::{Arc, Mutex};

use momcare_http::client::{
    AuthService, AuthenticatedMomCareClient, MomCareClientBuilder, PublicMomCareClient,
};
use momcare_http::{ClientError, SessionManager};
use once_cell::sync::Lazy;

use crate::storage::LocalStorageStore;

/// Global client instances
static BASE_URL: Lazy<Mutex<Option<String>>> = Lazy::new(|| Mutex::new(None));
static SESSION_MANAGER: Lazy<Mutex<Option<Arc<SessionManager>>>> = Lazy::new(|| Mutex::new(None));
static PUBLIC_CLIENT: Lazy<Mutex<Option<PublicMomCareClient>>> = Lazy::new(|| Mutex::new(None));
static AUTH_CLIENT: Lazy<Mutex<Option<AuthenticatedMomCareClient>>> = Lazy::new(|| Mutex::new(None));

/// Point all clients at an explicit backend origin.
///
/// Without this the clients fall back to the window origin, which only works
/// when the app is served from the same host as the API.
pub fn set_base_url(url: impl Into<String>) {
    let mut lock = BASE_URL.lock().expect("Failed to acquire base url lock");
    *lock = Some(url.into().trim_end_matches('/').to_string());
}

/// Get the base URL for API calls
fn get_base_url() -> String {
    if let Some(url) = BASE_URL
        .lock()
        .expect("Failed to acquire base url lock")
        .as_ref()
    {
        return url.clone();
    }

    // Try to get from window location
    #[cfg(target_arch = "wasm32")]
    if let Some(window) = web_sys::window() {
        if let Ok(location) = window.location().origin() {
            return location;
        }
    }

    // Default to relative URLs
    String::new()
}

/// Install the shared session manager over browser storage.
///
/// Returns the manager so the caller can await its `initialize` before the
/// first screen renders; subsequent calls return the existing instance.
pub fn init_session() -> Arc<SessionManager> {
    let mut lock = SESSION_MANAGER
        .lock()
        .expect("Failed to acquire session manager lock");

    if let Some(manager) = lock.as_ref() {
        return manager.clone();
    }
    let manager = Arc::new(SessionManager::new(Arc::new(LocalStorageStore::new())));
    *lock = Some(manager.clone());
    manager
}

/// The shared session manager; [`init_session`] must have run
pub fn session_manager() -> Result<Arc<SessionManager>, ClientError> {
    SESSION_MANAGER
        .lock()
        .expect("Failed to acquire session manager lock")
        .clone()
        .ok_or_else(|| ClientError::Configuration("session manager not initialized".into()))
}

/// Get the public client instance (for unauthenticated endpoints)
pub fn create_public_client() -> Result<PublicMomCareClient, ClientError> {
    let mut client_lock = PUBLIC_CLIENT
        .lock()
        .expect("Failed to acquire public client lock");

    if let Some(client) = client_lock.as_ref() {
        return Ok(client.clone());
    }
    let client = MomCareClientBuilder::new()
        .base_url(get_base_url())
        .build_public()?;
    *client_lock = Some(client.clone());
    Ok(client)
}

/// Get the authenticated gateway shared by all screens.
///
/// Fails with [`ClientError::Unauthenticated`] when no session is present;
/// the screen redirects to login instead of issuing the request.
pub fn create_authenticated_client() -> Result<AuthenticatedMomCareClient, ClientError> {
    let manager = session_manager()?;
    if !manager.is_authenticated() {
        return Err(ClientError::Unauthenticated);
    }

    let mut client_lock = AUTH_CLIENT
        .lock()
        .expect("Failed to acquire auth client lock");
    if let Some(client) = client_lock.as_ref() {
        return Ok(client.clone());
    }
    let client = MomCareClientBuilder::new()
        .base_url(get_base_url())
        .build_authenticated(manager)?;
    *client_lock = Some(client.clone());
    Ok(client)
}

/// Auth service over the shared public client and session manager
pub fn auth_service() -> Result<AuthService, ClientError> {
    Ok(AuthService::new(create_public_client()?, session_manager()?))
}
