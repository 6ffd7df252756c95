//! Session lifecycle and refresh coalescing
//!
//! [`SessionManager`] is the sole writer of session state. It keeps the
//! in-memory session and the persisted record converged across login, token
//! refresh, and logout, and serializes concurrent refresh attempts so that a
//! burst of unauthorized responses results in a single call to the refresh
//! endpoint.

use std::future::Future;
use std::sync::Arc;

use momcare_core::{Session, SessionStore, UserProfile};
use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};

use crate::error::ClientError;

/// Owns the current session and keeps it converged with the persisted record
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    session: watch::Sender<Session>,
    ready: watch::Sender<bool>,
    refresh_gate: Mutex<()>,
}

impl SessionManager {
    /// Create a manager over a persistence backend.
    ///
    /// Call [`initialize`](Self::initialize) before issuing authenticated
    /// requests; until then the manager reports a logged-out session.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            session: watch::Sender::new(Session::default()),
            ready: watch::Sender::new(false),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Read the persisted record into memory and signal ready.
    ///
    /// Always completes: an unreadable or corrupt record yields a logged-out
    /// session instead of an error. Ready is signalled exactly once; calling
    /// again after that is a no-op.
    pub async fn initialize(&self) {
        if self.is_ready() {
            return;
        }
        let session = match self.store.load().await {
            Ok(session) => session,
            Err(err) => {
                warn!("discarding unreadable session record: {err}");
                Session::default()
            }
        };
        let authenticated = session.is_authenticated();
        self.session.send_replace(session);
        self.ready
            .send_if_modified(|ready| !std::mem::replace(ready, true));
        debug!(authenticated, "session manager ready");
    }

    /// Current session snapshot
    pub fn session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.session.borrow().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.session.borrow().refresh_token.clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.session.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    pub fn is_ready(&self) -> bool {
        *self.ready.borrow()
    }

    /// Watch the ready latch; it flips to `true` exactly once
    pub fn ready(&self) -> watch::Receiver<bool> {
        self.ready.subscribe()
    }

    /// Watch session snapshots; the receiver observes every state transition
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.session.subscribe()
    }

    /// Install a new session.
    ///
    /// Persists first, then swaps memory, so a reader observes either the
    /// previous or the new session, never a partial one. Overwrites any prior
    /// session.
    pub async fn login(
        &self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        user: UserProfile,
    ) -> Result<(), ClientError> {
        let session = Session::new(access_token, refresh_token, user);
        self.store.save(&session).await?;
        debug!(role = ?session.role(), "session installed");
        self.session.send_replace(session);
        Ok(())
    }

    /// Clear memory and the persisted record. Idempotent.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.store.clear().await?;
        let previous = self.session.send_replace(Session::default());
        if previous.is_authenticated() {
            debug!("session cleared");
        }
        Ok(())
    }

    /// Adopt whatever the store currently holds.
    ///
    /// Used by the cross-tab storage listener; last writer wins.
    pub async fn resync(&self) -> Result<(), ClientError> {
        let session = self.store.load().await?;
        self.session.send_replace(session);
        Ok(())
    }

    /// Exchange the refresh token for a new access token, coalescing
    /// concurrent attempts into a single refresh call.
    ///
    /// `stale` is the access token the failed request was sent with. After
    /// the gate is acquired the current token is re-read: if it no longer
    /// matches, another caller already refreshed (its token is returned
    /// without a second refresh call) or already tore the session down (the
    /// call fails). `exchange` performs the actual refresh-endpoint call;
    /// any failure there — network error or non-2xx alike — tears the whole
    /// session down and surfaces [`ClientError::SessionExpired`].
    pub async fn refresh_access_token<F, Fut>(
        &self,
        stale: Option<&str>,
        exchange: F,
    ) -> Result<String, ClientError>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<String, ClientError>>,
    {
        let _gate = self.refresh_gate.lock().await;

        let current = self.access_token();
        if current.as_deref() != stale {
            return current.ok_or(ClientError::SessionExpired);
        }

        let Some(refresh_token) = self.refresh_token() else {
            self.teardown().await;
            return Err(ClientError::SessionExpired);
        };

        match exchange(refresh_token).await {
            Ok(access_token) => {
                let mut session = self.session();
                session.access_token = Some(access_token.clone());
                self.store.save(&session).await?;
                self.session.send_replace(session);
                debug!("access token refreshed");
                Ok(access_token)
            }
            Err(err) => {
                warn!("token refresh failed, tearing down session: {err}");
                self.teardown().await;
                Err(ClientError::SessionExpired)
            }
        }
    }

    /// Best-effort teardown after an irrecoverable authorization failure
    async fn teardown(&self) {
        if let Err(err) = self.store.clear().await {
            warn!("failed to clear persisted session: {err}");
        }
        self.session.send_replace(Session::default());
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ready", &self.is_ready())
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
