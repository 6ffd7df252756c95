//! Durable mirror of the session state

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreResult;
use crate::session::Session;
use crate::types::UserProfile;

/// Storage slot holding the access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Storage slot holding the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Storage slot holding the serialized user profile
pub const USER_KEY: &str = "user";

/// Persistence backend for the session record.
///
/// Implementations keep three independent string slots ([`ACCESS_TOKEN_KEY`],
/// [`REFRESH_TOKEN_KEY`], [`USER_KEY`]). The in-memory session and the
/// persisted record must converge after every mutating operation; the session
/// manager is the sole writer.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the persisted record. An empty record is a logged-out session.
    async fn load(&self) -> CoreResult<Session>;

    /// Write the record, removing slots the session no longer carries.
    async fn save(&self, session: &Session) -> CoreResult<()>;

    /// Remove all three slots.
    async fn clear(&self) -> CoreResult<()>;
}

/// In-memory store used by tests and non-browser hosts.
///
/// Mirrors the browser slot layout, including the serialized `user` slot, so
/// corrupt-record behavior can be exercised without a browser.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw slot read, mirrors `localStorage.getItem`
    pub async fn get(&self, key: &str) -> Option<String> {
        self.slots.read().await.get(key).cloned()
    }

    /// Raw slot write, mirrors `localStorage.setItem`
    pub async fn set(&self, key: &str, value: impl Into<String>) {
        self.slots.write().await.insert(key.to_string(), value.into());
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self) -> CoreResult<Session> {
        let slots = self.slots.read().await;
        let user = match slots.get(USER_KEY) {
            Some(raw) => Some(serde_json::from_str::<UserProfile>(raw)?),
            None => None,
        };
        Ok(Session {
            access_token: slots.get(ACCESS_TOKEN_KEY).cloned(),
            refresh_token: slots.get(REFRESH_TOKEN_KEY).cloned(),
            user,
        })
    }

    async fn save(&self, session: &Session) -> CoreResult<()> {
        let user = match &session.user {
            Some(user) => Some(serde_json::to_string(user)?),
            None => None,
        };
        let mut slots = self.slots.write().await;
        for (key, value) in [
            (ACCESS_TOKEN_KEY, session.access_token.clone()),
            (REFRESH_TOKEN_KEY, session.refresh_token.clone()),
            (USER_KEY, user),
        ] {
            match value {
                Some(value) => {
                    slots.insert(key.to_string(), value);
                }
                None => {
                    slots.remove(key);
                }
            }
        }
        Ok(())
    }

    async fn clear(&self) -> CoreResult<()> {
        self.slots.write().await.clear();
        Ok(())
    }
}

#[cfg(feature = "tests")]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub SessionStore {}

        #[async_trait]
        impl SessionStore for SessionStore {
            async fn load(&self) -> CoreResult<Session>;
            async fn save(&self, session: &Session) -> CoreResult<()>;
            async fn clear(&self) -> CoreResult<()>;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn profile() -> UserProfile {
        serde_json::from_str(
            r#"{
                "id": 1,
                "username": "amina",
                "email": "amina@example.com",
                "first_name": "Amina",
                "last_name": "Diallo",
                "role": "patient"
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_then_load_converges() {
        let store = MemoryStore::new();
        let session = Session::new("A1", "R1", profile());
        store.save(&session).await.unwrap();

        assert_eq!(store.load().await.unwrap(), session);
        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("A1"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).await.as_deref(), Some("R1"));
    }

    #[tokio::test]
    async fn saving_a_partial_session_removes_stale_slots() {
        let store = MemoryStore::new();
        store.save(&Session::new("A1", "R1", profile())).await.unwrap();

        let refreshed = Session {
            access_token: Some("A2".into()),
            refresh_token: None,
            user: None,
        };
        store.save(&refreshed).await.unwrap();

        assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("A2"));
        assert_eq!(store.get(REFRESH_TOKEN_KEY).await, None);
        assert_eq!(store.get(USER_KEY).await, None);
    }

    #[tokio::test]
    async fn clear_empties_every_slot() {
        let store = MemoryStore::new();
        store.save(&Session::new("A1", "R1", profile())).await.unwrap();
        store.clear().await.unwrap();

        let session = store.load().await.unwrap();
        assert_eq!(session, Session::default());
    }

    #[tokio::test]
    async fn corrupt_user_slot_is_a_serialization_error() {
        let store = MemoryStore::new();
        store.set(USER_KEY, "not json").await;

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, CoreError::Serialization { .. }));
    }
}
