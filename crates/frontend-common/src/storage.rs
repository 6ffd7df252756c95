//! Browser-local persistence for the session record

use async_trait::async_trait;
use gloo::storage::{LocalStorage, Storage as _};
use momcare_core::store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
use momcare_core::{CoreError, CoreResult, Session, SessionStore, UserProfile};

/// Session record in `window.localStorage`, one raw string per slot.
///
/// Tokens are stored verbatim and the user profile as JSON, so the record is
/// interchangeable with what other frontends of the same backend write.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }
}

fn read_slot(key: &str) -> CoreResult<Option<String>> {
    LocalStorage::raw()
        .get_item(key)
        .map_err(|err| CoreError::storage(format!("{key}: {err:?}")))
}

fn write_slot(key: &str, value: Option<&str>) -> CoreResult<()> {
    let storage = LocalStorage::raw();
    let result = match value {
        Some(value) => storage.set_item(key, value),
        None => storage.remove_item(key),
    };
    result.map_err(|err| CoreError::storage(format!("{key}: {err:?}")))
}

#[async_trait]
impl SessionStore for LocalStorageStore {
    async fn load(&self) -> CoreResult<Session> {
        let user = match read_slot(USER_KEY)? {
            Some(raw) => Some(serde_json::from_str::<UserProfile>(&raw)?),
            None => None,
        };
        Ok(Session {
            access_token: read_slot(ACCESS_TOKEN_KEY)?,
            refresh_token: read_slot(REFRESH_TOKEN_KEY)?,
            user,
        })
    }

    async fn save(&self, session: &Session) -> CoreResult<()> {
        let user = match &session.user {
            Some(user) => Some(serde_json::to_string(user)?),
            None => None,
        };
        write_slot(ACCESS_TOKEN_KEY, session.access_token.as_deref())?;
        write_slot(REFRESH_TOKEN_KEY, session.refresh_token.as_deref())?;
        write_slot(USER_KEY, user.as_deref())
    }

    async fn clear(&self) -> CoreResult<()> {
        write_slot(ACCESS_TOKEN_KEY, None)?;
        write_slot(REFRESH_TOKEN_KEY, None)?;
        write_slot(USER_KEY, None)
    }
}
