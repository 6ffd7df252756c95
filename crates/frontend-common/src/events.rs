//! Cross-tab session synchronization
//!
//! Browser tabs share the persisted record. A `storage` event fired by
//! another tab re-reads the record into the local session manager; last
//! writer wins, and there is no cross-tab locking.

use std::sync::Arc;

use gloo::events::EventListener;
use momcare_core::store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
use momcare_http::SessionManager;
use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::StorageEvent;

const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];

/// Resync the manager whenever another tab touches a session slot.
///
/// A storage event without a key means `storage.clear()`, which also affects
/// the record. Returns `None` outside a window context; dropping the listener
/// detaches it.
pub fn watch_storage(manager: Arc<SessionManager>) -> Option<EventListener> {
    let window = web_sys::window()?;
    let listener = EventListener::new(&window, "storage", move |event| {
        let touches_session = event
            .dyn_ref::<StorageEvent>()
            .and_then(StorageEvent::key)
            .is_none_or(|key| SESSION_KEYS.contains(&key.as_str()));
        if !touches_session {
            return;
        }
        let manager = manager.clone();
        spawn_local(async move {
            if let Err(err) = manager.resync().await {
                warn!("failed to resync session from storage: {err}");
            }
        });
    });
    Some(listener)
}
