//! Browser glue for the MomCare client.
//!
//! Screens obtain the session manager and the HTTP clients through the shared
//! accessors in [`client`]; they never construct their own. [`storage`] keeps
//! the session record in `window.localStorage`, and [`events`] resynchronizes
//! it when another tab writes to the shared slots.

pub mod client;
pub mod events;
pub mod logging;
pub mod storage;

pub use client::{
    auth_service, create_authenticated_client, create_public_client, init_session,
    session_manager, set_base_url,
};
pub use events::watch_storage;
pub use logging::init_logging;
pub use storage::LocalStorageStore;
