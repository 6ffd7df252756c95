//! MomCare HTTP client
//!
//! Typed clients for the MomCare backend plus the session manager that owns
//! authentication state and recovers transparently from access-token expiry.
//!
//! Screens never construct clients themselves; they go through the shared
//! accessors in `momcare-frontend-common` and issue requests through the
//! authenticated client, which attaches the current bearer credential at send
//! time and performs at most one refresh-and-retry per request.

pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use client::{
    AuthService, AuthenticatedMomCareClient, MomCareClientBuilder, PublicMomCareClient,
};
pub use error::ClientError;
pub use session::SessionManager;
