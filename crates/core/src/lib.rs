//! MomCare core types and session state

pub mod error;
pub mod session;
pub mod store;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use session::Session;
pub use store::{MemoryStore, SessionStore};
pub use types::{Appointment, AppointmentStatus, AvailabilitySlot, Doctor, Role, UserProfile};
