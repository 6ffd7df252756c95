//! Session state for a MomCare browser context

use serde::{Deserialize, Serialize};

use crate::types::{Role, UserProfile};

/// Authentication state of the current browser context.
///
/// Exactly one session exists per context. The session manager is the sole
/// writer; every other component receives cloned snapshots. A logged-out
/// session has all three fields absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    /// A fully populated session, as produced by login
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        user: UserProfile,
    ) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
            user: Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    /// Role of the signed-in account, if any
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

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

    #[test]
    fn default_session_is_logged_out() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), None);
    }

    #[test]
    fn new_session_carries_role() {
        let session = Session::new("A1", "R1", profile());
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(Role::Patient));
    }
}
