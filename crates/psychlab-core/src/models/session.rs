use serde::{Deserialize, Serialize};

/// Local, unverified login marker.
///
/// Wire shape: `{ "email": "...", "isAuthenticated": true }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    pub is_authenticated: bool,
}

impl Session {
    pub fn authenticated(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            is_authenticated: true,
        }
    }
}
