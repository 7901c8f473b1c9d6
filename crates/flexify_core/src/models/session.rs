use std::fmt;

use serde::{Deserialize, Serialize};

/// Role granted by the backend at login.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Parse a stored or server-issued role. Anything other than `admin`
    /// is a regular user.
    pub fn from_stored(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated identity held by the running client.
///
/// All four fields travel together: a session missing its token, role or
/// subject id is not a session at all. The display name may be empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub subject_id: String,
    pub display_name: String,
}

impl Session {
    pub fn new(
        token: impl Into<String>,
        role: Role,
        subject_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            role,
            subject_id: subject_id.into(),
            display_name: display_name.into(),
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[MASKED]")
            .field("role", &self.role)
            .field("subject_id", &self.subject_id)
            .field("display_name", &self.display_name)
            .finish()
    }
}
