use serde::{Deserialize, Serialize};

use super::de;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of a successful `POST /auth/login`.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub role: String,
    #[serde(deserialize_with = "de::id")]
    pub sub: String,
    #[serde(rename = "Username", default)]
    pub username: Option<String>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"[MASKED]")
            .field("role", &self.role)
            .field("sub", &self.sub)
            .field("username", &self.username)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub age: u32,
}

/// Partial user update; only the populated fields are sent.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.age.is_none()
    }
}
