//! Keys under which the session lives in durable storage.

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const USER_ROLE_KEY: &str = "user_role";
pub const SUBJECT_ID_KEY: &str = "user_sub";
pub const DISPLAY_NAME_KEY: &str = "Username";

/// Every key a session occupies, in write order.
pub const SESSION_KEYS: [&str; 4] = [
    ACCESS_TOKEN_KEY,
    USER_ROLE_KEY,
    SUBJECT_ID_KEY,
    DISPLAY_NAME_KEY,
];
