//! # Session Manager
//!
//! Single source of truth for whether a user is signed in, and as whom.
//! Restores the session from durable storage at startup, persists it on
//! login, clears it on logout and drives the route guard.

pub mod error;
pub mod guard;
pub mod manager;
pub mod storage;
pub mod structs;

// Re-exports
pub use error::{Result, SessionError};
pub use guard::{GuardEvent, Redirect, Route, RouteGroup, RouteGuard};
pub use manager::SessionManager;
pub use storage::{ACCESS_TOKEN_KEY, DISPLAY_NAME_KEY, SESSION_KEYS, SUBJECT_ID_KEY, USER_ROLE_KEY};
pub use structs::SessionState;
