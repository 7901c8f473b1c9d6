//! flexify_core - Core types shared by every Flexify crate
//!
//! This crate provides the foundational types used across the client:
//! - `models` - Session, Workout, Exercise, Set and account payloads
//! - `filter` - case-insensitive name filtering for list views
//! - `config` - API base URL, proxies and storage location
//! - `paths` - the `~/.flexify` directory layout
//! - `storage_keys` - durable storage keys of the session

pub mod config;
pub mod filter;
pub mod models;
pub mod paths;
pub mod storage_keys;

// Re-export commonly used types
pub use config::Config;
pub use filter::{filter_by_name, Named};
pub use models::{
    Exercise, ExercisePayload, ExerciseTemplate, LoginRequest, LoginResponse, ProfileUpdate,
    RegisterRequest, Role, Session, SetPayload, UserRef, Workout, WorkoutPayload, WorkoutSet,
};
