//! # Storage Manager
//!
//! String key-value storage consumed through get/set/remove primitives.
//! The session token, role, subject id and display name live here so they
//! survive restarts.

pub mod error;
pub mod file_storage;
pub mod memory_storage;
pub mod store;

pub use error::{Result, StorageError};
pub use file_storage::FileKeyValueStore;
pub use memory_storage::MemoryKeyValueStore;
pub use store::KeyValueStore;
