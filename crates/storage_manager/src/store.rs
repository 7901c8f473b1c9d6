//! Key-value store trait

use crate::error::Result;
use async_trait::async_trait;

/// Durable string storage.
///
/// Removing a key that is not present is not an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value
    async fn remove(&self, key: &str) -> Result<()>;
}
