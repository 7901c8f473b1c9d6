//! Reading and writing the session fields in the key-value store

use crate::error::Result;
use flexify_core::{Role, Session};
use storage_manager::{KeyValueStore, StorageError};

pub use flexify_core::storage_keys::{
    ACCESS_TOKEN_KEY, DISPLAY_NAME_KEY, SESSION_KEYS, SUBJECT_ID_KEY, USER_ROLE_KEY,
};

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Load the stored session. Token, role and subject id must all be present
/// and non-empty; a missing display name reads as empty.
pub async fn load_session(store: &dyn KeyValueStore) -> Result<Option<Session>> {
    let token = non_empty(store.get(ACCESS_TOKEN_KEY).await?);
    let role = non_empty(store.get(USER_ROLE_KEY).await?);
    let subject_id = non_empty(store.get(SUBJECT_ID_KEY).await?);
    let display_name = store.get(DISPLAY_NAME_KEY).await?.unwrap_or_default();

    match (token, role, subject_id) {
        (Some(token), Some(role), Some(subject_id)) => Ok(Some(Session {
            token,
            role: Role::from_stored(&role),
            subject_id,
            display_name,
        })),
        _ => Ok(None),
    }
}

pub async fn save_session(store: &dyn KeyValueStore, session: &Session) -> Result<()> {
    store.set(ACCESS_TOKEN_KEY, &session.token).await?;
    store.set(USER_ROLE_KEY, session.role.as_str()).await?;
    store.set(SUBJECT_ID_KEY, &session.subject_id).await?;
    store.set(DISPLAY_NAME_KEY, &session.display_name).await?;
    Ok(())
}

/// Remove every session key. All removals are attempted even if one fails;
/// the first failure is returned.
pub async fn clear_session(store: &dyn KeyValueStore) -> Result<()> {
    let mut first_error: Option<StorageError> = None;
    for key in SESSION_KEYS {
        if let Err(e) = store.remove(key).await {
            tracing::warn!(key, error = %e, "failed to remove session key");
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
