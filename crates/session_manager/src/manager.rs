//! Session Manager service

use crate::error::{Result, SessionError};
use crate::storage::{clear_session, load_session, save_session};
use crate::structs::SessionState;
use flexify_core::{Role, Session};
use std::sync::Arc;
use storage_manager::KeyValueStore;
use tokio::sync::watch;

/// Session Manager - owns the authenticated identity of the running client.
///
/// Construct one at startup, share it behind an `Arc` and call
/// [`SessionManager::restore`] before anything asks who is signed in.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    state: watch::Sender<SessionState>,
}

impl SessionManager {
    /// Create a manager in the `Loading` state.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self { store, state }
    }

    /// The store the session is persisted to.
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.store)
    }

    /// Read the session back from durable storage. Never touches the network.
    ///
    /// A storage failure is logged and leaves the client signed out.
    pub async fn restore(&self) -> Option<Session> {
        let restored = match load_session(self.store.as_ref()).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, "failed to load auth data");
                None
            }
        };

        match &restored {
            Some(session) => {
                tracing::info!(subject_id = %session.subject_id, role = %session.role, "session restored");
                self.publish(SessionState::Authenticated(session.clone()));
            }
            None => {
                tracing::info!("no stored session");
                self.publish(SessionState::Anonymous);
            }
        }
        restored
    }

    /// Persist a freshly issued session, then mark the client signed in.
    ///
    /// If persisting fails the partially written keys are removed and the
    /// client stays signed out.
    pub async fn login(
        &self,
        token: &str,
        role: Role,
        subject_id: &str,
        display_name: Option<&str>,
    ) -> Result<Session> {
        if token.is_empty() {
            return Err(SessionError::Validation("access token is empty".to_string()));
        }
        if subject_id.is_empty() {
            return Err(SessionError::Validation("subject id is empty".to_string()));
        }

        let session = Session::new(token, role, subject_id, display_name.unwrap_or_default());

        if let Err(e) = save_session(self.store.as_ref(), &session).await {
            tracing::error!(error = %e, "failed to login");
            if let Err(cleanup) = clear_session(self.store.as_ref()).await {
                tracing::warn!(error = %cleanup, "failed to roll back partial session");
            }
            self.publish(SessionState::Anonymous);
            return Err(e);
        }

        tracing::info!(subject_id = %session.subject_id, role = %session.role, "logged in");
        self.publish(SessionState::Authenticated(session.clone()));
        Ok(session)
    }

    /// Forget the session. Clearing keys that are already gone is fine.
    ///
    /// The in-memory session is dropped even when a key could not be
    /// removed; that failure is still returned.
    pub async fn logout(&self) -> Result<()> {
        let cleared = clear_session(self.store.as_ref()).await;
        if let Err(e) = &cleared {
            tracing::error!(error = %e, "failed to logout cleanly");
        }
        self.publish(SessionState::Anonymous);
        tracing::info!("logged out");
        cleared
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn session(&self) -> Option<Session> {
        self.state.borrow().session().cloned()
    }

    /// The signed-in session, or `NotAuthenticated`.
    pub fn require_session(&self) -> Result<Session> {
        self.session().ok_or(SessionError::NotAuthenticated)
    }

    /// Observe session changes, including the end of the startup restore.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Update the display name after a successful profile edit.
    pub async fn set_display_name(&self, display_name: &str) -> Result<()> {
        let Some(mut session) = self.session() else {
            return Err(SessionError::NotAuthenticated);
        };
        self.store
            .set(crate::storage::DISPLAY_NAME_KEY, display_name)
            .await?;
        session.display_name = display_name.to_string();
        self.publish(SessionState::Authenticated(session));
        Ok(())
    }

    fn publish(&self, next: SessionState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}
