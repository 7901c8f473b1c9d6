use std::sync::Arc;

use flexify_client::error::NO_TOKEN_MESSAGE;
use flexify_client::{ApiError, FlexifyApi};
use session_manager::SessionManager;

use crate::error::{Result, SyncError};
use crate::notify::{Notification, Notifier};

/// Collaborators shared by every synchronizer of a running client.
#[derive(Clone)]
pub struct SyncContext {
    pub api: Arc<dyn FlexifyApi>,
    pub session: Arc<SessionManager>,
    pub notifier: Arc<dyn Notifier>,
}

impl SyncContext {
    pub fn new(
        api: Arc<dyn FlexifyApi>,
        session: Arc<SessionManager>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
        }
    }

    /// Fail with `MissingCredentials` when no token is stored.
    pub async fn ensure_token(&self) -> Result<()> {
        if self.api.has_token().await {
            Ok(())
        } else {
            tracing::warn!("no access token stored");
            Err(ApiError::MissingCredentials.into())
        }
    }

    pub fn success(&self, title: &str) {
        self.notifier.notify(Notification::success(title));
    }

    pub fn success_with(&self, title: &str, detail: &str) {
        self.notifier
            .notify(Notification::success(title).with_detail(detail));
    }

    /// Report a failed operation. Stale results are dropped silently.
    pub fn failure(&self, title: &str, error: &SyncError) {
        if error.is_stale() {
            return;
        }
        tracing::warn!(title, error = %error, "operation failed");
        let notification = match error {
            SyncError::Api(ApiError::MissingCredentials) => Notification::error(NO_TOKEN_MESSAGE),
            SyncError::Validation(message) => Notification::error(message.as_str()),
            other => Notification::error(title).with_detail(other.user_message()),
        };
        self.notifier.notify(notification);
    }

    /// Record the outcome of an operation in `last_error` and report failures.
    pub fn settle<T>(
        &self,
        last_error: &mut Option<String>,
        title: &str,
        result: Result<T>,
    ) -> Result<T> {
        match &result {
            Ok(_) => *last_error = None,
            Err(e) if e.is_stale() => {}
            Err(e) => {
                *last_error = Some(e.user_message());
                self.failure(title, e);
            }
        }
        result
    }
}
