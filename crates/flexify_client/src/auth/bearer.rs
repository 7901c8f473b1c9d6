use std::sync::Arc;

use async_trait::async_trait;
use flexify_core::storage_keys::ACCESS_TOKEN_KEY;
use http::Extensions;
use log::{debug, warn};
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};
use storage_manager::KeyValueStore;

/// Attaches `Authorization: Bearer <token>` to every outgoing request.
///
/// The token is read from durable storage right before each request rather
/// than from the in-memory session, so a request made just after a restart or
/// a logout carries whatever is actually stored. Without a token the request
/// goes out bare and the server answers 401.
pub struct BearerAuthMiddleware {
    store: Arc<dyn KeyValueStore>,
}

impl BearerAuthMiddleware {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub(crate) async fn current_token(store: &dyn KeyValueStore) -> Option<String> {
        match store.get(ACCESS_TOKEN_KEY).await {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to read access token from storage: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl Middleware for BearerAuthMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        if let Some(token) = Self::current_token(self.store.as_ref()).await {
            match HeaderValue::from_str(&format!("Bearer {token}")) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    req.headers_mut().insert(AUTHORIZATION, value);
                }
                Err(e) => warn!("Stored access token is not a valid header value: {e}"),
            }
        } else {
            debug!("No access token stored, sending {} without credentials", req.url());
        }
        next.run(req, extensions).await
    }
}
