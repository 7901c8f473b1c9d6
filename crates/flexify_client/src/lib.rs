pub mod api;
pub mod auth;
pub mod client_trait;
pub mod endpoints;
pub mod error;
pub mod utils;

pub use api::client::FlexifyClient;
pub use auth::bearer::BearerAuthMiddleware;
pub use client_trait::FlexifyApi;
pub use error::{ApiError, Result};
pub use flexify_core::Config;
