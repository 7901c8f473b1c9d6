//! Route guard module
//!
//! Decides where navigation must go when the session and the current route
//! disagree.

mod events;
mod routes;
mod transitions;

pub use events::GuardEvent;
pub use routes::{Route, RouteGroup};
pub use transitions::{Redirect, RouteGuard};
