//! Inputs to the route guard

use crate::structs::SessionState;

use super::routes::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardEvent {
    /// Session restore has started or a login/logout is in flight
    SessionLoading,
    /// Session state settled (after restore, login or logout)
    SessionResolved { authenticated: bool },
    /// The navigator can accept redirects
    RouterReady,
    /// The navigator moved to another screen
    RouteChanged(Route),
    /// A screen re-rendered without any input changing
    Rendered,
}

impl From<&SessionState> for GuardEvent {
    fn from(state: &SessionState) -> Self {
        match state {
            SessionState::Loading => GuardEvent::SessionLoading,
            SessionState::Anonymous => GuardEvent::SessionResolved {
                authenticated: false,
            },
            SessionState::Authenticated(_) => GuardEvent::SessionResolved {
                authenticated: true,
            },
        }
    }
}
