//! Guard decisions
//!
//! The guard re-evaluates only when one of its inputs changes, and a given
//! (authenticated, route) situation yields at most one redirect. Decisions
//! are deferred until the router is ready and the session has resolved.

use super::events::GuardEvent;
use super::routes::Route;

/// A navigation replacement requested by the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redirect {
    pub from: Route,
    pub to: Route,
}

#[derive(Debug, Clone)]
pub struct RouteGuard {
    /// `None` while the session is loading.
    authenticated: Option<bool>,
    router_ready: bool,
    current: Route,
    /// Last situation a decision was taken for.
    last_evaluated: Option<(bool, Route)>,
    history: Vec<Redirect>,
    max_history: usize,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(Route::Welcome)
    }
}

impl RouteGuard {
    /// A guard sitting on `initial`, waiting for the session and the router.
    pub fn new(initial: Route) -> Self {
        Self {
            authenticated: None,
            router_ready: false,
            current: initial,
            last_evaluated: None,
            history: Vec::new(),
            max_history: 50,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn is_router_ready(&self) -> bool {
        self.router_ready
    }

    /// Redirects issued so far (most recent last, bounded).
    pub fn history(&self) -> &[Redirect] {
        &self.history
    }

    pub fn session_restored(&mut self, authenticated: bool) -> Option<Redirect> {
        self.handle_event(GuardEvent::SessionResolved { authenticated })
    }

    pub fn session_changed(&mut self, authenticated: bool) -> Option<Redirect> {
        self.handle_event(GuardEvent::SessionResolved { authenticated })
    }

    pub fn router_ready(&mut self) -> Option<Redirect> {
        self.handle_event(GuardEvent::RouterReady)
    }

    pub fn route_changed(&mut self, route: Route) -> Option<Redirect> {
        self.handle_event(GuardEvent::RouteChanged(route))
    }

    pub fn handle_event(&mut self, event: GuardEvent) -> Option<Redirect> {
        match event {
            GuardEvent::SessionLoading => {
                self.authenticated = None;
                None
            }
            GuardEvent::SessionResolved { authenticated } => {
                self.authenticated = Some(authenticated);
                self.evaluate()
            }
            GuardEvent::RouterReady => {
                self.router_ready = true;
                self.evaluate()
            }
            GuardEvent::RouteChanged(route) => {
                self.current = route;
                self.evaluate()
            }
            GuardEvent::Rendered => None,
        }
    }

    fn evaluate(&mut self) -> Option<Redirect> {
        if !self.router_ready {
            tracing::trace!("router not ready, deferring guard decision");
            return None;
        }
        let authenticated = self.authenticated?;

        let situation = (authenticated, self.current);
        if self.last_evaluated == Some(situation) {
            return None;
        }
        self.last_evaluated = Some(situation);

        let in_unauthenticated_group = self.current.is_unauthenticated();
        let target = match (authenticated, in_unauthenticated_group) {
            (true, true) => Route::AUTHENTICATED_HOME,
            (false, false) => Route::LOGIN,
            _ => return None,
        };

        let redirect = Redirect {
            from: self.current,
            to: target,
        };
        tracing::debug!(from = ?redirect.from, to = ?redirect.to, "route guard redirect");

        self.history.push(redirect);
        if self.history.len() > self.max_history {
            self.history.remove(0);
        }
        Some(redirect)
    }
}
