//! Role guard: the pure gate in front of every route.

use forgepos_auth::{Session, authorize};

use crate::route::{Route, ViewId, paths};

/// Outcome of guarding a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow(ViewId),
    Deny { redirect: String },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow(_))
    }
}

/// Decide whether `session` may view `route`.
///
/// Public routes always allow. Otherwise the session's role must be one of
/// the route's allowed roles; an anonymous session never is. Every denial
/// redirects to the login page.
pub fn decide(session: &Session, route: &Route) -> GuardDecision {
    match authorize(session, &route.allowed_roles) {
        Ok(()) => GuardDecision::Allow(route.view),
        Err(_) => GuardDecision::Deny {
            redirect: paths::LOGIN.to_string(),
        },
    }
}
