//! Navigation cycle: resolve, guard, mount, sync the address bar.

use serde::{Deserialize, Serialize};

use forgepos_auth::{SessionStore, explain_authorization};

use crate::guard::{GuardDecision, decide};
use crate::history::{History, HistoryAction};
use crate::route::{RouteTable, ViewId, normalize_path, paths};

/// Where a navigation request came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationOrigin {
    /// In-app link activation.
    LinkClick,
    /// Browser back/forward; the address bar already shows the target.
    PopState,
    /// Redirect issued by the router or the shell itself.
    ProgrammaticRedirect,
    /// Completion of a form (e.g. login).
    FormCompletion,
    /// First navigation after load: deep link or reload.
    Initial,
}

impl NavigationOrigin {
    /// Origins whose target is already in the address bar. These never push.
    pub fn replays_address_bar(&self) -> bool {
        matches!(self, NavigationOrigin::PopState | NavigationOrigin::Initial)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationRequest {
    pub target_path: String,
    pub origin: NavigationOrigin,
}

impl NavigationRequest {
    pub fn new(target_path: impl Into<String>, origin: NavigationOrigin) -> Self {
        Self {
            target_path: target_path.into(),
            origin,
        }
    }

    pub fn link(target_path: impl Into<String>) -> Self {
        Self::new(target_path, NavigationOrigin::LinkClick)
    }

    pub fn pop_state(target_path: impl Into<String>) -> Self {
        Self::new(target_path, NavigationOrigin::PopState)
    }
}

/// What to do with a path that matches no route.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Redirect to `/`; the address bar ends up showing `/`.
    #[default]
    RedirectHome,
    /// Render [`ViewId::NotFound`] and leave the requested path in the bar.
    NotFoundView,
}

/// The currently mounted view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outlet {
    pub view: ViewId,
    pub path: String,
    /// Bumped on every completed navigation so the UI re-renders even when
    /// the same view is shown again.
    pub generation: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    Denied,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub from: String,
    pub to: String,
    pub reason: RedirectReason,
}

/// Result of one navigation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationOutcome {
    pub requested: String,
    pub outlet: Outlet,
    pub redirects: Vec<Redirect>,
    pub history: HistoryAction,
}

impl NavigationOutcome {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

/// Resolves navigation requests against the route table and role guard, and
/// keeps the outlet and the address bar on the same route.
#[derive(Debug)]
pub struct Navigator<S, H> {
    routes: RouteTable,
    sessions: S,
    history: H,
    fallback: FallbackPolicy,
    outlet: Option<Outlet>,
    generation: u64,
}

impl<S: SessionStore, H: History> Navigator<S, H> {
    pub fn new(routes: RouteTable, sessions: S, history: H) -> Self {
        Self {
            routes,
            sessions,
            history,
            fallback: FallbackPolicy::default(),
            outlet: None,
            generation: 0,
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Run one navigation cycle.
    ///
    /// Denial is an ordinary outcome: the cycle follows the redirect and the
    /// address bar is made to show the redirect target. If the bar was
    /// showing the refused path (deep link, reload, back/forward) that entry
    /// is replaced; otherwise a new entry is pushed.
    pub fn navigate(&mut self, request: NavigationRequest) -> NavigationOutcome {
        let _span = tracing::debug_span!(
            "navigate",
            target = %request.target_path,
            origin = ?request.origin
        )
        .entered();

        let requested = normalize_path(&request.target_path);
        let displayed = normalize_path(&self.history.current_path());

        let mut target = requested.clone();
        let mut redirects = Vec::new();
        let mut displayed_refused = false;

        // Terminates: the table guarantees `/` and `/login` exist and are public.
        let view = loop {
            let Some(route) = self.routes.resolve(&target) else {
                match self.fallback {
                    FallbackPolicy::NotFoundView => {
                        tracing::debug!(path = %target, "no route; rendering not-found view");
                        break ViewId::NotFound;
                    }
                    FallbackPolicy::RedirectHome => {
                        tracing::info!(path = %target, "no route; redirecting home");
                        displayed_refused |= displayed == target;
                        redirects.push(Redirect {
                            from: target,
                            to: paths::HOME.to_string(),
                            reason: RedirectReason::NotFound,
                        });
                        target = paths::HOME.to_string();
                        continue;
                    }
                }
            };

            let session = self.sessions.current();
            match decide(&session, route) {
                GuardDecision::Allow(view) => {
                    tracing::debug!(path = %target, role = %session.role, ?view, "access granted");
                    break view;
                }
                GuardDecision::Deny { redirect } => {
                    let explanation = explain_authorization(&session, &route.allowed_roles);
                    tracing::info!(
                        path = %target,
                        role = %session.role,
                        redirect = %redirect,
                        reason = %explanation.reason,
                        "access denied; redirecting"
                    );
                    displayed_refused |= displayed == target;
                    redirects.push(Redirect {
                        from: target,
                        to: redirect.clone(),
                        reason: RedirectReason::Denied,
                    });
                    target = redirect;
                }
            }
        };

        let history = self.sync_history(&displayed, &target, request.origin, displayed_refused);

        self.generation += 1;
        let outlet = Outlet {
            view,
            path: target,
            generation: self.generation,
        };
        self.outlet = Some(outlet.clone());

        NavigationOutcome {
            requested,
            outlet,
            redirects,
            history,
        }
    }

    fn sync_history(
        &mut self,
        displayed: &str,
        target: &str,
        origin: NavigationOrigin,
        displayed_refused: bool,
    ) -> HistoryAction {
        let action = if displayed == target {
            HistoryAction::None
        } else if displayed_refused || origin.replays_address_bar() {
            HistoryAction::Replace
        } else {
            HistoryAction::Push
        };

        let result = match action {
            HistoryAction::None => Ok(()),
            HistoryAction::Push => self.history.push(target),
            HistoryAction::Replace => self.history.replace(target),
        };
        match result {
            Ok(()) => action,
            Err(err) => {
                tracing::warn!(path = %target, ?action, error = %err, "failed to update history");
                HistoryAction::None
            }
        }
    }

    pub fn outlet(&self) -> Option<&Outlet> {
        self.outlet.as_ref()
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }
}
