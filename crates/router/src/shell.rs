//! Top-level frame: owns the navigator and handles session transitions.

use serde::Serialize;
use thiserror::Error;

use forgepos_auth::{InvalidSessionError, Role, Session, SessionStore, authorize};

use crate::command::{Command, LoginSuccess};
use crate::history::History;
use crate::navigator::{NavigationOrigin, NavigationOutcome, NavigationRequest, Navigator, Outlet};
use crate::route::{ViewId, paths};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("login rejected: {0}")]
    InvalidSession(#[from] InvalidSessionError),
}

/// A navigation link the shell shows for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub href: String,
    pub label: &'static str,
    pub view: ViewId,
}

/// Landing route after a successful login.
pub fn landing_path(role: Role) -> Option<&'static str> {
    match role {
        Role::Employee => Some(paths::EMPLOYEE_DASHBOARD),
        Role::Manager => Some(paths::MANAGER_DASHBOARD),
        Role::Anonymous => None,
    }
}

/// Application shell.
///
/// All UI events reach the router through [`Shell::dispatch`], which makes the
/// control flow replayable from a list of [`Command`]s.
#[derive(Debug)]
pub struct Shell<S, H> {
    navigator: Navigator<S, H>,
}

impl<S: SessionStore, H: History> Shell<S, H> {
    pub fn new(navigator: Navigator<S, H>) -> Self {
        Self { navigator }
    }

    /// Render whatever the address bar shows at load time (deep link/reload).
    pub fn start(&mut self) -> NavigationOutcome {
        let path = self.navigator.history().current_path();
        self.navigator
            .navigate(NavigationRequest::new(path, NavigationOrigin::Initial))
    }

    pub fn dispatch(&mut self, command: Command) -> Result<NavigationOutcome, ShellError> {
        match command {
            Command::Navigate(request) => Ok(self.navigator.navigate(request)),
            Command::LoginSuccess(LoginSuccess { status, store_id }) => {
                self.on_login_success(status, store_id)
            }
            Command::Logout => Ok(self.on_logout()),
        }
    }

    /// Persist the session, then land on the role's dashboard.
    ///
    /// The write completes before the landing route is guarded; on an invalid
    /// session nothing is written and no navigation happens.
    pub fn on_login_success(
        &mut self,
        role: Role,
        store_id: Option<i64>,
    ) -> Result<NavigationOutcome, ShellError> {
        let session = self.navigator.sessions().establish(role, store_id)?;
        let landing = landing_path(session.role).unwrap_or(paths::HOME);

        tracing::info!(role = %session.role, landing, "login succeeded");
        Ok(self
            .navigator
            .navigate(NavigationRequest::new(landing, NavigationOrigin::FormCompletion)))
    }

    /// Drop the session and return to the home page.
    pub fn on_logout(&mut self) -> NavigationOutcome {
        self.navigator.sessions().clear();
        tracing::info!("logged out");
        self.navigator.navigate(NavigationRequest::new(
            paths::HOME,
            NavigationOrigin::ProgrammaticRedirect,
        ))
    }

    /// Browser back/forward: replay whatever the address bar now shows.
    pub fn on_pop_state(&mut self) -> NavigationOutcome {
        let path = self.navigator.history().current_path();
        self.navigator.navigate(NavigationRequest::pop_state(path))
    }

    /// Links for the navigation bar: every route the session may open,
    /// without the login link once signed in.
    pub fn nav_links(&self) -> Vec<NavLink> {
        let session = self.session();
        self.navigator
            .routes()
            .routes()
            .iter()
            .filter(|route| !(session.is_authenticated() && route.path == paths::LOGIN))
            .filter(|route| authorize(&session, &route.allowed_roles).is_ok())
            .map(|route| NavLink {
                href: route.path.clone(),
                label: route.view.title(),
                view: route.view,
            })
            .collect()
    }

    pub fn can_logout(&self) -> bool {
        self.session().is_authenticated()
    }

    pub fn session(&self) -> Session {
        self.navigator.sessions().current()
    }

    pub fn outlet(&self) -> Option<&Outlet> {
        self.navigator.outlet()
    }

    pub fn navigator(&self) -> &Navigator<S, H> {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator<S, H> {
        &mut self.navigator
    }
}
