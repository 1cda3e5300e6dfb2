//! `forgepos-router`: client-side routing with a role guard.
//!
//! Decides, for every navigation attempt, which view the shell shows and what
//! the address bar says. Free of DOM types: the browser is reached through
//! [`History`] and the durable session through [`forgepos_auth::SessionStore`],
//! so the whole navigation cycle runs in host tests.

pub mod command;
pub mod guard;
pub mod history;
pub mod navigator;
pub mod route;
pub mod shell;
pub mod sync;
pub mod view;

pub use command::{Command, LoginSuccess};
pub use guard::{GuardDecision, decide};
pub use history::{History, HistoryAction, HistoryError, InMemoryHistory};
pub use navigator::{
    FallbackPolicy, NavigationOrigin, NavigationOutcome, NavigationRequest, Navigator, Outlet,
    Redirect, RedirectReason,
};
pub use route::{Route, RouteTable, RouteTableError, ViewId, normalize_path, paths};
pub use shell::{NavLink, Shell, ShellError, landing_path};
pub use sync::{ClickModifiers, link_activation, link_target};
pub use view::ViewRegistry;
