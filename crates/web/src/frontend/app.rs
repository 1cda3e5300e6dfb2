//! Leptos application shell: navigation bar + router outlet.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use leptos::*;
use wasm_bindgen::JsCast;

use forgepos_auth::{KeyValueSessionStore, Session};
use forgepos_router::{
    ClickModifiers, Command, NavLink, NavigationOutcome, NavigationRequest, Navigator, Outlet,
    RouteTable, Shell, ShellError, link_activation,
};

use crate::frontend::history::BrowserHistory;
use crate::frontend::pages::{self, NotFoundPage};
use crate::frontend::storage::LocalStorage;
use crate::WebConfig;

pub type WebShell = Shell<KeyValueSessionStore<LocalStorage>, BrowserHistory>;

/// Handle shared with every page through Leptos context.
///
/// The shell lives on the UI thread only; each event borrows it for the
/// duration of one synchronous navigation.
#[derive(Clone)]
pub struct AppContext {
    shell: Rc<RefCell<WebShell>>,
    outlet: RwSignal<Outlet>,
    session: RwSignal<Session>,
    config: WebConfig,
}

impl AppContext {
    pub fn dispatch(&self, command: Command) -> Result<(), ShellError> {
        let outcome = self.shell.borrow_mut().dispatch(command)?;
        self.apply(outcome);
        Ok(())
    }

    pub fn navigate(&self, path: &str) {
        if let Err(err) = self.dispatch(NavigationRequest::link(path).into()) {
            tracing::error!(path, error = %err, "navigation failed");
        }
    }

    pub fn logout(&self) {
        if let Err(err) = self.dispatch(Command::Logout) {
            tracing::error!(error = %err, "logout failed");
        }
    }

    /// Session at the time of the call (not tracked).
    pub fn session(&self) -> Session {
        self.session.get_untracked()
    }

    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    fn nav_links(&self) -> Vec<NavLink> {
        self.shell.borrow().nav_links()
    }

    fn on_pop_state(&self) {
        let outcome = self.shell.borrow_mut().on_pop_state();
        self.apply(outcome);
    }

    fn on_click(&self, ev: &web_sys::MouseEvent) {
        if ev.default_prevented() {
            return;
        }
        let Some(anchor) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest("a").ok().flatten())
            .and_then(|el| el.dyn_into::<web_sys::HtmlAnchorElement>().ok())
        else {
            return;
        };

        let modifiers = ClickModifiers {
            button: ev.button(),
            ctrl: ev.ctrl_key(),
            meta: ev.meta_key(),
            shift: ev.shift_key(),
            alt: ev.alt_key(),
        };
        let origin = self.shell.borrow().navigator().history().origin();
        let target = anchor.target();

        if let Some(request) = link_activation(&anchor.href(), &origin, Some(&target), modifiers) {
            ev.prevent_default();
            if let Err(err) = self.dispatch(request.into()) {
                tracing::error!(error = %err, "link navigation failed");
            }
        }
    }

    fn apply(&self, outcome: NavigationOutcome) {
        // Read the session before touching signals: their effects may borrow the shell.
        let session = self.shell.borrow().session();
        self.session.set(session);
        self.outlet.set(outcome.outlet);
    }
}

fn build_shell() -> anyhow::Result<WebShell> {
    let storage = LocalStorage::open().context("localStorage is not available")?;
    let history = BrowserHistory::new().context("window.history is not available")?;

    Ok(Shell::new(Navigator::new(
        RouteTable::reference(),
        KeyValueSessionStore::new(storage),
        history,
    )))
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    let mut shell = match build_shell() {
        Ok(shell) => shell,
        Err(err) => {
            tracing::error!(error = %format!("{err:#}"), "cannot start the application shell");
            return view! { <p class="fatal">{format!("Unable to start: {err:#}")}</p> }.into_view();
        }
    };

    let initial = shell.start();
    let ctx = AppContext {
        outlet: create_rw_signal(initial.outlet),
        session: create_rw_signal(shell.session()),
        config: WebConfig::from_env(),
        shell: Rc::new(RefCell::new(shell)),
    };
    provide_context(ctx.clone());

    let popstate_ctx = ctx.clone();
    let _ = window_event_listener(ev::popstate, move |_| popstate_ctx.on_pop_state());
    let click_ctx = ctx.clone();
    let _ = window_event_listener(ev::click, move |ev| click_ctx.on_click(&ev));

    let registry = pages::registry();
    let missing = registry.missing(ctx.shell.borrow().navigator().routes());
    if !missing.is_empty() {
        tracing::warn!(?missing, "routes without a page component");
    }
    let registry = Rc::new(registry);
    let outlet = ctx.outlet;

    view! {
        <div class="app">
            <NavBar/>
            <main>
                {move || {
                    let current = outlet.get();
                    registry
                        .mount(current.view)
                        .unwrap_or_else(|| view! { <NotFoundPage/> }.into_view())
                }}
            </main>
        </div>
    }
    .into_view()
}

/// Navigation links for the current session, plus logout when signed in.
#[component]
fn NavBar() -> impl IntoView {
    let ctx = expect_context::<AppContext>();
    let session = ctx.session;
    let links_ctx = ctx.clone();

    view! {
        <nav>
            {move || {
                // Re-render whenever the session changes.
                session.with(|_| ());
                links_ctx
                    .nav_links()
                    .into_iter()
                    .map(|link| view! { <a href=link.href>{link.label}</a> })
                    .collect_view()
            }}
            {move || {
                let ctx = ctx.clone();
                session
                    .get()
                    .is_authenticated()
                    .then(|| view! { <button class="logout" on:click=move |_| ctx.logout()>"Logout"</button> })
            }}
        </nav>
    }
}
