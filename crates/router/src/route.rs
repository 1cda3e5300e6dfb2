//! Route definitions and exact-match path resolution.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use forgepos_auth::RoleSet;

/// Well-known paths of the point-of-sale front end.
pub mod paths {
    pub const HOME: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const EMPLOYEE_DASHBOARD: &str = "/employee-dashboard";
    pub const MANAGER_DASHBOARD: &str = "/manager-dashboard";
    pub const PRODUCTS: &str = "/products";
    pub const ORDERS: &str = "/orders";
    pub const PRODUCTS_RESTOCK: &str = "/products-restock";
}

/// Tag naming a page component.
///
/// Rendering lives in a [`crate::ViewRegistry`]; the route table only carries
/// this tag so it stays plain data.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewId {
    Home,
    Login,
    EmployeeDashboard,
    ManagerDashboard,
    Products,
    Orders,
    ProductsRestock,
    NotFound,
}

impl ViewId {
    pub fn title(&self) -> &'static str {
        match self {
            ViewId::Home => "Home",
            ViewId::Login => "Login",
            ViewId::EmployeeDashboard => "Employee Dashboard",
            ViewId::ManagerDashboard => "Manager Dashboard",
            ViewId::Products => "Products",
            ViewId::Orders => "Orders",
            ViewId::ProductsRestock => "Restock",
            ViewId::NotFound => "Not Found",
        }
    }
}

/// A path-to-view binding annotated with the roles permitted to view it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    pub allowed_roles: RoleSet,
    pub view: ViewId,
}

impl Route {
    pub fn new(path: impl Into<String>, allowed_roles: RoleSet, view: ViewId) -> Self {
        Self {
            path: path.into(),
            allowed_roles,
            view,
        }
    }

    pub fn public(path: impl Into<String>, view: ViewId) -> Self {
        Self::new(path, RoleSet::PUBLIC, view)
    }

    pub fn is_public(&self) -> bool {
        self.allowed_roles.is_public()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteTableError {
    #[error("duplicate route path '{0}'")]
    DuplicatePath(String),

    #[error("route path '{0}' is not normalized (expected '{1}')")]
    NotNormalized(String, String),

    #[error("required route '{0}' is missing")]
    MissingRoute(&'static str),

    #[error("route '{0}' must be public")]
    NotPublic(&'static str),
}

/// Fixed, ordered set of routes.
///
/// # Invariants
/// - Paths are unique and normalized.
/// - `/` and `/login` exist and are public, so a denial (redirect to login)
///   or a miss (redirect home) always lands on a route that renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteTableError> {
        let mut seen = HashSet::new();
        for route in &routes {
            let normalized = normalize_path(&route.path);
            if normalized != route.path {
                return Err(RouteTableError::NotNormalized(route.path.clone(), normalized));
            }
            if !seen.insert(route.path.as_str()) {
                return Err(RouteTableError::DuplicatePath(route.path.clone()));
            }
        }

        for required in [paths::HOME, paths::LOGIN] {
            let route = routes
                .iter()
                .find(|r| r.path == required)
                .ok_or(RouteTableError::MissingRoute(required))?;
            if !route.is_public() {
                return Err(RouteTableError::NotPublic(required));
            }
        }

        Ok(Self { routes })
    }

    /// Reference deployment table.
    pub fn reference() -> Self {
        Self {
            routes: vec![
                Route::public(paths::HOME, ViewId::Home),
                Route::public(paths::LOGIN, ViewId::Login),
                Route::new(paths::EMPLOYEE_DASHBOARD, RoleSet::EMPLOYEE, ViewId::EmployeeDashboard),
                Route::new(paths::MANAGER_DASHBOARD, RoleSet::MANAGER, ViewId::ManagerDashboard),
                Route::new(paths::PRODUCTS, RoleSet::STAFF, ViewId::Products),
                Route::new(paths::ORDERS, RoleSet::STAFF, ViewId::Orders),
                Route::new(paths::PRODUCTS_RESTOCK, RoleSet::EMPLOYEE, ViewId::ProductsRestock),
            ],
        }
    }

    /// Exact-match lookup after normalization. `None` is a miss (not found).
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let path = normalize_path(path);
        self.routes.iter().find(|r| r.path == path)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn views(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.routes.iter().map(|r| r.view)
    }
}

/// Reduce an address-bar value to the form stored in the route table.
///
/// Query string and fragment are dropped, a leading `/` is ensured and a
/// trailing `/` (other than the root) is removed.
pub fn normalize_path(raw: &str) -> String {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = raw[..end].trim();
    let path = path.trim_end_matches('/');

    if path.is_empty() {
        return paths::HOME.to_string();
    }
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
