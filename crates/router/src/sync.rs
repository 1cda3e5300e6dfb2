//! Link interception rules for history sync.
//!
//! The browser binding (click and popstate listeners) lives in the web
//! crate; the decisions about which clicks become in-app navigations live
//! here so they can be tested without a DOM.

use crate::navigator::NavigationRequest;
use crate::route::normalize_path;

/// Mouse state of a link activation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct ClickModifiers {
    pub button: i16,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl ClickModifiers {
    /// Primary button without modifier keys. Anything else (new tab, new
    /// window, download) is left to the browser.
    pub fn is_plain_primary(&self) -> bool {
        self.button == 0 && !(self.ctrl || self.meta || self.shift || self.alt)
    }
}

/// Extract the in-app path from an anchor's `href`.
///
/// `origin` is the page origin (`scheme://host[:port]`). Accepts same-origin
/// URLs and absolute paths (`/orders`); the browser reports `anchor.href` as
/// a full URL, so document-relative forms (`orders`, `./orders`) are not
/// resolved and return `None`, as do other origins, non-http schemes and
/// fragment-only links.
pub fn link_target(href: &str, origin: &str) -> Option<String> {
    let href = href.trim();
    let path = match href.strip_prefix(origin) {
        Some("") if !origin.is_empty() => return Some(normalize_path("/")),
        Some(rest) if !origin.is_empty() => rest,
        _ => href,
    };

    if !path.starts_with('/') || path.starts_with("//") {
        return None;
    }
    if path.split(['?', '#']).next().is_some_and(has_dot_segment) {
        return None;
    }

    Some(normalize_path(path))
}

fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| segment == "." || segment == "..")
}

/// Turn a link activation into a navigation request, or `None` when the
/// browser should handle the click itself.
pub fn link_activation(
    href: &str,
    origin: &str,
    target_attr: Option<&str>,
    modifiers: ClickModifiers,
) -> Option<NavigationRequest> {
    if !modifiers.is_plain_primary() {
        return None;
    }
    if target_attr.is_some_and(|t| !t.is_empty() && t != "_self") {
        return None;
    }
    link_target(href, origin).map(NavigationRequest::link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigator::NavigationOrigin;

    const ORIGIN: &str = "http://localhost:5173";

    #[test]
    fn same_origin_absolute_links_are_handled() {
        assert_eq!(
            link_target("http://localhost:5173/orders", ORIGIN).as_deref(),
            Some("/orders")
        );
        assert_eq!(link_target("http://localhost:5173", ORIGIN).as_deref(), Some("/"));
        assert_eq!(
            link_target("http://localhost:5173/login?next=/orders", ORIGIN).as_deref(),
            Some("/login")
        );
    }

    #[test]
    fn absolute_paths_are_handled() {
        assert_eq!(link_target("/products", ORIGIN).as_deref(), Some("/products"));
        assert_eq!(link_target("/orders?tab=open", ORIGIN).as_deref(), Some("/orders"));
    }

    #[test]
    fn foreign_and_special_links_are_left_alone() {
        assert_eq!(link_target("https://example.com/orders", ORIGIN), None);
        assert_eq!(link_target("http://localhost:5173.evil.test/x", ORIGIN), None);
        assert_eq!(link_target("//cdn.example.com/app.js", ORIGIN), None);
        assert_eq!(link_target("mailto:support@example.com", ORIGIN), None);
        assert_eq!(link_target("javascript:void(0)", ORIGIN), None);
        assert_eq!(link_target("#top", ORIGIN), None);
        assert_eq!(link_target("", ORIGIN), None);
    }

    #[test]
    fn document_relative_links_are_not_resolved() {
        assert_eq!(link_target("orders", ORIGIN), None);
        assert_eq!(link_target("./orders", ORIGIN), None);
        assert_eq!(link_target("/products/../orders", ORIGIN), None);
        assert_eq!(link_target("http://localhost:5173/./orders", ORIGIN), None);
    }

    #[test]
    fn modified_clicks_and_new_windows_are_not_intercepted() {
        let plain = ClickModifiers::default();
        let request = link_activation("/orders", ORIGIN, None, plain).unwrap();
        assert_eq!(request.origin, NavigationOrigin::LinkClick);
        assert_eq!(request.target_path, "/orders");

        let ctrl = ClickModifiers { ctrl: true, ..plain };
        assert_eq!(link_activation("/orders", ORIGIN, None, ctrl), None);

        let middle = ClickModifiers { button: 1, ..plain };
        assert_eq!(link_activation("/orders", ORIGIN, None, middle), None);

        assert_eq!(link_activation("/orders", ORIGIN, Some("_blank"), plain), None);
        assert!(link_activation("/orders", ORIGIN, Some("_self"), plain).is_some());
    }
}
