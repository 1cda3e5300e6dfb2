//! Registry mapping view tags to their mount functions.

use std::collections::HashMap;

use crate::route::{RouteTable, ViewId};

type Mount<V> = Box<dyn Fn() -> V>;

/// Maps each [`ViewId`] to a function producing the rendered view `V`.
///
/// `V` is whatever the UI layer renders (a Leptos `View` in the browser, a
/// string in tests).
pub struct ViewRegistry<V> {
    mounts: HashMap<ViewId, Mount<V>>,
}

impl<V> Default for ViewRegistry<V> {
    fn default() -> Self {
        Self {
            mounts: HashMap::new(),
        }
    }
}

impl<V> ViewRegistry<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, view: ViewId, mount: impl Fn() -> V + 'static) -> Self {
        self.mounts.insert(view, Box::new(mount));
        self
    }

    pub fn mount(&self, view: ViewId) -> Option<V> {
        self.mounts.get(&view).map(|mount| mount())
    }

    pub fn contains(&self, view: ViewId) -> bool {
        self.mounts.contains_key(&view)
    }

    /// Views the table (plus the not-found view) references but nobody
    /// registered.
    pub fn missing(&self, routes: &RouteTable) -> Vec<ViewId> {
        let mut missing: Vec<ViewId> = routes
            .views()
            .chain(std::iter::once(ViewId::NotFound))
            .filter(|view| !self.contains(*view))
            .collect();
        missing.dedup();
        missing
    }
}

impl<V> core::fmt::Debug for ViewRegistry<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("views", &self.mounts.keys().collect::<Vec<_>>())
            .finish()
    }
}
