//! `window.history` binding for the router.

use wasm_bindgen::JsValue;

use forgepos_router::{History, HistoryError};

/// The real address bar.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
    window: web_sys::Window,
}

impl BrowserHistory {
    pub fn new() -> Result<Self, HistoryError> {
        let window =
            web_sys::window().ok_or_else(|| HistoryError::Unavailable("no window object".to_string()))?;
        Ok(Self { window })
    }

    /// Page origin (`scheme://host[:port]`), used to recognise in-app links.
    pub fn origin(&self) -> String {
        self.window.location().origin().unwrap_or_default()
    }

    fn history(&self) -> Result<web_sys::History, HistoryError> {
        self.window
            .history()
            .map_err(|e| HistoryError::Unavailable(format!("{e:?}")))
    }
}

impl History for BrowserHistory {
    fn current_path(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_string())
    }

    fn push(&mut self, path: &str) -> Result<(), HistoryError> {
        self.history()?
            .push_state_with_url(&JsValue::NULL, "", Some(path))
            .map_err(|e| HistoryError::Rejected(format!("{e:?}")))
    }

    fn replace(&mut self, path: &str) -> Result<(), HistoryError> {
        self.history()?
            .replace_state_with_url(&JsValue::NULL, "", Some(path))
            .map_err(|e| HistoryError::Rejected(format!("{e:?}")))
    }

    fn len(&self) -> usize {
        self.history()
            .and_then(|h| h.length().map_err(|e| HistoryError::Unavailable(format!("{e:?}"))))
            .map(|len| len as usize)
            .unwrap_or(0)
    }
}
