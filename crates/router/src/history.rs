//! Address-bar abstraction.

use serde::Serialize;
use thiserror::Error;

use crate::route::normalize_path;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("history unavailable: {0}")]
    Unavailable(String),

    #[error("history update rejected: {0}")]
    Rejected(String),
}

/// What the navigator did to the history stack.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    /// The address bar already showed the final path, or updating it failed.
    None,
    /// A new entry was appended.
    Push,
    /// The current entry was rewritten in place.
    Replace,
}

/// The browser's address bar and session history.
pub trait History {
    /// Path currently shown in the address bar.
    fn current_path(&self) -> String;

    /// Append an entry for `path` and make it current.
    fn push(&mut self, path: &str) -> Result<(), HistoryError>;

    /// Rewrite the current entry to `path`.
    fn replace(&mut self, path: &str) -> Result<(), HistoryError>;

    /// Number of entries in the stack.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory history stack with a cursor, mirroring browser semantics:
/// pushing drops any forward entries, `back`/`forward` only move the cursor.
///
/// Intended for tests/dev.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl InMemoryHistory {
    pub fn new(initial_path: &str) -> Self {
        Self {
            entries: vec![normalize_path(initial_path)],
            cursor: 0,
        }
    }

    /// Move one entry back and return the path now shown (like a popstate).
    pub fn back(&mut self) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Move one entry forward and return the path now shown.
    pub fn forward(&mut self) -> Option<String> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for InMemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for InMemoryHistory {
    fn current_path(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn push(&mut self, path: &str) -> Result<(), HistoryError> {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(normalize_path(path));
        self.cursor = self.entries.len() - 1;
        Ok(())
    }

    fn replace(&mut self, path: &str) -> Result<(), HistoryError> {
        self.entries[self.cursor] = normalize_path(path);
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_drops_forward_entries() {
        let mut history = InMemoryHistory::new("/");
        history.push("/login").unwrap();
        history.push("/orders").unwrap();
        assert_eq!(history.back(), Some("/login".to_string()));

        history.push("/products").unwrap();
        assert_eq!(history.entries(), ["/", "/login", "/products"]);
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn back_and_forward_move_cursor_only() {
        let mut history = InMemoryHistory::new("/");
        history.push("/login").unwrap();

        assert_eq!(history.back(), Some("/".to_string()));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some("/login".to_string()));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn replace_rewrites_current_entry() {
        let mut history = InMemoryHistory::new("/orders");
        history.replace("/login").unwrap();
        assert_eq!(history.entries(), ["/login"]);
        assert_eq!(history.current_path(), "/login");
    }
}
