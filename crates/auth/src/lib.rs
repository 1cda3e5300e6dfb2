//! `forgepos-auth`: pure session/authorization boundary.
//!
//! This crate is intentionally decoupled from the browser: the durable store
//! is reached through [`KeyValueStore`], so every rule here runs on the host.

pub mod authorize;
pub mod roles;
pub mod session;
pub mod storage;

pub use authorize::{
    AuthorizationExplanation, AuthzError, DenialKind, DenialReason, authorize,
    explain_authorization,
};
pub use roles::{Role, RoleSet};
pub use session::{InvalidSessionError, KeyValueSessionStore, Session, SessionStore, keys};
pub use storage::{InMemoryKeyValueStore, KeyValueStore, StorageError};
