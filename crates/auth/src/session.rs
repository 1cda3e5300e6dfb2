//! Persisted authentication state.
//!
//! The session is two keys in the durable store: `userStatus` holds the role
//! and `storeId` the selected location. Reads never fail; anything that does
//! not decode to a valid session is reported as anonymous.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use forgepos_core::StoreId;

use crate::storage::{KeyValueStore, StorageError};
use crate::Role;

/// Storage keys for the persisted session.
pub mod keys {
    /// Role of the signed-in user (`"employee"` or `"manager"`).
    pub const USER_STATUS: &str = "userStatus";

    /// Selected store, as an integer string.
    pub const STORE_ID: &str = "storeId";
}

/// Current session as seen by the guard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<StoreId>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.role.is_authenticated()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidSessionError {
    #[error("cannot establish a session for role '{0}'")]
    UnsupportedRole(Role),

    #[error("employee session requires a retail store (1-5), got {0:?}")]
    StoreOutOfRange(Option<i64>),

    #[error("manager session cannot be bound to retail store {0}")]
    ManagerBoundToStore(i64),

    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
}

/// Reads and writes the persisted session.
///
/// Every call goes to the backing store; implementations must not cache, so
/// a write is visible to the very next `current()`.
pub trait SessionStore {
    /// Current session. Absent or corrupted state is `Anonymous`.
    fn current(&self) -> Session;

    /// Validate and persist a new session. Invalid input writes nothing; a
    /// storage failure clears whatever was partially written.
    fn establish(&self, role: Role, store_id: Option<i64>) -> Result<Session, InvalidSessionError>;

    /// Remove the persisted session. Idempotent.
    fn clear(&self);
}

/// [`SessionStore`] over any [`KeyValueStore`] backend.
#[derive(Debug, Default)]
pub struct KeyValueSessionStore<B> {
    backend: B,
}

impl<B: KeyValueStore> KeyValueSessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn read(&self) -> Result<Session, String> {
        let Some(status) = self.backend.get(keys::USER_STATUS).map_err(|e| e.to_string())? else {
            return Ok(Session::anonymous());
        };
        let role = Role::from_status(&status)
            .ok_or_else(|| format!("unrecognized {} value {status:?}", keys::USER_STATUS))?;

        let store_id = match self.backend.get(keys::STORE_ID).map_err(|e| e.to_string())? {
            Some(raw) => Some(raw.parse::<StoreId>().map_err(|e| e.to_string())?),
            None => None,
        };

        match (role, store_id) {
            (Role::Employee, Some(id)) if id.is_retail() => Ok(Session { role, store_id }),
            (Role::Employee, other) => Err(format!("employee session with store {other:?}")),
            (Role::Manager, Some(id)) if id.is_retail() => {
                Err(format!("manager session bound to retail store {id}"))
            }
            (_, store_id) => Ok(Session { role, store_id }),
        }
    }

    fn write(&self, session: &Session) -> Result<(), StorageError> {
        match session.store_id {
            Some(id) => self.backend.set(keys::STORE_ID, &id.to_string())?,
            None => self.backend.remove(keys::STORE_ID)?,
        }
        // userStatus last: it is what marks the session as present.
        self.backend.set(keys::USER_STATUS, session.role.as_str())
    }
}

/// Check the establish rules without touching storage.
fn validate(role: Role, store_id: Option<i64>) -> Result<Session, InvalidSessionError> {
    match role {
        Role::Anonymous => Err(InvalidSessionError::UnsupportedRole(role)),
        Role::Employee => {
            let id = store_id
                .and_then(|v| u8::try_from(v).ok())
                .and_then(|v| StoreId::retail(v).ok())
                .ok_or(InvalidSessionError::StoreOutOfRange(store_id))?;
            Ok(Session { role, store_id: Some(id) })
        }
        Role::Manager => match store_id {
            None => Ok(Session { role, store_id: None }),
            Some(0) => Ok(Session {
                role,
                store_id: Some(StoreId::CENTRAL_WAREHOUSE),
            }),
            Some(other) => Err(InvalidSessionError::ManagerBoundToStore(other)),
        },
    }
}

impl<B: KeyValueStore> SessionStore for KeyValueSessionStore<B> {
    fn current(&self) -> Session {
        match self.read() {
            Ok(session) => session,
            Err(reason) => {
                tracing::warn!(%reason, "persisted session is corrupted; treating as anonymous");
                Session::anonymous()
            }
        }
    }

    fn establish(&self, role: Role, store_id: Option<i64>) -> Result<Session, InvalidSessionError> {
        let session = validate(role, store_id)?;

        if let Err(err) = self.write(&session) {
            // Fail closed: never leave a half-written session behind.
            self.clear();
            return Err(err.into());
        }

        tracing::info!(role = %session.role, store_id = ?session.store_id.map(|s| s.value()), "session established");
        Ok(session)
    }

    fn clear(&self) {
        for key in [keys::USER_STATUS, keys::STORE_ID] {
            if let Err(err) = self.backend.remove(key) {
                tracing::error!(key, error = %err, "failed to remove session key");
            }
        }
        tracing::info!("session cleared");
    }
}
