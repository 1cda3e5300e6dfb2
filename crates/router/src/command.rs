//! Closed set of UI intents consumed by the shell.

use serde::{Deserialize, Serialize};

use forgepos_auth::Role;

use crate::navigator::NavigationRequest;

/// Payload of the login-success signal raised by the login page once the
/// backend has accepted the credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSuccess {
    pub status: Role,
    #[serde(default)]
    pub store_id: Option<i64>,
}

/// Every UI event ends up as one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Navigate(NavigationRequest),
    LoginSuccess(LoginSuccess),
    Logout,
}

impl From<NavigationRequest> for Command {
    fn from(value: NavigationRequest) -> Self {
        Command::Navigate(value)
    }
}

impl From<LoginSuccess> for Command {
    fn from(value: LoginSuccess) -> Self {
        Command::LoginSuccess(value)
    }
}
