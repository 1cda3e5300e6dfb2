//! Login wire types shared by the browser code and host tests.
//!
//! These types must not depend on browser-only crates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use forgepos_auth::Role;
use forgepos_core::StoreId;
use forgepos_router::LoginSuccess;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("please select a valid store (1-5)")]
    InvalidStore,

    #[error("cannot reach the server")]
    Network,

    #[error("{0}")]
    Rejected(String),

    #[error("unrecognized user role '{0}'")]
    UnknownRole(String),

    #[error("invalid server response: {0}")]
    Decode(String),
}

impl LoginError {
    /// Build the rejection for a non-2xx answer from its body text.
    pub fn rejected(body: Option<String>) -> Self {
        let message = body
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| "login failed".to_string());
        Self::Rejected(message)
    }
}

/// State of the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub store_id: i64,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            role: Role::Employee,
            store_id: i64::from(StoreId::FIRST_RETAIL),
        }
    }
}

impl LoginForm {
    /// Switch the role; managers always work from the central warehouse,
    /// employees start on the first retail store.
    pub fn select_role(&mut self, role: Role) {
        self.role = role;
        self.store_id = match role {
            Role::Manager => i64::from(StoreId::CENTRAL_WAREHOUSE.value()),
            _ => i64::from(StoreId::FIRST_RETAIL),
        };
    }

    /// Only employees pick a store.
    pub fn select_store(&mut self, store_id: i64) {
        if self.role == Role::Employee {
            self.store_id = store_id;
        }
    }

    pub fn to_request(&self) -> Result<LoginRequest, LoginError> {
        let retail = u8::try_from(self.store_id)
            .ok()
            .and_then(|v| StoreId::retail(v).ok());
        if self.role == Role::Employee && retail.is_none() {
            return Err(LoginError::InvalidStore);
        }

        Ok(LoginRequest {
            username: self.username.clone(),
            password: self.password.clone(),
            store_id: self.store_id,
        })
    }
}

/// Body of `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub store_id: i64,
}

/// Successful answer of `POST /login`; only `status` matters to the router.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub status: String,
}

impl LoginResponse {
    /// Build the login-success signal for the store the user picked.
    pub fn into_login_success(self, store_id: i64) -> Result<LoginSuccess, LoginError> {
        let status = Role::from_status(&self.status).ok_or(LoginError::UnknownRole(self.status))?;
        Ok(LoginSuccess {
            status,
            store_id: Some(store_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manager_form_uses_central_warehouse() {
        let mut form = LoginForm::default();
        form.select_role(Role::Manager);
        form.select_store(3);

        let request = form.to_request().unwrap();
        assert_eq!(request.store_id, 0);
    }

    #[test]
    fn employee_form_requires_retail_store() {
        let mut form = LoginForm {
            username: "employee".to_string(),
            password: "test".to_string(),
            ..LoginForm::default()
        };
        form.select_store(0);
        assert_eq!(form.to_request(), Err(LoginError::InvalidStore));

        form.select_store(4);
        let request = form.to_request().unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({ "username": "employee", "password": "test", "store_id": 4 })
        );
    }

    #[test]
    fn response_status_becomes_login_signal() {
        let response: LoginResponse =
            serde_json::from_str(r#"{ "status": "employee", "message": "ok" }"#).unwrap();
        assert_eq!(
            response.into_login_success(2),
            Ok(LoginSuccess {
                status: Role::Employee,
                store_id: Some(2)
            })
        );

        let response = LoginResponse {
            status: "auditor".to_string(),
        };
        assert_eq!(
            response.into_login_success(1),
            Err(LoginError::UnknownRole("auditor".to_string()))
        );
    }

    #[test]
    fn rejection_uses_body_or_default() {
        assert_eq!(
            LoginError::rejected(Some("bad credentials\n".to_string())).to_string(),
            "bad credentials"
        );
        assert_eq!(LoginError::rejected(Some("  ".to_string())).to_string(), "login failed");
        assert_eq!(LoginError::rejected(None).to_string(), "login failed");
    }
}
