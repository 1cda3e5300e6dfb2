use serde::Serialize;
use thiserror::Error;

use crate::{Role, RoleSet, Session};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("unauthenticated")]
    Unauthenticated,

    #[error("forbidden: role '{0}' is not permitted")]
    Forbidden(Role),
}

/// Authorize a session against the roles a resource admits.
///
/// - No IO
/// - No panics
/// - Public resources (empty role set) admit everyone
pub fn authorize(session: &Session, allowed: &RoleSet) -> Result<(), AuthzError> {
    if allowed.is_public() {
        return Ok(());
    }
    if !session.is_authenticated() {
        return Err(AuthzError::Unauthenticated);
    }
    if allowed.contains(session.role) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(session.role))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed explanation of an authorization decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorizationExplanation {
    /// Whether the authorization was granted.
    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// Role of the session that was checked.
    pub role: Role,

    /// Roles the resource admits (empty when public).
    pub allowed_roles: Vec<Role>,

    /// If denied, this explains what was missing.
    pub denial_reason: Option<DenialReason>,
}

/// Detailed reason why authorization was denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenialReason {
    pub kind: DenialKind,
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    Unauthenticated,
    RoleNotPermitted,
}

/// Explain why an authorization decision was made (or would be made).
///
/// Always agrees with [`authorize`]; it only adds the audit detail.
pub fn explain_authorization(session: &Session, allowed: &RoleSet) -> AuthorizationExplanation {
    let allowed_roles: Vec<Role> = allowed.iter().collect();

    match authorize(session, allowed) {
        Ok(()) => {
            let reason = if allowed.is_public() {
                "Resource is public".to_string()
            } else {
                format!("Role '{}' is permitted ({allowed})", session.role)
            };
            AuthorizationExplanation {
                granted: true,
                reason,
                role: session.role,
                allowed_roles,
                denial_reason: None,
            }
        }
        Err(AuthzError::Unauthenticated) => AuthorizationExplanation {
            granted: false,
            reason: format!("No session; resource requires one of: {allowed}"),
            role: session.role,
            allowed_roles,
            denial_reason: Some(DenialReason {
                kind: DenialKind::Unauthenticated,
                message: "No persisted session was found".to_string(),
                suggestions: vec!["Sign in through the login page".to_string()],
            }),
        },
        Err(AuthzError::Forbidden(role)) => AuthorizationExplanation {
            granted: false,
            reason: format!("Role '{role}' is not among: {allowed}"),
            role,
            allowed_roles: allowed_roles.clone(),
            denial_reason: Some(DenialReason {
                kind: DenialKind::RoleNotPermitted,
                message: format!("Role '{role}' cannot open this resource"),
                suggestions: allowed_roles
                    .iter()
                    .map(|r| format!("Sign in as {r}"))
                    .collect(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: Role) -> Session {
        Session { role, store_id: None }
    }

    #[test]
    fn public_resources_admit_anonymous() {
        assert_eq!(authorize(&Session::anonymous(), &RoleSet::PUBLIC), Ok(()));
    }

    #[test]
    fn anonymous_is_unauthenticated_for_protected_resources() {
        assert_eq!(
            authorize(&Session::anonymous(), &RoleSet::STAFF),
            Err(AuthzError::Unauthenticated)
        );
    }

    #[test]
    fn wrong_role_is_forbidden() {
        assert_eq!(
            authorize(&session(Role::Employee), &RoleSet::MANAGER),
            Err(AuthzError::Forbidden(Role::Employee))
        );
        assert_eq!(authorize(&session(Role::Manager), &RoleSet::MANAGER), Ok(()));
    }

    #[test]
    fn explanation_matches_decision() {
        let explanation = explain_authorization(&session(Role::Employee), &RoleSet::MANAGER);
        assert!(!explanation.granted);
        assert_eq!(explanation.allowed_roles, vec![Role::Manager]);
        let denial = explanation.denial_reason.unwrap();
        assert_eq!(denial.kind, DenialKind::RoleNotPermitted);
        assert_eq!(denial.suggestions, vec!["Sign in as manager".to_string()]);

        let explanation = explain_authorization(&Session::anonymous(), &RoleSet::EMPLOYEE);
        assert_eq!(
            explanation.denial_reason.map(|d| d.kind),
            Some(DenialKind::Unauthenticated)
        );

        let explanation = explain_authorization(&session(Role::Manager), &RoleSet::STAFF);
        assert!(explanation.granted);
        assert!(explanation.denial_reason.is_none());
    }

    #[test]
    fn explanation_serializes_snake_case_kind() {
        let explanation = explain_authorization(&Session::anonymous(), &RoleSet::MANAGER);
        let json = serde_json::to_value(&explanation).unwrap();
        assert_eq!(json["denial_reason"]["kind"], "unauthenticated");
        assert_eq!(json["role"], "anonymous");
    }
}
