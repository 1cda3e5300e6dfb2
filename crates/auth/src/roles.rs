use serde::{Deserialize, Serialize};

/// Capability level of the current session.
///
/// `Anonymous` is the absence of a persisted session; it is never written to
/// the durable store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Anonymous,
    Employee,
    Manager,
}

impl Role {
    /// Every role, in privilege order.
    pub const ALL: [Role; 3] = [Role::Anonymous, Role::Employee, Role::Manager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Anonymous => "anonymous",
            Role::Employee => "employee",
            Role::Manager => "manager",
        }
    }

    /// Parse the persisted `userStatus` value.
    ///
    /// Only the two authenticated roles have a stored form; anything else
    /// (including the literal `"anonymous"`) yields `None`.
    pub fn from_status(status: &str) -> Option<Role> {
        match status {
            "employee" => Some(Role::Employee),
            "manager" => Some(Role::Manager),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Role::Anonymous)
    }

    fn bit(&self) -> u8 {
        match self {
            Role::Anonymous => 0,
            Role::Employee => 0b01,
            Role::Manager => 0b10,
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of roles permitted to view a route.
///
/// The empty set means the route is public. Only authenticated roles can be
/// members: inserting `Anonymous` is a no-op, so an anonymous session is never
/// "in" a non-public set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Role>", into = "Vec<Role>")]
pub struct RoleSet(u8);

impl RoleSet {
    pub const PUBLIC: RoleSet = RoleSet(0);
    pub const EMPLOYEE: RoleSet = RoleSet(0b01);
    pub const MANAGER: RoleSet = RoleSet(0b10);
    pub const STAFF: RoleSet = RoleSet(0b11);

    pub fn of(roles: &[Role]) -> Self {
        roles.iter().fold(Self::PUBLIC, |set, role| set.with(*role))
    }

    pub fn with(self, role: Role) -> Self {
        Self(self.0 | role.bit())
    }

    pub fn contains(&self, role: Role) -> bool {
        role.is_authenticated() && self.0 & role.bit() != 0
    }

    pub fn is_public(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|role| self.contains(*role))
    }
}

impl From<Vec<Role>> for RoleSet {
    fn from(value: Vec<Role>) -> Self {
        Self::of(&value)
    }
}

impl From<RoleSet> for Vec<Role> {
    fn from(value: RoleSet) -> Self {
        value.iter().collect()
    }
}

impl core::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.is_public() {
            return f.write_str("public");
        }
        let names: Vec<&str> = self.iter().map(|r| r.as_str()).collect();
        f.write_str(&names.join("|"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parsing_only_knows_authenticated_roles() {
        assert_eq!(Role::from_status("employee"), Some(Role::Employee));
        assert_eq!(Role::from_status("manager"), Some(Role::Manager));
        assert_eq!(Role::from_status("anonymous"), None);
        assert_eq!(Role::from_status("admin"), None);
        assert_eq!(Role::from_status("Manager"), None);
    }

    #[test]
    fn anonymous_is_never_a_member() {
        let set = RoleSet::of(&[Role::Anonymous]);
        assert!(set.is_public());
        assert!(!RoleSet::STAFF.contains(Role::Anonymous));
    }

    #[test]
    fn role_set_membership() {
        assert!(RoleSet::EMPLOYEE.contains(Role::Employee));
        assert!(!RoleSet::EMPLOYEE.contains(Role::Manager));
        assert_eq!(RoleSet::of(&[Role::Manager, Role::Employee]), RoleSet::STAFF);
        assert_eq!(RoleSet::STAFF.to_string(), "employee|manager");
        assert_eq!(RoleSet::PUBLIC.to_string(), "public");
    }

    #[test]
    fn role_set_serializes_as_list() {
        let json = serde_json::to_string(&RoleSet::STAFF).unwrap();
        assert_eq!(json, r#"["employee","manager"]"#);
        let back: RoleSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RoleSet::STAFF);
    }
}
