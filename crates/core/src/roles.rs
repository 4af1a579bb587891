//! Role labels and the capability model derived from them.
//!
//! Role labels must match the `CHECK` constraint on `role_assignments.role`
//! in `20260301000005_create_role_assignments_table.sql`.
//!
//! Capabilities are advisory for UI gating. Every mutating route still
//! re-checks them server-side through the RBAC extractors.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMINISTRATOR: &str = "administrator";
pub const ROLE_TENDER_MANAGER: &str = "tender_manager";
pub const ROLE_LEGAL_MANAGER: &str = "legal_manager";

/// All valid role labels, in display order.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMINISTRATOR, ROLE_TENDER_MANAGER, ROLE_LEGAL_MANAGER];

/// A capability label granted to an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    TenderManager,
    LegalManager,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Administrator => ROLE_ADMINISTRATOR,
            Role::TenderManager => ROLE_TENDER_MANAGER,
            Role::LegalManager => ROLE_LEGAL_MANAGER,
        }
    }

    /// Parse a stored or user-supplied role label.
    pub fn parse(label: &str) -> Result<Self, CoreError> {
        match label {
            ROLE_ADMINISTRATOR => Ok(Role::Administrator),
            ROLE_TENDER_MANAGER => Ok(Role::TenderManager),
            ROLE_LEGAL_MANAGER => Ok(Role::LegalManager),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Valid roles: {}",
                VALID_ROLES.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of roles held by one identity. Set semantics: duplicates collapse.
pub type RoleSet = BTreeSet<Role>;

/// Capability predicates computed once from a [`RoleSet`] and passed down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub is_administrator: bool,
    pub can_manage_tenders: bool,
    pub can_manage_legal_content: bool,
    /// Whether any admin console panel is visible at all.
    pub can_access_admin: bool,
}

impl Capabilities {
    pub fn from_roles(roles: &RoleSet) -> Self {
        let is_administrator = roles.contains(&Role::Administrator);
        let can_manage_tenders = is_administrator || roles.contains(&Role::TenderManager);
        let can_manage_legal_content = is_administrator || roles.contains(&Role::LegalManager);
        Self {
            is_administrator,
            can_manage_tenders,
            can_manage_legal_content,
            can_access_admin: is_administrator || can_manage_tenders || can_manage_legal_content,
        }
    }
}

/// Outcome of resolving the roles of the current identity.
///
/// Resolution never fails: an anonymous identity or a failed lookup both
/// yield the empty set. `unavailable` distinguishes the latter so callers
/// can report "access unavailable" instead of a plain denial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleResolution {
    pub roles: RoleSet,
    pub unavailable: bool,
}

impl RoleResolution {
    pub fn resolved(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
            unavailable: false,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Fail closed: the lookup errored, so no role is granted.
    pub fn unavailable() -> Self {
        Self {
            roles: RoleSet::new(),
            unavailable: true,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities::from_roles(&self.roles)
    }
}
