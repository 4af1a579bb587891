//! Role assignment model and DTOs.

use rada_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `role_assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleAssignment {
    pub id: DbId,
    pub identity_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
}

/// DTO for granting a role.
#[derive(Debug, Deserialize)]
pub struct AssignRole {
    pub identity_id: DbId,
    pub role: String,
}

/// All roles held by one identity, as returned by the admin listing.
#[derive(Debug, Clone, Serialize)]
pub struct IdentityRoles {
    pub identity_id: DbId,
    pub roles: Vec<String>,
}
