//! Repository for the `role_assignments` table.

use rada_core::types::DbId;
use sqlx::PgPool;

use crate::models::role_assignment::RoleAssignment;

/// Column list for `role_assignments` queries.
const COLUMNS: &str = "id, identity_id, role, created_at";

/// Provides lookup and grant/revoke for role assignments.
pub struct RoleAssignmentRepo;

impl RoleAssignmentRepo {
    /// Role labels held by one identity, alphabetically.
    pub async fn roles_for(pool: &PgPool, identity_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT role FROM role_assignments WHERE identity_id = $1 ORDER BY role ASC",
        )
        .bind(identity_id)
        .fetch_all(pool)
        .await
    }

    /// Every assignment, grouped by identity.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<RoleAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM role_assignments ORDER BY identity_id ASC, role ASC"
        );
        sqlx::query_as::<_, RoleAssignment>(&query)
            .fetch_all(pool)
            .await
    }

    /// Grant a role. Returns `false` if the identity already held it.
    pub async fn assign(pool: &PgPool, identity_id: DbId, role: &str) -> Result<bool, sqlx::Error> {
        let inserted: Option<DbId> = sqlx::query_scalar(
            "INSERT INTO role_assignments (identity_id, role) VALUES ($1, $2) \
             ON CONFLICT ON CONSTRAINT uq_role_assignments_identity_role DO NOTHING \
             RETURNING id",
        )
        .bind(identity_id)
        .bind(role)
        .fetch_optional(pool)
        .await?;
        Ok(inserted.is_some())
    }

    /// Revoke a role. Returns `true` if an assignment was removed.
    pub async fn revoke(pool: &PgPool, identity_id: DbId, role: &str) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM role_assignments WHERE identity_id = $1 AND role = $2")
                .bind(identity_id)
                .bind(role)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
