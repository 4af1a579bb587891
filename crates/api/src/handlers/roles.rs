//! Handlers for role assignment management. Administrators only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use rada_core::error::CoreError;
use rada_core::roles::Role;
use rada_core::types::DbId;
use rada_db::models::role_assignment::{AssignRole, IdentityRoles};
use rada_db::repositories::RoleAssignmentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /admin/roles
// ---------------------------------------------------------------------------

/// List every identity holding at least one role, with its roles.
pub async fn list_roles(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let assignments = RoleAssignmentRepo::list_all(&state.pool).await?;

    let mut grouped: Vec<IdentityRoles> = Vec::new();
    for a in assignments {
        if let Some(last) = grouped
            .last_mut()
            .filter(|g| g.identity_id == a.identity_id)
        {
            last.roles.push(a.role);
            continue;
        }
        grouped.push(IdentityRoles {
            identity_id: a.identity_id,
            roles: vec![a.role],
        });
    }

    Ok(Json(DataResponse { data: grouped }))
}

// ---------------------------------------------------------------------------
// POST /admin/roles
// ---------------------------------------------------------------------------

/// Grant a role. Granting a role the identity already holds changes nothing
/// and returns 200 instead of 201.
pub async fn assign_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<AssignRole>,
) -> AppResult<impl IntoResponse> {
    let role = Role::parse(&input.role)?;

    let created = RoleAssignmentRepo::assign(&state.pool, input.identity_id, role.as_str()).await?;
    let roles = RoleAssignmentRepo::roles_for(&state.pool, input.identity_id).await?;

    tracing::info!(
        admin_id = admin.identity_id,
        identity_id = input.identity_id,
        role = %role,
        created,
        "Role assigned"
    );

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(DataResponse {
            data: IdentityRoles {
                identity_id: input.identity_id,
                roles,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// DELETE /admin/roles/{identity_id}/{role}
// ---------------------------------------------------------------------------

pub async fn revoke_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path((identity_id, role)): Path<(DbId, String)>,
) -> AppResult<StatusCode> {
    let role = Role::parse(&role)?;

    let removed = RoleAssignmentRepo::revoke(&state.pool, identity_id, role.as_str()).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "RoleAssignment",
            id: identity_id,
        }));
    }

    tracing::info!(
        admin_id = admin.identity_id,
        identity_id,
        role = %role,
        "Role revoked"
    );

    Ok(StatusCode::NO_CONTENT)
}
