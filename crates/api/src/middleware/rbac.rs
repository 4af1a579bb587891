//! Role-based access control (RBAC) extractors.
//!
//! Roles are looked up in `role_assignments` on every guarded request and
//! turned into [`Capabilities`] once. Each extractor wraps [`AuthUser`] and
//! rejects requests whose capabilities do not cover the route.
//!
//! A failed lookup grants nothing and is reported as "Access unavailable"
//! rather than a plain denial.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use rada_core::error::CoreError;
use rada_core::roles::{Capabilities, Role, RoleResolution};
use rada_core::types::DbId;
use rada_db::repositories::RoleAssignmentRepo;
use rada_db::DbPool;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Resolve the roles of `identity`. Never fails.
///
/// - `None` (anonymous) resolves to the empty set.
/// - A lookup error resolves to the empty set flagged `unavailable`.
pub async fn resolve_roles(pool: &DbPool, identity: Option<DbId>) -> RoleResolution {
    let Some(identity_id) = identity else {
        return RoleResolution::anonymous();
    };

    match RoleAssignmentRepo::roles_for(pool, identity_id).await {
        Ok(labels) => RoleResolution::resolved(labels.iter().filter_map(|label| {
            Role::parse(label)
                .inspect_err(|_| {
                    tracing::warn!(identity_id, role = %label, "Ignoring unknown role label");
                })
                .ok()
        })),
        Err(e) => {
            tracing::error!(identity_id, error = %e, "Role lookup failed");
            RoleResolution::unavailable()
        }
    }
}

/// Authenticate, resolve roles and check `allowed` against the capabilities.
async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    allowed: fn(&Capabilities) -> bool,
    denial: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    let resolution = resolve_roles(&state.pool, Some(user.identity_id)).await;
    if resolution.unavailable {
        return Err(AppError::Core(CoreError::Forbidden(
            "Access unavailable".into(),
        )));
    }
    let capabilities = resolution.capabilities();
    if !allowed(&capabilities) {
        tracing::debug!(identity_id = user.identity_id, "Access denied");
        return Err(AppError::Core(CoreError::Forbidden(denial.into())));
    }
    Ok(user)
}

/// Requires the `administrator` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authorize(
            parts,
            state,
            |caps| caps.is_administrator,
            "Access denied: administrator role required",
        )
        .await?;
        Ok(RequireAdmin(user))
    }
}

/// Requires `tender_manager` or `administrator`. Rejects with 403 Forbidden otherwise.
pub struct RequireTenderManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireTenderManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authorize(
            parts,
            state,
            |caps| caps.can_manage_tenders,
            "Access denied: tender management role required",
        )
        .await?;
        Ok(RequireTenderManager(user))
    }
}

/// Requires any capability that opens the admin console. Rejects with 403 Forbidden otherwise.
pub struct RequireConsoleAccess(pub AuthUser);

impl FromRequestParts<AppState> for RequireConsoleAccess {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = authorize(
            parts,
            state,
            |caps| caps.can_access_admin,
            "Access denied: admin console role required",
        )
        .await?;
        Ok(RequireConsoleAccess(user))
    }
}
