//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Requires a valid JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- Accepts anonymous callers.
//! - [`rbac::RequireAdmin`] -- Requires the `administrator` role.
//! - [`rbac::RequireTenderManager`] -- Requires tender management capability.
//! - [`rbac::RequireConsoleAccess`] -- Requires any admin console capability.

pub mod auth;
pub mod rbac;
