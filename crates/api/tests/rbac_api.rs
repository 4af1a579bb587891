//! HTTP-level tests for identity extraction, capability gating and role
//! assignment management.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, expect_json, get, get_auth, post_json_auth, token_for,
    token_with_role,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Capabilities
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_caller_has_no_capabilities(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = expect_json(get(app, "/api/v1/me/capabilities").await, StatusCode::OK).await;

    assert_eq!(json["data"]["identity_id"], serde_json::Value::Null);
    assert_eq!(json["data"]["roles"], json!([]));
    assert_eq!(json["data"]["capabilities"]["can_manage_tenders"], false);
    assert_eq!(json["data"]["capabilities"]["can_access_admin"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tender_manager_capabilities(pool: PgPool) {
    let token = token_with_role(&pool, 11, "tender_manager").await;
    let app = common::build_test_app(pool);

    let json = expect_json(
        get_auth(app, "/api/v1/me/capabilities", &token).await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(json["data"]["identity_id"], 11);
    assert_eq!(json["data"]["roles"], json!(["tender_manager"]));
    let caps = &json["data"]["capabilities"];
    assert_eq!(caps["is_administrator"], false);
    assert_eq!(caps["can_manage_tenders"], true);
    assert_eq!(caps["can_manage_legal_content"], false);
    assert_eq!(caps["can_access_admin"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_token_is_rejected_even_on_open_routes(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/me/capabilities", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Gating
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_routes_require_a_token(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/admin/tenders").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn identity_without_roles_is_denied(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/tenders", &token_for(5)).await;
    let json = expect_json(response, StatusCode::FORBIDDEN).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn legal_manager_cannot_manage_tenders_but_can_triage_feedback(pool: PgPool) {
    let token = token_with_role(&pool, 6, "legal_manager").await;
    let app = common::build_test_app(pool);

    let tenders = get_auth(app.clone(), "/api/v1/admin/tenders", &token).await;
    assert_eq!(tenders.status(), StatusCode::FORBIDDEN);

    let feedback = get_auth(app, "/api/v1/admin/feedback", &token).await;
    assert_eq!(feedback.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn administrator_implies_tender_management(pool: PgPool) {
    let token = token_with_role(&pool, 1, "administrator").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/v1/admin/tenders", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn failed_role_lookup_reports_access_unavailable(pool: PgPool) {
    let token = token_for(1);
    sqlx::query("DROP TABLE role_assignments")
        .execute(&pool)
        .await
        .unwrap();
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/v1/admin/tenders", &token).await;
    let json = expect_json(response, StatusCode::FORBIDDEN).await;
    assert_eq!(json["error"], "Access unavailable");

    let caps = expect_json(
        get_auth(app, "/api/v1/me/capabilities", &token).await,
        StatusCode::OK,
    )
    .await;
    assert_eq!(caps["data"]["unavailable"], true);
    assert_eq!(caps["data"]["capabilities"]["can_access_admin"], false);
}

// ---------------------------------------------------------------------------
// Role assignment management
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn assign_list_and_revoke_roles(pool: PgPool) {
    let admin = token_with_role(&pool, 1, "administrator").await;
    let app = common::build_test_app(pool);

    let body = json!({ "identity_id": 20, "role": "tender_manager" });
    let created = post_json_auth(app.clone(), "/api/v1/admin/roles", body.clone(), &admin).await;
    assert_eq!(created.status(), StatusCode::CREATED);

    // Second grant of the same role is a no-op.
    let again = post_json_auth(app.clone(), "/api/v1/admin/roles", body, &admin).await;
    let json = expect_json(again, StatusCode::OK).await;
    assert_eq!(json["data"]["roles"], json!(["tender_manager"]));

    let listed = body_json(get_auth(app.clone(), "/api/v1/admin/roles", &admin).await).await;
    let identities: Vec<i64> = listed["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["identity_id"].as_i64().unwrap())
        .collect();
    assert_eq!(identities, vec![1, 20]);

    let revoked = delete_auth(app.clone(), "/api/v1/admin/roles/20/tender_manager", &admin).await;
    assert_eq!(revoked.status(), StatusCode::NO_CONTENT);

    let missing = delete_auth(app, "/api/v1/admin/roles/20/tender_manager", &admin).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_role_label_is_rejected(pool: PgPool) {
    let admin = token_with_role(&pool, 1, "administrator").await;
    let app = common::build_test_app(pool);

    let body = json!({ "identity_id": 20, "role": "license_manager" });
    let response = post_json_auth(app, "/api/v1/admin/roles", body, &admin).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn tender_manager_cannot_assign_roles(pool: PgPool) {
    let token = token_with_role(&pool, 2, "tender_manager").await;
    let app = common::build_test_app(pool);

    let body = json!({ "identity_id": 2, "role": "administrator" });
    let response = post_json_auth(app, "/api/v1/admin/roles", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
