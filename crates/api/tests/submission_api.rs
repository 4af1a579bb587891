//! End-to-end tests for the application form: rendering, submission rules
//! and the administrative response view.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, expect_json, get, get_auth, post_json, post_json_auth, token_for,
    token_with_role,
};
use serde_json::{json, Value};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    app: axum::Router,
    manager: String,
    tender_id: i64,
    q1: i64,
    q2: i64,
}

/// A form-enabled tender with a required short-text question and an
/// optional multi-choice question.
async fn fixture(pool: PgPool) -> Fixture {
    let manager = token_with_role(&pool, 1, "tender_manager").await;
    let app = common::build_test_app(pool);

    let tender = expect_json(
        post_json_auth(
            app.clone(),
            "/api/v1/admin/tenders",
            json!({ "title": "School catering", "content": "Details", "has_form": true }),
            &manager,
        )
        .await,
        StatusCode::CREATED,
    )
    .await;
    let tender_id = tender["data"]["id"].as_i64().unwrap();

    let questions = format!("/api/v1/admin/tenders/{tender_id}/questions");
    let q1 = expect_json(
        post_json_auth(
            app.clone(),
            &questions,
            json!({ "text": "Company name", "question_type": "short_text", "required": true }),
            &manager,
        )
        .await,
        StatusCode::CREATED,
    )
    .await["data"]["id"]
        .as_i64()
        .unwrap();
    let q2 = expect_json(
        post_json_auth(
            app.clone(),
            &questions,
            json!({ "text": "Lots", "question_type": "multi_choice", "choices": ["A", "B"] }),
            &manager,
        )
        .await,
        StatusCode::CREATED,
    )
    .await["data"]["id"]
        .as_i64()
        .unwrap();

    Fixture {
        app,
        manager,
        tender_id,
        q1,
        q2,
    }
}

fn responses_uri(tender_id: i64) -> String {
    format!("/api/v1/tenders/{tender_id}/responses")
}

fn answers(pairs: &[(i64, Value)]) -> Value {
    let map: serde_json::Map<String, Value> = pairs
        .iter()
        .map(|(id, v)| (id.to_string(), v.clone()))
        .collect();
    json!({ "answers": map })
}

// ---------------------------------------------------------------------------
// Form rendering
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn form_lists_fields_with_widgets(pool: PgPool) {
    let f = fixture(pool).await;

    let json = expect_json(
        get(f.app, &format!("/api/v1/tenders/{}/form", f.tender_id)).await,
        StatusCode::OK,
    )
    .await;

    let fields = json["data"]["fields"].as_array().unwrap();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0]["question_id"], f.q1);
    assert_eq!(fields[0]["widget"], "single_line");
    assert_eq!(fields[0]["required"], true);
    assert_eq!(fields[1]["widget"], "checkbox_group");
    assert_eq!(fields[1]["options"], json!(["A", "B"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn form_is_hidden_for_inactive_or_formless_tenders(pool: PgPool) {
    let f = fixture(pool).await;

    let formless = expect_json(
        post_json_auth(
            f.app.clone(),
            "/api/v1/admin/tenders",
            json!({ "title": "Notice", "content": "Read only" }),
            &f.manager,
        )
        .await,
        StatusCode::CREATED,
    )
    .await["data"]["id"]
        .as_i64()
        .unwrap();
    let response = get(f.app.clone(), &format!("/api/v1/tenders/{formless}/form")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let toggle = format!("/api/v1/admin/tenders/{}/toggle-active", f.tender_id);
    post_json_auth(f.app.clone(), &toggle, json!({}), &f.manager).await;
    let response = get(f.app.clone(), &format!("/api/v1/tenders/{}/form", f.tender_id)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let submit = post_json(
        f.app,
        &responses_uri(f.tender_id),
        answers(&[(f.q1, json!("ACME"))]),
    )
    .await;
    assert_eq!(submit.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn submission_and_viewer_scenario(pool: PgPool) {
    let f = fixture(pool).await;
    let applicant = token_for(50);

    // Blank required answer: nothing is stored.
    let blank = post_json_auth(
        f.app.clone(),
        &responses_uri(f.tender_id),
        answers(&[(f.q1, json!(""))]),
        &applicant,
    )
    .await;
    let json = expect_json(blank, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "MISSING_ANSWERS");
    assert_eq!(json["missing"], json!([f.q1]));

    let valid = post_json_auth(
        f.app.clone(),
        &responses_uri(f.tender_id),
        answers(&[(f.q1, json!("hello")), (f.q2, json!(["A"]))]),
        &applicant,
    )
    .await;
    let json = expect_json(valid, StatusCode::CREATED).await;
    assert_eq!(json["data"]["submitter_id"], 50);
    assert_eq!(
        json["data"]["answers"],
        answers(&[(f.q1, json!("hello")), (f.q2, json!(["A"]))])["answers"]
    );

    // The schema changes after submission.
    let uri = format!("/api/v1/admin/tenders/{}/questions/{}", f.tender_id, f.q2);
    let deleted = delete_auth(f.app.clone(), &uri, &f.manager).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let viewer = format!("/api/v1/admin/tenders/{}/responses", f.tender_id);
    let json = expect_json(get_auth(f.app, &viewer, &f.manager).await, StatusCode::OK).await;
    let records = json["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);

    let rows = records[0]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["question_text"], "Company name");
    assert_eq!(rows[0]["display"], "hello");
    assert_eq!(rows[0]["resolved"], true);
    assert_eq!(rows[1]["question_id"], f.q2);
    assert_eq!(rows[1]["question_text"], "question no longer available");
    assert_eq!(rows[1]["answer"], json!(["A"]));
    assert_eq!(rows[1]["resolved"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_submission_by_same_identity_conflicts(pool: PgPool) {
    let f = fixture(pool).await;
    let applicant = token_for(51);
    let body = answers(&[(f.q1, json!("ACME"))]);

    let first =
        post_json_auth(f.app.clone(), &responses_uri(f.tender_id), body.clone(), &applicant).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json_auth(f.app, &responses_uri(f.tender_id), body, &applicant).await;
    let json = expect_json(second, StatusCode::CONFLICT).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn anonymous_submissions_follow_config(pool: PgPool) {
    let f = fixture(pool.clone()).await;
    let body = answers(&[(f.q1, json!("ACME"))]);

    // Allowed by default, and not limited to one per tender.
    for _ in 0..2 {
        let response = post_json(f.app.clone(), &responses_uri(f.tender_id), body.clone()).await;
        let json = expect_json(response, StatusCode::CREATED).await;
        assert_eq!(json["data"]["submitter_id"], Value::Null);
    }

    let mut config = common::test_config();
    config.allow_anonymous_submissions = false;
    let closed = common::build_test_app_with(pool, config);
    let response = post_json(closed, &responses_uri(f.tender_id), body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn malformed_answers_are_rejected(pool: PgPool) {
    let f = fixture(pool).await;

    let unknown_choice = post_json(
        f.app.clone(),
        &responses_uri(f.tender_id),
        answers(&[(f.q1, json!("ACME")), (f.q2, json!(["Z"]))]),
    )
    .await;
    assert_eq!(unknown_choice.status(), StatusCode::BAD_REQUEST);

    let wrong_shape = post_json(
        f.app.clone(),
        &responses_uri(f.tender_id),
        answers(&[(f.q1, json!(["ACME"]))]),
    )
    .await;
    assert_eq!(wrong_shape.status(), StatusCode::BAD_REQUEST);

    let unknown_question = post_json(
        f.app.clone(),
        &responses_uri(f.tender_id),
        answers(&[(f.q1, json!("ACME")), (999_999, json!("x"))]),
    )
    .await;
    assert_eq!(unknown_question.status(), StatusCode::BAD_REQUEST);

    // None of the rejected attempts were stored.
    let viewer = format!("/api/v1/admin/tenders/{}/responses", f.tender_id);
    let json = body_json(get_auth(f.app, &viewer, &f.manager).await).await;
    assert_eq!(json["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_answers_are_reported_together(pool: PgPool) {
    let f = fixture(pool).await;
    let questions = format!("/api/v1/admin/tenders/{}/questions", f.tender_id);
    let q3 = expect_json(
        post_json_auth(
            f.app.clone(),
            &questions,
            json!({ "text": "Scope", "question_type": "long_text", "required": true }),
            &f.manager,
        )
        .await,
        StatusCode::CREATED,
    )
    .await["data"]["id"]
        .as_i64()
        .unwrap();

    let response = post_json(f.app, &responses_uri(f.tender_id), json!({})).await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["missing"], json!([f.q1, q3]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn response_viewer_requires_tender_management(pool: PgPool) {
    let f = fixture(pool).await;
    let viewer = format!("/api/v1/admin/tenders/{}/responses", f.tender_id);

    let response = get_auth(f.app, &viewer, &token_for(77)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn responses_remain_viewable_after_tender_deletion(pool: PgPool) {
    let f = fixture(pool).await;

    let submitted = post_json(
        f.app.clone(),
        &responses_uri(f.tender_id),
        answers(&[(f.q1, json!("hello")), (f.q2, json!(["B"]))]),
    )
    .await;
    assert_eq!(submitted.status(), StatusCode::CREATED);

    let tender = format!("/api/v1/admin/tenders/{}", f.tender_id);
    let deleted = delete_auth(f.app.clone(), &tender, &f.manager).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let viewer = format!("/api/v1/admin/tenders/{}/responses", f.tender_id);
    let json = expect_json(get_auth(f.app, &viewer, &f.manager).await, StatusCode::OK).await;
    let records = json["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["tender_id"], f.tender_id);

    let rows = records[0]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["resolved"] == false));
    assert!(rows
        .iter()
        .all(|r| r["question_text"] == "question no longer available"));
    assert_eq!(rows[0]["answer"], "hello");
    assert_eq!(rows[1]["answer"], json!(["B"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn repeated_multi_choice_selection_is_rejected(pool: PgPool) {
    let f = fixture(pool).await;

    let response = post_json(
        f.app.clone(),
        &responses_uri(f.tender_id),
        answers(&[(f.q1, json!("ACME")), (f.q2, json!(["A", "A"]))]),
    )
    .await;
    let json = expect_json(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let viewer = format!("/api/v1/admin/tenders/{}/responses", f.tender_id);
    let json = body_json(get_auth(f.app, &viewer, &f.manager).await).await;
    assert_eq!(json["data"], json!([]));
}
