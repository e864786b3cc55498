//! HTTP tests for admin role management.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{TestApp, ADMIN_TOKEN, USER_TOKEN};
use quillhouse::domain::account::Profile;
use quillhouse::domain::foundation::UserId;
use quillhouse::ports::ProfileRepository;

async fn add_writer(app: &TestApp, id: &str) {
    app.profiles
        .add(Profile::new(UserId::new(id).unwrap(), Some("Writer".to_string())))
        .await;
}

async fn is_admin(app: &TestApp, id: &str) -> bool {
    app.profiles
        .is_admin(&UserId::new(id).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn check_reports_role_of_caller() {
    let app = TestApp::spawn().await;

    let admin = app.get("/api/admin/check", Some(ADMIN_TOKEN)).await;
    assert_eq!(admin.status, StatusCode::OK);
    assert_eq!(admin.json(), json!({"isAdmin": true}));

    let user = app.get("/api/admin/check", Some(USER_TOKEN)).await;
    assert_eq!(user.status, StatusCode::OK);
    assert_eq!(user.json(), json!({"isAdmin": false}));
}

#[tokio::test]
async fn check_requires_a_session() {
    let app = TestApp::spawn().await;

    let anonymous = app.get("/api/admin/check", None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let bad_token = app.get("/api/admin/check", Some("forged")).await;
    assert_eq!(bad_token.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn grant_is_admin_only() {
    let app = TestApp::spawn().await;
    add_writer(&app, "writer-7").await;

    let response = app
        .post_json("/api/admin/grant", json!({"userId": "writer-7"}), Some(USER_TOKEN))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert!(!is_admin(&app, "writer-7").await);
}

#[tokio::test]
async fn grant_promotes_existing_profile() {
    let app = TestApp::spawn().await;
    add_writer(&app, "writer-7").await;

    let response = app
        .post_json("/api/admin/grant", json!({"userId": "writer-7"}), Some(ADMIN_TOKEN))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"userId": "writer-7", "isAdmin": true}));
    assert!(is_admin(&app, "writer-7").await);

    let again = app
        .post_json("/api/admin/grant", json!({"userId": "writer-7"}), Some(ADMIN_TOKEN))
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn grant_unknown_profile_is_not_found() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/admin/grant", json!({"userId": "ghost"}), Some(ADMIN_TOKEN))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn grant_blank_user_id_is_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/admin/grant", json!({"userId": "  "}), Some(ADMIN_TOKEN))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn revoke_demotes_other_admin() {
    let app = TestApp::spawn().await;
    app.profiles.add_admin("admin-2").await;

    let response = app
        .post_json("/api/admin/revoke", json!({"userId": "admin-2"}), Some(ADMIN_TOKEN))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["isAdmin"], false);
    assert!(!is_admin(&app, "admin-2").await);
}

#[tokio::test]
async fn revoke_self_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/admin/revoke", json!({"userId": "admin-1"}), Some(ADMIN_TOKEN))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(is_admin(&app, "admin-1").await);
}

#[tokio::test]
async fn revoke_non_admin_conflicts() {
    let app = TestApp::spawn().await;
    add_writer(&app, "writer-7").await;

    let response = app
        .post_json("/api/admin/revoke", json!({"userId": "writer-7"}), Some(ADMIN_TOKEN))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}
