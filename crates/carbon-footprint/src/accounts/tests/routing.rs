use super::common::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::accounts::account_router;
use crate::accounts::service::AccountService;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn register_then_verify_round_trip() {
    let (service, _) = build_service();
    let router = account_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            json!({
                "email": "lea@example.org",
                "username": "lea",
                "password": "bas-carbone-42",
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let token = payload["token"].as_str().expect("token present").to_string();
    assert_eq!(payload["user"]["email"], "lea@example.org");

    let response = router
        .oneshot(
            Request::get("/api/verify")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["username"], "lea");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let (service, _) = build_service();
    service.register(registration()).expect("registration succeeds");
    let router = account_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/login",
            json!({ "email": "camille@example.org", "password": "guessing-game" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "auth_error");
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let (service, _) = build_service();
    service.register(registration()).expect("registration succeeds");
    let router = account_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/register",
            json!({
                "email": "camille@example.org",
                "username": "camille-2",
                "password": "another-password",
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn profile_update_requires_authentication() {
    let (service, _) = build_service();
    let router = account_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "PUT",
            "/api/user/profile",
            json!({ "username": "x", "email": "x@example.org" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn password_change_succeeds_with_token() {
    let (service, _) = build_service();
    let session = service.register(registration()).expect("registration succeeds");
    let router = account_router(Arc::new(service));

    let mut request = json_request(
        "PUT",
        "/api/user/password",
        json!({
            "currentPassword": registration().password,
            "newPassword": "fresh-password-9",
        }),
    );
    request.headers_mut().insert(
        header::AUTHORIZATION,
        session.token.parse().expect("header value"),
    );

    let response = router.oneshot(request).await.expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn store_outage_maps_to_internal_error() {
    let service = AccountService::new(
        Arc::new(UnavailableUsers),
        Arc::new(PlainHasher),
        sessions(),
    );
    let router = account_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/login",
            json!({ "email": "camille@example.org", "password": "whatever-123" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "store_error");
}

#[tokio::test]
async fn incomplete_registration_body_is_a_json_validation_error() {
    let (service, repository) = build_service();
    let router = account_router(Arc::new(service));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/register",
            json!({ "email": "lea@example.org", "username": "lea" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "validation_error");
    assert!(payload["message"]
        .as_str()
        .is_some_and(|message| message.contains("password")));
    assert!(repository.records.lock().expect("user mutex poisoned").is_empty());
}
