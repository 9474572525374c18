//! Router-level tests
//!
//! Drive the full router through `tower::ServiceExt::oneshot` with the
//! in-memory user store and the fake provider.

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{
        Request, StatusCode,
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
    response::Response,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use crate::domain::provider::ProviderError;
use crate::presentation::router::router_with_context;
use crate::test_support::{FakeProvider, test_context};

fn app() -> (Router, Arc<FakeProvider>) {
    let (ctx, provider) = test_context();
    (router_with_context(ctx), provider)
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn set_cookie(response: &Response) -> String {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// `name=value` pair from a Set-Cookie header, ready for a Cookie header
fn cookie_pair(response: &Response) -> String {
    set_cookie(response)
        .split(';')
        .next()
        .unwrap_or_default()
        .to_string()
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

// ============================================================================
// Sign In
// ============================================================================

#[tokio::test]
async fn test_sign_in_with_valid_credentials_redirects_to_dashboard() {
    let (app, provider) = app();
    provider.seed_account("Alice", "a@b.co", "password123").await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/signin",
            json!({ "email": "a@b.co", "password": "password123" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response);
    assert!(cookie.starts_with("portal_session=tok-"));
    assert!(cookie.contains("HttpOnly"));
    assert!(!cookie.contains("Max-Age"));
    assert_eq!(body_json(response).await, json!({ "redirectTo": "/dashboard" }));
}

#[tokio::test]
async fn test_remember_me_sets_persistent_cookie() {
    let (app, provider) = app();
    provider.seed_account("Alice", "a@b.co", "password123").await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/signin",
            json!({ "email": "a@b.co", "password": "password123", "rememberMe": true }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).contains("Max-Age=2592000"));
}

#[tokio::test]
async fn test_sign_in_with_wrong_password_shows_credentials_message() {
    let (app, provider) = app();
    provider.seed_account("Alice", "a@b.co", "password123").await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/signin",
            json!({ "email": "a@b.co", "password": "password999" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Incorrect email or password. Please try again.");
}

#[tokio::test]
async fn test_sign_in_with_unknown_account() {
    let (app, _provider) = app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/signin",
            json!({ "email": "ghost@b.co", "password": "password123" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["detail"],
        "No account found with this email."
    );
}

#[tokio::test]
async fn test_invalid_sign_in_is_blocked_before_provider() {
    let (app, provider) = app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/signin",
            json!({ "email": "not-an-email", "password": "short" }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.headers().get(CONTENT_TYPE).unwrap(),
        "application/problem+json"
    );
    let body = body_json(response).await;
    assert_eq!(body["errors"]["email"], json!(["Invalid email address"]));
    assert_eq!(
        body["errors"]["password"],
        json!(["Password must be at least 8 characters"])
    );
    assert_eq!(provider.calls(), 0);
}

// ============================================================================
// Sign Up
// ============================================================================

#[tokio::test]
async fn test_sign_up_creates_account_and_signs_in() {
    let (app, provider) = app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/signup",
            json!({
                "name": "Alice",
                "email": "alice@x.io",
                "password": "password123",
                "confirmPassword": "password123",
                "terms": true
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = cookie_pair(&response);
    assert_eq!(body_json(response).await["redirectTo"], "/dashboard");
    assert!(provider.has_account("alice@x.io").await);

    let me = send(&app, get("/api/users/me", Some(&cookie))).await;
    let me = body_json(me).await;
    assert_eq!(me["name"], "Alice");
    assert_eq!(me["email"], "alice@x.io");
}

#[tokio::test]
async fn test_sign_up_with_registered_email_skips_provider() {
    let (app, provider) = app();
    provider.seed_account("Old", "taken@x.io", "password123").await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/signup",
            json!({
                "name": "Alice",
                "email": "taken@x.io",
                "password": "password123",
                "confirmPassword": "password123",
                "terms": true
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["detail"],
        "This email is already in use. Please sign in instead."
    );
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_sign_up_mismatch_and_terms_reported_per_field() {
    let (app, provider) = app();

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/signup",
            json!({
                "name": "Alice",
                "email": "alice@x.io",
                "password": "password123",
                "confirmPassword": "password124",
                "terms": false
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["errors"]["confirmPassword"], json!(["Passwords don't match"]));
    assert_eq!(
        body["errors"]["terms"],
        json!(["You must accept the terms and conditions"])
    );
    assert!(body["errors"].get("password").is_none());
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_sign_up_provider_failure_is_generic() {
    let (app, provider) = app();
    provider.fail_next(ProviderError::rejected(500, None, "database offline"));

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/signup",
            json!({
                "name": "Alice",
                "email": "alice@x.io",
                "password": "password123",
                "confirmPassword": "password123",
                "terms": true
            }),
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        body_json(response).await["detail"],
        "Failed to create account. Please try again."
    );
}

// ============================================================================
// Account lookups
// ============================================================================

#[tokio::test]
async fn test_email_exists_endpoint() {
    let (app, provider) = app();
    provider.seed_account("Old", "taken@x.io", "password123").await;

    let cases = [
        ("/api/users/email-exists", Value::Null),
        ("/api/users/email-exists?email=", Value::Null),
        ("/api/users/email-exists?email=taken%40x.io", json!(true)),
        ("/api/users/email-exists?email=free%40x.io", json!(false)),
    ];

    for (uri, expected) in cases {
        let response = send(&app, get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(body_json(response).await, json!({ "exists": expected }), "{uri}");
    }
}

#[tokio::test]
async fn test_current_user_is_null_without_session() {
    let (app, _provider) = app();

    let response = send(&app, get("/api/users/me", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, Value::Null);

    let response = send(&app, get("/api/users/me", Some("portal_session=bogus"))).await;
    assert_eq!(body_json(response).await, Value::Null);
}

// ============================================================================
// Sign Out
// ============================================================================

#[tokio::test]
async fn test_sign_out_clears_cookie_and_redirects_home() {
    let (app, provider) = app();
    let (_, token) = provider.seed_session("a@b.co").await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/signout")
        .header(COOKIE, format!("portal_session={token}"))
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).contains("Max-Age=0"));
    assert_eq!(body_json(response).await, json!({ "redirectTo": "/" }));
    assert!(!provider.has_session(&token));
}

#[tokio::test]
async fn test_sign_out_redirects_even_when_provider_fails() {
    let (app, provider) = app();
    let (_, token) = provider.seed_session("a@b.co").await;
    provider.fail_next(ProviderError::Unavailable("connection refused".into()));

    let request = Request::builder()
        .method("POST")
        .uri("/signOut")
        .header(COOKIE, format!("portal_session={token}"))
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(set_cookie(&response).contains("Max-Age=0"));
}

// ============================================================================
// Pages
// ============================================================================

#[tokio::test]
async fn test_dashboard_requires_session() {
    let (app, _provider) = app();

    let response = send(&app, get("/dashboard", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/signIn");
}

#[tokio::test]
async fn test_sign_up_form_flow_reaches_dashboard() {
    let (app, _provider) = app();

    let response = send(
        &app,
        form_request(
            "/signUp",
            "name=Alice&email=alice%40x.io&password=password123&confirmPassword=password123&terms=on",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    let cookie = cookie_pair(&response);

    let dashboard = send(&app, get("/dashboard", Some(&cookie))).await;
    assert_eq!(dashboard.status(), StatusCode::OK);
    assert!(body_text(dashboard).await.contains("Welcome, Alice"));

    let landing = send(&app, get("/", Some(&cookie))).await;
    assert!(body_text(landing).await.contains("href=\"/dashboard\""));
}

#[tokio::test]
async fn test_sign_in_form_rerenders_with_inline_errors() {
    let (app, provider) = app();

    let response = send(
        &app,
        form_request("/signIn", "email=bad&password=short&rememberMe=on"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let html = body_text(response).await;
    assert!(html.contains("Invalid email address"));
    assert!(html.contains("Password must be at least 8 characters"));
    assert!(html.contains("value=\"bad\""));
    assert!(html.contains("checked"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_sign_up_form_with_taken_email_offers_sign_in() {
    let (app, provider) = app();
    provider.seed_account("Old", "taken@x.io", "password123").await;

    let response = send(
        &app,
        form_request(
            "/signUp",
            "name=Alice&email=taken%40x.io&password=password123&confirmPassword=password123&terms=on",
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let html = body_text(response).await;
    assert!(html.contains("This email is already in use. Please sign in instead."));
    assert!(html.contains("Sign in instead"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_sign_in_form_failure_shows_banner() {
    let (app, provider) = app();
    provider.seed_account("Alice", "a@b.co", "password123").await;

    let response = send(
        &app,
        form_request("/signIn", "email=a%40b.co&password=password999"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let html = body_text(response).await;
    assert!(html.contains("role=\"alert\""));
    assert!(html.contains("Incorrect email or password. Please try again."));
}

#[tokio::test]
async fn test_sign_up_page_checks_email_live() {
    let (app, provider) = app();
    provider.seed_account("Old", "taken@x.io", "password123").await;

    let response = send(&app, get("/signUp", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("data-check=\"/api/users/email-exists\""));
    assert!(html.contains("This email is already in use. Try another or sign in."));

    // The endpoint the page script calls
    let response = send(&app, get("/api/users/email-exists?email=taken%40x.io", None)).await;
    assert_eq!(body_json(response).await, json!({ "exists": true }));
}
