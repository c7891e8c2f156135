//! Middleware integration tests
//!
//! Runs requests through a Router guarded by the ACL middleware, with a
//! header-based stand-in for the authentication layer.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Extension, Router,
};
use seal_acl::{Acl, Expr};
use seal_http::{acl_middleware, AclGuard, AuthenticatedRole, GuardConfig, RuleScope};
use serde_json::Value;
use tower::ServiceExt;

const X_ROLE: &str = "x-role";

async fn role_from_header(mut request: Request<Body>, next: Next) -> Response {
    let role = request
        .headers()
        .get(X_ROLE)
        .and_then(|v| v.to_str().ok())
        .map(|s| AuthenticatedRole(s.to_string()));

    if let Some(role) = role {
        request.extensions_mut().insert(role);
    }

    next.run(request).await
}

async fn show_scope(scope: Option<Extension<RuleScope>>) -> String {
    match scope {
        Some(Extension(RuleScope(scope))) => scope,
        None => "none".to_string(),
    }
}

fn app(guard: AclGuard) -> Router {
    Router::new()
        .route("/public", get(show_scope))
        .route("/secret", get(show_scope))
        .route("/api/items", post(show_scope))
        .layer(middleware::from_fn_with_state(guard, acl_middleware))
        .layer(middleware::from_fn(role_from_header))
}

fn guard() -> AclGuard {
    let mut acl = Acl::new();
    acl.matching("/public").unwrap().for_actions(["GET"]).unwrap().allow(["foo", "admin"]).unwrap();
    acl.matching("/secret")
        .unwrap()
        .for_actions(["GET"])
        .unwrap()
        .allow(["admin"])
        .unwrap()
        .as_scope("SECRET_GETTER");
    acl.matching(Expr("^/api/"))
        .unwrap()
        .for_actions(["POST"])
        .unwrap()
        .allow(["writer"])
        .unwrap();

    AclGuard::from_acl(acl, GuardConfig::with_anonymous_role("foo"))
}

fn request(method: &str, uri: &str, role: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(role) = role {
        builder = builder.header(X_ROLE, role);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_anonymous_request_uses_configured_role() {
    let response = app(guard()).oneshot(request("GET", "/public", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "none");
}

#[tokio::test]
async fn test_authenticated_request_without_scope() {
    let response = app(guard())
        .oneshot(request("GET", "/public", Some("admin")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "none");
}

#[tokio::test]
async fn test_scope_attached_on_allow() {
    let response = app(guard())
        .oneshot(request("GET", "/secret", Some("admin")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "SECRET_GETTER");
}

#[tokio::test]
async fn test_authenticated_denial_is_forbidden() {
    let response = app(guard())
        .oneshot(request("GET", "/secret", Some("user")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], 403);
    assert_eq!(
        body["error"],
        r#"User "user" is not authorized to "GET" to the resource "/secret""#
    );
}

#[tokio::test]
async fn test_anonymous_denial_is_unauthorized() {
    let response = app(guard()).oneshot(request("GET", "/secret", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], 401);
    assert_eq!(body["error"], r#"User is not authenticated to access the resource "/secret""#);
}

#[tokio::test]
async fn test_query_string_is_not_part_of_resource() {
    let response = app(guard())
        .oneshot(request("GET", "/secret?debug=1", Some("admin")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_method_is_the_action() {
    let app = app(guard());

    let response = app
        .clone()
        .oneshot(request("POST", "/api/items", Some("writer")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(request("POST", "/api/items", Some("reader")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rules_registered_after_startup_apply() {
    let guard = guard();
    let app = app(guard.clone());

    let response = app
        .clone()
        .oneshot(request("GET", "/secret", Some("auditor")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    guard
        .acl()
        .write()
        .matching("/secret")
        .unwrap()
        .for_actions(["GET"])
        .unwrap()
        .allow(["auditor"])
        .unwrap();

    let response = app
        .oneshot(request("GET", "/secret", Some("auditor")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "none");
}
