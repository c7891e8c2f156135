//! Authorization failure response

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Denied request, carrying the HTTP status to answer with
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AuthorizationError {
    pub status: StatusCode,
    pub message: String,
}

impl AuthorizationError {
    /// 401 for a request made with the anonymous role
    pub fn unauthenticated(path: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: format!("User is not authenticated to access the resource \"{path}\""),
        }
    }

    /// 403 for an authenticated role lacking access
    pub fn forbidden(role: &str, method: &str, path: &str) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: format!(
                "User \"{role}\" is not authorized to \"{method}\" to the resource \"{path}\""
            ),
        }
    }
}

impl IntoResponse for AuthorizationError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message,
            "status": self.status.as_u16(),
        }));

        (self.status, body).into_response()
    }
}
