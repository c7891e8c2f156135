//! Request guard
//!
//! Resolves the request's role (the authenticated one, or the configured
//! anonymous role), checks `(role, path, method)` against the ACL and either
//! lets the request through, tagged with the matched rule's scope, or answers
//! with an [`AuthorizationError`].

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use parking_lot::RwLock;
use seal_acl::Acl;
use tracing::{debug, warn};

use crate::config::GuardConfig;
use crate::error::AuthorizationError;

/// ACL shared between request handling and rule registration
pub type SharedAcl = Arc<RwLock<Acl>>;

/// Role of an authenticated caller.
///
/// Inserted into request extensions by the authentication layer that runs
/// before [`acl_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedRole(pub String);

/// Scope of the rule that allowed the request.
///
/// Present in request extensions only when the matched rule carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleScope(pub String);

/// State for [`acl_middleware`]
#[derive(Clone)]
pub struct AclGuard {
    acl: SharedAcl,
    config: Arc<GuardConfig>,
}

impl AclGuard {
    pub fn new(acl: SharedAcl, config: GuardConfig) -> Self {
        Self {
            acl,
            config: Arc::new(config),
        }
    }

    /// Wraps an owned ACL
    pub fn from_acl(acl: Acl, config: GuardConfig) -> Self {
        Self::new(Arc::new(RwLock::new(acl)), config)
    }

    /// Shared handle, e.g. for registering rules at runtime
    pub fn acl(&self) -> &SharedAcl {
        &self.acl
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Checks a request.
    ///
    /// `role` is `None` for unauthenticated requests. On success returns the
    /// matched rule's scope, if any. A denial answers 401 when the checked role
    /// is the anonymous role and 403 otherwise.
    pub fn authorize(
        &self,
        role: Option<&str>,
        path: &str,
        method: &str,
    ) -> Result<Option<String>, AuthorizationError> {
        let role = role.unwrap_or(self.config.anonymous_role.as_str());

        let decision = {
            let acl = self.acl.read();
            let decision = acl.decide(role, path, method);
            (decision.allowed, decision.scope().map(str::to_string))
        };

        match decision {
            (true, scope) => {
                debug!(role = %role, method = %method, path = %path, scope = ?scope, "Request allowed");
                Ok(scope)
            }
            (false, _) => {
                warn!(role = %role, method = %method, path = %path, "Request denied");

                if role == self.config.anonymous_role {
                    Err(AuthorizationError::unauthenticated(path))
                } else {
                    Err(AuthorizationError::forbidden(role, method, path))
                }
            }
        }
    }
}

/// ACL middleware
///
/// Use with `axum::middleware::from_fn_with_state(guard, acl_middleware)`.
/// The path is the request URI path without its query string; the action is
/// the HTTP method.
pub async fn acl_middleware(
    State(guard): State<AclGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthorizationError> {
    let role = request
        .extensions()
        .get::<AuthenticatedRole>()
        .map(|role| role.0.clone());

    let scope = guard.authorize(
        role.as_deref(),
        request.uri().path(),
        request.method().as_str(),
    )?;

    if let Some(scope) = scope {
        request.extensions_mut().insert(RuleScope(scope));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn guard(anonymous_role: &str) -> AclGuard {
        let mut acl = Acl::new();
        acl.matching("/public").unwrap().for_actions(["GET"]).unwrap().allow(["foo", "admin"]).unwrap();
        acl.matching("/secret").unwrap().for_actions(["GET"]).unwrap().allow(["admin"]).unwrap().as_scope("SECRET_GETTER");

        AclGuard::from_acl(acl, GuardConfig::with_anonymous_role(anonymous_role))
    }

    #[test]
    fn test_anonymous_falls_back_to_configured_role() {
        let guard = guard("foo");

        assert_eq!(guard.authorize(None, "/public", "GET"), Ok(None));
    }

    #[test]
    fn test_allowed_with_scope() {
        let guard = guard("foo");

        assert_eq!(guard.authorize(Some("admin"), "/public", "GET"), Ok(None));
        assert_eq!(
            guard.authorize(Some("admin"), "/secret", "GET"),
            Ok(Some("SECRET_GETTER".to_string()))
        );
    }

    #[test]
    fn test_anonymous_denial_is_401() {
        let guard = guard("foo");

        let err = guard.authorize(None, "/secret", "GET").unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        // Explicitly carrying the anonymous role counts as anonymous too
        let err = guard.authorize(Some("foo"), "/secret", "GET").unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authenticated_denial_is_403() {
        let guard = guard("foo");

        let err = guard.authorize(Some("user"), "/secret", "GET").unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.message, r#"User "user" is not authorized to "GET" to the resource "/secret""#);
    }

    #[test]
    fn test_default_anonymous_role_is_guest() {
        let guard = AclGuard::from_acl(Acl::new(), GuardConfig::default());

        let err = guard.authorize(None, "/x", "GET").unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);

        guard.acl().write().matching("/x").unwrap().for_actions(["GET"]).unwrap().allow(["guest"]).unwrap();
        assert_eq!(guard.authorize(None, "/x", "GET"), Ok(None));
    }
}
