//! # Seal HTTP
//!
//! axum middleware that enforces a [`seal_acl::Acl`] on incoming requests.
//!
//! ## Example
//!
//! ```rust
//! use axum::{middleware, routing::get, Extension, Router};
//! use seal_acl::Acl;
//! use seal_http::{acl_middleware, AclGuard, GuardConfig, RuleScope};
//!
//! async fn secret(scope: Option<Extension<RuleScope>>) -> String {
//!     scope.map(|Extension(RuleScope(s))| s).unwrap_or_default()
//! }
//!
//! let mut acl = Acl::new();
//! acl.matching("/secret")?.for_actions(["GET"])?.allow(["admin"])?.as_scope("SECRET_GETTER");
//!
//! let guard = AclGuard::from_acl(acl, GuardConfig::default());
//! let app: Router = Router::new()
//!     .route("/secret", get(secret))
//!     .layer(middleware::from_fn_with_state(guard, acl_middleware));
//! # Ok::<(), seal_acl::AclError>(())
//! ```
//!
//! The role comes from an [`AuthenticatedRole`] request extension set by an
//! earlier authentication layer; requests without one are checked as the
//! configured anonymous role.

pub mod config;
pub mod error;
pub mod guard;

pub use config::{GuardConfig, DEFAULT_ANONYMOUS_ROLE};
pub use error::AuthorizationError;
pub use guard::{acl_middleware, AclGuard, AuthenticatedRole, RuleScope, SharedAcl};
