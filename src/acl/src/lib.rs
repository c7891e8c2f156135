//! # Seal ACL
//!
//! In-process access-control rule engine. Rules pair a resource pattern with
//! a set of actions and the roles allowed to perform them; a lookup for a
//! (role, resource, action) triple scans the rules from newest to oldest and
//! the first match grants access. No match means deny.
//!
//! ## Features
//!
//! - **Fluent registration**: `matching → for_actions → allow → as_scope`
//! - **Last match wins**: later, narrower rules override earlier, broader ones
//! - **Literal or expression resources**: exact paths or regular expressions
//! - **Wildcards**: `*` as lookup action matches any action set, `*` in a
//!   rule's roles matches any role
//! - **Scopes**: optional labels surfaced on allowed lookups
//! - **JSON round-trip** of the whole rule set
//!
//! ## Example
//!
//! ```rust
//! use seal_acl::{Acl, Expr, ANY};
//!
//! let mut acl = Acl::new();
//! acl.matching("/foo/bar?")?.for_actions(["GET"])?.allow(["user"])?.as_scope("READ_FOO");
//! acl.matching(Expr("^/admin"))?.for_actions(["GET", "POST"])?.allow(["admin"])?;
//!
//! assert!(acl.is_allowed("user", "/foo/bar?", "GET"));
//! assert!(acl.is_allowed("admin", "/admin/users", ANY));
//! assert!(!acl.is_allowed("user", "/admin/users", "GET"));
//!
//! let json = acl.to_json()?;
//! let mut restored = Acl::new();
//! restored.from_json(&json)?;
//! assert!(restored.is_allowed("user", "/foo/bar?", "GET"));
//! # Ok::<(), seal_acl::AclError>(())
//! ```

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod registry;
pub mod rule;
pub mod serializer;

// Re-export commonly used types
pub use builder::{Allowed, ForActions, Matched};
pub use config::{AclConfig, DuplicatePolicy};
pub use engine::{Acl, Decision};
pub use error::{AclError, Result};
pub use pattern::{Expr, IntoPattern, Pattern};
pub use registry::RuleRegistry;
pub use rule::{Rule, RuleKey, ANY};
pub use serializer::RuleRecord;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
