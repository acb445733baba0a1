//! `brewguard-auth`: role-based half of the authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows the
//! closed set of staff roles, the permission tokens, the resolved principal
//! and the immutable role → permission registry.

pub mod authorize;
pub mod permissions;
pub mod principal;
pub mod registry;
pub mod roles;

pub use authorize::{PermissionDenied, PermissionExplanation, authorize, explain_permission};
pub use permissions::Permission;
pub use principal::{Principal, Shift, TrainingLevel};
pub use registry::{RegistryError, RolePermissionMap};
pub use roles::Role;
