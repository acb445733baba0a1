//! `brewguard-policy`: attribute-based half of the authorization boundary.
//!
//! Flow for one request:
//!
//! 1. [`AttributeExtractor`] snapshots the four attribute bundles (staff,
//!    resource, action, environment). This is the only step that touches
//!    storage.
//! 2. [`evaluate`] applies a [`Policy`] to the snapshot and returns a
//!    [`Decision`] with a structured denial reason.
//! 3. [`AccessGate`] ties both to the per-endpoint [`Guard`] table and maps
//!    outcomes onto [`AuthzError`].
//!
//! Evaluation is pure and synchronous; any number of decisions can run
//! concurrently against the same shared [`EngineConfig`].

pub mod attributes;
pub mod config;
pub mod decision;
pub mod error;
pub mod evaluate;
pub mod extract;
pub mod gate;
pub mod guard;
pub mod policy;
pub mod predicate;

#[cfg(test)]
mod fixtures;

pub use attributes::{
    ActionAttributes, AttributeBundle, EnvironmentAttributes, Method, ProductAttributes,
    ResourceAttributes, StaffAttributes,
};
pub use config::{ConfigError, EngineConfig};
pub use decision::{Decision, DenialReason};
pub use error::{AuthzError, ExtractError};
pub use evaluate::evaluate;
pub use extract::{AttributeExtractor, environment_at};
pub use gate::{AccessGate, AccessRequest};
pub use guard::{Endpoint, Guard, ProductRef};
pub use policy::Policy;
pub use predicate::Predicate;
