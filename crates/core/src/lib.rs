//! `brewguard-core`: shared domain building blocks.
//!
//! Identifiers, the domain error model and the small traits the other crates
//! build on. No IO, no authorization logic.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, StaffId};
