//! Policies as data.
//!
//! A [`Policy`] is an atomic [`Predicate`] or a composition of policies.
//! Route code only ever names a policy; what it means lives here, where it can
//! be inspected, serialized and tested without HTTP.

use serde::{Deserialize, Serialize};

use brewguard_auth::Role;

use crate::predicate::Predicate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum Policy {
    Atom(Predicate),
    /// Holds iff every operand holds; short-circuits on the first failure.
    And(Vec<Policy>),
    /// Holds iff some operand holds; short-circuits on the first success.
    Or(Vec<Policy>),
    Not(Box<Policy>),
    /// Picks one branch from the product's flags.
    ///
    /// Precedence is fixed: specialty, then limited-time offer, then regular.
    /// A product carrying both flags is judged by `specialty`.
    ByProductKind {
        specialty: Box<Policy>,
        limited_time_offer: Box<Policy>,
        regular: Box<Policy>,
    },
}

impl From<Predicate> for Policy {
    fn from(p: Predicate) -> Self {
        Policy::Atom(p)
    }
}

pub fn and(policies: impl IntoIterator<Item = Policy>) -> Policy {
    Policy::And(policies.into_iter().collect())
}

pub fn or(policies: impl IntoIterator<Item = Policy>) -> Policy {
    Policy::Or(policies.into_iter().collect())
}

pub fn not(policy: Policy) -> Policy {
    Policy::Not(Box::new(policy))
}

pub fn role_in(roles: impl IntoIterator<Item = Role>) -> Policy {
    Predicate::role_in(roles).into()
}

pub fn is_creator() -> Policy {
    Predicate::IsCreator.into()
}

pub fn is_creator_or_manager() -> Policy {
    Predicate::IsCreatorOrManager.into()
}

pub fn has_training_for_specialty() -> Policy {
    Predicate::HasTrainingForSpecialty.into()
}

pub fn on_shift() -> Policy {
    Predicate::OnShift.into()
}

pub fn tenure_at_least(days: u32) -> Policy {
    Predicate::TenureAtLeast { days }.into()
}

/// Full product update (`PUT /products/:id`).
///
/// - specialty item: owner / store manager, or a trained creator on shift
/// - limited-time offer: creator or manager, on shift
/// - anything else: owner / store manager / shift manager, on shift
pub fn update_product() -> Policy {
    Policy::ByProductKind {
        specialty: Box::new(or([
            role_in([Role::Owner, Role::StoreManager]),
            and([has_training_for_specialty(), is_creator(), on_shift()]),
        ])),
        limited_time_offer: Box::new(and([is_creator_or_manager(), on_shift()])),
        regular: Box::new(and([
            role_in([Role::Owner, Role::StoreManager, Role::ShiftManager]),
            on_shift(),
        ])),
    }
}
