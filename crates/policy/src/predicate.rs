//! Atomic predicates.
//!
//! Each predicate is pure over the attribute bundles and answers with the
//! reason it failed, so composite policies can report a precise cause.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use brewguard_auth::Role;

use crate::attributes::{EnvironmentAttributes, ResourceAttributes, StaffAttributes};
use crate::decision::DenialReason;

/// Minimum training level for working on specialty items.
pub const SPECIALTY_TRAINING_LEVEL: u8 = 3;

/// Borrowed view over the four bundles of one decision.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Attrs<'a> {
    pub staff: &'a StaffAttributes,
    pub resource: &'a ResourceAttributes,
    pub env: &'a EnvironmentAttributes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "predicate", rename_all = "snake_case")]
pub enum Predicate {
    /// Staff role is one of `roles`.
    RoleIn { roles: BTreeSet<Role> },
    /// Staff created the product.
    IsCreator,
    /// Staff created the product, or is owner / store manager.
    IsCreatorOrManager,
    /// Non-specialty products are unconstrained; specialty ones need
    /// [`SPECIALTY_TRAINING_LEVEL`].
    HasTrainingForSpecialty,
    /// Owner / store manager always; everyone else only inside their shift
    /// window.
    OnShift,
    /// Staff has been employed for at least `days` days.
    TenureAtLeast { days: u32 },
}

impl Predicate {
    pub fn role_in(roles: impl IntoIterator<Item = Role>) -> Self {
        Predicate::RoleIn {
            roles: roles.into_iter().collect(),
        }
    }

    pub(crate) fn check(&self, attrs: &Attrs<'_>) -> Result<(), DenialReason> {
        let staff = attrs.staff;
        match self {
            Predicate::RoleIn { roles } => {
                ensure(roles.contains(&staff.role), DenialReason::RoleMismatch)
            }
            Predicate::IsCreator => ensure(is_creator(attrs), DenialReason::NotCreatorOrManager),
            Predicate::IsCreatorOrManager => ensure(
                staff.role.is_store_management() || is_creator(attrs),
                DenialReason::NotCreatorOrManager,
            ),
            Predicate::HasTrainingForSpecialty => {
                // No product means the specialty flag is unknown; require training.
                let unconstrained = attrs.resource.product().is_some_and(|p| !p.specialty_item);
                ensure(
                    unconstrained || staff.training_level.value() >= SPECIALTY_TRAINING_LEVEL,
                    DenialReason::TrainingInsufficient,
                )
            }
            Predicate::OnShift => ensure(
                staff.role.is_store_management()
                    || staff
                        .shift
                        .is_some_and(|shift| shift.contains_hour(attrs.env.current_hour)),
                DenialReason::OffShift,
            ),
            Predicate::TenureAtLeast { days } => ensure(
                staff
                    .hire_date
                    .is_some_and(|hired| (attrs.env.today - hired).num_days() >= i64::from(*days)),
                DenialReason::TenureInsufficient,
            ),
        }
    }
}

fn ensure(holds: bool, reason: DenialReason) -> Result<(), DenialReason> {
    if holds { Ok(()) } else { Err(reason) }
}

fn is_creator(attrs: &Attrs<'_>) -> bool {
    attrs
        .resource
        .product()
        .is_some_and(|p| p.created_by == attrs.staff.id)
}
