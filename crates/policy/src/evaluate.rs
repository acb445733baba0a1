//! Policy evaluation.
//!
//! [`evaluate`] is total: every well-typed input yields a [`Decision`], no
//! IO happens, and identical inputs always produce identical decisions.

use tracing::instrument;

use brewguard_auth::Role;

use crate::attributes::{
    ActionAttributes, AttributeBundle, EnvironmentAttributes, ResourceAttributes, StaffAttributes,
};
use crate::decision::{Decision, DenialReason};
use crate::policy::Policy;
use crate::predicate::Attrs;

/// Evaluates `policy` against one captured set of attribute bundles.
///
/// The owner role is allowed unconditionally, before the policy is looked
/// at. Otherwise the policy is walked depth-first:
///
/// - `And` reports the first failing operand's reason
/// - `Or` reports the reason of its last failing alternative
/// - `Not` denies with [`DenialReason::ExcludedByNegation`]
/// - `ByProductKind` with no product denies with [`DenialReason::ResourceUnavailable`]
#[instrument(
    level = "debug",
    skip_all,
    fields(
        staff_id = %staff.id,
        role = %staff.role,
        method = %action.method,
        path = %action.path,
    )
)]
pub fn evaluate(
    policy: &Policy,
    staff: &StaffAttributes,
    resource: &ResourceAttributes,
    action: &ActionAttributes,
    env: &EnvironmentAttributes,
) -> Decision {
    if staff.role == Role::Owner {
        return Decision::allow();
    }

    let attrs = Attrs {
        staff,
        resource,
        env,
    };
    let decision = Decision::from(check(policy, &attrs));
    tracing::debug!(
        allowed = decision.allowed,
        reason = ?decision.denied_reason,
        "policy evaluated"
    );
    decision
}

impl AttributeBundle {
    pub fn evaluate(&self, policy: &Policy) -> Decision {
        evaluate(policy, &self.staff, &self.resource, &self.action, &self.env)
    }
}

fn check(policy: &Policy, attrs: &Attrs<'_>) -> Result<(), DenialReason> {
    match policy {
        Policy::Atom(predicate) => predicate.check(attrs),
        Policy::And(operands) => operands.iter().try_for_each(|p| check(p, attrs)),
        Policy::Or(alternatives) => {
            let mut last = DenialReason::NoAlternative;
            for p in alternatives {
                match check(p, attrs) {
                    Ok(()) => return Ok(()),
                    Err(reason) => last = reason,
                }
            }
            Err(last)
        }
        Policy::Not(inner) => match check(inner, attrs) {
            Ok(()) => Err(DenialReason::ExcludedByNegation),
            Err(_) => Ok(()),
        },
        Policy::ByProductKind {
            specialty,
            limited_time_offer,
            regular,
        } => {
            let Some(product) = attrs.resource.product() else {
                return Err(DenialReason::ResourceUnavailable);
            };
            if product.specialty_item {
                check(specialty, attrs)
            } else if product.limited_time_offer {
                check(limited_time_offer, attrs)
            } else {
                check(regular, attrs)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{
        at_hour, limited_time_product, plain_product, product, put_product, specialty_product,
        staff,
    };
    use crate::policy::{
        and, has_training_for_specialty, is_creator, not, on_shift, or, role_in, update_product,
    };
    use brewguard_auth::{Shift, TrainingLevel};
    use brewguard_core::StaffId;
    use proptest::prelude::*;

    fn eval(policy: &Policy, s: &StaffAttributes, r: &ResourceAttributes, hour: u8) -> Decision {
        evaluate(policy, s, r, &put_product(), &at_hour(hour))
    }

    fn trained(mut s: StaffAttributes, level: u8) -> StaffAttributes {
        s.training_level = TrainingLevel::new(level).unwrap();
        s
    }

    mod combinators {
        use super::*;

        #[test]
        fn and_reports_first_failure() {
            let s = staff(Role::Barista);
            let policy = and([role_in([Role::ShiftManager]), on_shift()]);
            assert_eq!(
                eval(&policy, &s, &ResourceAttributes::Absent, 22),
                Decision::deny(DenialReason::RoleMismatch)
            );
        }

        #[test]
        fn empty_and_allows() {
            let s = staff(Role::Barista);
            assert!(eval(&and([]), &s, &ResourceAttributes::Absent, 9).is_allowed());
        }

        #[test]
        fn or_reports_last_failure() {
            let s = staff(Role::Barista);
            let policy = or([role_in([Role::StoreManager]), on_shift()]);
            assert_eq!(
                eval(&policy, &s, &ResourceAttributes::Absent, 22),
                Decision::deny(DenialReason::OffShift)
            );
            assert!(eval(&policy, &s, &ResourceAttributes::Absent, 9).is_allowed());
        }

        #[test]
        fn empty_or_denies() {
            let s = staff(Role::Barista);
            assert_eq!(
                eval(&or([]), &s, &ResourceAttributes::Absent, 9),
                Decision::deny(DenialReason::NoAlternative)
            );
        }

        #[test]
        fn not_inverts() {
            let s = staff(Role::Barista);
            let policy = not(on_shift());
            assert!(eval(&policy, &s, &ResourceAttributes::Absent, 22).is_allowed());
            assert_eq!(
                eval(&policy, &s, &ResourceAttributes::Absent, 9),
                Decision::deny(DenialReason::ExcludedByNegation)
            );
        }

        #[test]
        fn owner_bypasses_even_negations() {
            let s = staff(Role::Owner);
            let policy = not(role_in([Role::Owner]));
            assert!(eval(&policy, &s, &ResourceAttributes::Absent, 3).is_allowed());
        }
    }

    mod update_product_policy {
        use super::*;

        #[test]
        fn specialty_needs_training_level_three() {
            let s = staff(Role::ShiftManager);
            let resource = specialty_product(s.id);

            assert_eq!(
                eval(&update_product(), &trained(s.clone(), 2), &resource, 9),
                Decision::deny(DenialReason::TrainingInsufficient)
            );
            assert!(eval(&update_product(), &trained(s, 3), &resource, 9).is_allowed());
        }

        #[test]
        fn specialty_requires_creator_for_non_managers() {
            let s = trained(staff(Role::ShiftManager), 5);
            let resource = specialty_product(StaffId::new());
            assert_eq!(
                eval(&update_product(), &s, &resource, 9),
                Decision::deny(DenialReason::NotCreatorOrManager)
            );
        }

        #[test]
        fn specialty_requires_shift_for_trained_creator() {
            let s = trained(staff(Role::Barista), 4);
            let resource = specialty_product(s.id);
            assert_eq!(
                eval(&update_product(), &s, &resource, 20),
                Decision::deny(DenialReason::OffShift)
            );
        }

        #[test]
        fn store_manager_edits_specialty_items_off_shift_untrained() {
            let s = staff(Role::StoreManager);
            let resource = specialty_product(StaffId::new());
            assert!(eval(&update_product(), &s, &resource, 3).is_allowed());
        }

        #[test]
        fn limited_time_offer_denies_non_creator_non_manager() {
            let s = staff(Role::ShiftManager);
            let resource = limited_time_product(StaffId::new());
            assert_eq!(
                eval(&update_product(), &s, &resource, 9),
                Decision::deny(DenialReason::NotCreatorOrManager)
            );
        }

        #[test]
        fn limited_time_offer_allows_creating_barista_on_shift() {
            let s = staff(Role::Barista);
            let resource = limited_time_product(s.id);
            assert!(eval(&update_product(), &s, &resource, 9).is_allowed());
            assert_eq!(
                eval(&update_product(), &s, &resource, 13),
                Decision::deny(DenialReason::OffShift)
            );
        }

        #[test]
        fn regular_product_denies_barista_with_role_mismatch() {
            let s = staff(Role::Barista);
            let resource = plain_product(StaffId::new());
            assert_eq!(
                eval(&update_product(), &s, &resource, 9),
                Decision::deny(DenialReason::RoleMismatch)
            );
        }

        #[test]
        fn regular_product_allows_shift_manager_on_shift() {
            let s = staff(Role::ShiftManager);
            let resource = plain_product(StaffId::new());
            assert!(eval(&update_product(), &s, &resource, 11).is_allowed());
            assert_eq!(
                eval(&update_product(), &s, &resource, 12),
                Decision::deny(DenialReason::OffShift)
            );
        }

        #[test]
        fn specialty_flag_takes_precedence_over_limited_time_offer() {
            // An untrained creator on shift passes the limited-time branch,
            // but the specialty branch decides.
            let s = staff(Role::Barista);
            let both = product(s.id, true, true);

            assert_eq!(
                eval(&update_product(), &trained(s.clone(), 2), &both, 9),
                Decision::deny(DenialReason::TrainingInsufficient)
            );
            assert!(eval(&update_product(), &trained(s, 3), &both, 9).is_allowed());
        }

        #[test]
        fn no_product_is_resource_unavailable() {
            let s = staff(Role::StoreManager);
            assert_eq!(
                eval(&update_product(), &s, &ResourceAttributes::Absent, 9),
                Decision::deny(DenialReason::ResourceUnavailable)
            );
        }

        #[test]
        fn evening_shift_manager_wraps_midnight() {
            let mut s = staff(Role::ShiftManager);
            s.shift = Some(Shift::Evening);
            let resource = plain_product(StaffId::new());

            assert!(eval(&update_product(), &s, &resource, 23).is_allowed());
            assert!(eval(&update_product(), &s, &resource, 0).is_allowed());
            assert_eq!(
                eval(&update_product(), &s, &resource, 12),
                Decision::deny(DenialReason::OffShift)
            );
        }
    }

    fn any_role() -> impl Strategy<Value = Role> {
        prop::sample::select(Role::ALL.to_vec())
    }

    fn any_shift() -> impl Strategy<Value = Option<Shift>> {
        prop::option::of(prop::sample::select(vec![
            Shift::Morning,
            Shift::Afternoon,
            Shift::Evening,
        ]))
    }

    fn any_policy() -> impl Strategy<Value = Policy> {
        let leaf = prop_oneof![
            Just(on_shift()),
            Just(is_creator()),
            Just(has_training_for_specialty()),
            any_role().prop_map(|r| role_in([r])),
            Just(update_product()),
        ];
        leaf.prop_recursive(3, 16, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(|ps| and(ps)),
                prop::collection::vec(inner.clone(), 0..4).prop_map(|ps| or(ps)),
                inner.prop_map(not),
            ]
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the owner is allowed by every policy, at every hour.
        #[test]
        fn owner_is_always_allowed(
            policy in any_policy(),
            hour in 0u8..24,
            specialty in any::<bool>(),
            lto in any::<bool>(),
        ) {
            let s = staff(Role::Owner);
            let resource = product(StaffId::new(), specialty, lto);
            prop_assert!(eval(&policy, &s, &resource, hour).is_allowed());
        }

        /// Property: evaluation is a pure function of its inputs.
        #[test]
        fn evaluation_is_deterministic(
            policy in any_policy(),
            role in any_role(),
            shift in any_shift(),
            level in 1u8..=5,
            hour in 0u8..24,
            specialty in any::<bool>(),
            lto in any::<bool>(),
            creator in any::<bool>(),
        ) {
            let mut s = trained(staff(role), level);
            s.shift = shift;
            let created_by = if creator { s.id } else { StaffId::new() };
            let resource = product(created_by, specialty, lto);

            let first = eval(&policy, &s, &resource, hour);
            let second = eval(&policy, &s, &resource, hour);
            prop_assert_eq!(first, second);
            prop_assert_eq!(first.allowed, first.denied_reason.is_none());
        }

        /// Property: a non-manager off their shift can never update a product.
        #[test]
        fn off_shift_non_managers_never_update(
            role in prop::sample::select(vec![Role::ShiftManager, Role::Barista]),
            level in 1u8..=5,
            specialty in any::<bool>(),
            lto in any::<bool>(),
        ) {
            // Morning staff at 15:00.
            let s = trained(staff(role), level);
            let resource = product(s.id, specialty, lto);
            prop_assert!(!eval(&update_product(), &s, &resource, 15).is_allowed());
        }
    }
}
