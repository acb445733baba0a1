use serde::{Deserialize, Serialize};

/// Which gate caused a denial.
///
/// Logged by the boundary; the untrusted caller only ever sees a generic
/// "access denied".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    RoleMismatch,
    TrainingInsufficient,
    OffShift,
    NotCreatorOrManager,
    TenureInsufficient,
    /// A `not(p)` policy where `p` held.
    ExcludedByNegation,
    /// An `or` with no alternatives.
    NoAlternative,
    /// A per-product policy was asked to judge a request with no product.
    ResourceUnavailable,
}

impl DenialReason {
    pub const ALL: [DenialReason; 8] = [
        DenialReason::RoleMismatch,
        DenialReason::TrainingInsufficient,
        DenialReason::OffShift,
        DenialReason::NotCreatorOrManager,
        DenialReason::TenureInsufficient,
        DenialReason::ExcludedByNegation,
        DenialReason::NoAlternative,
        DenialReason::ResourceUnavailable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DenialReason::RoleMismatch => "role_mismatch",
            DenialReason::TrainingInsufficient => "training_insufficient",
            DenialReason::OffShift => "off_shift",
            DenialReason::NotCreatorOrManager => "not_creator_or_manager",
            DenialReason::TenureInsufficient => "tenure_insufficient",
            DenialReason::ExcludedByNegation => "excluded_by_negation",
            DenialReason::NoAlternative => "no_alternative",
            DenialReason::ResourceUnavailable => "resource_unavailable",
        }
    }
}

impl core::fmt::Display for DenialReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denied_reason: Option<DenialReason>,
}

impl Decision {
    pub const fn allow() -> Self {
        Self {
            allowed: true,
            denied_reason: None,
        }
    }

    pub const fn deny(reason: DenialReason) -> Self {
        Self {
            allowed: false,
            denied_reason: Some(reason),
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.allowed
    }
}

impl From<Result<(), DenialReason>> for Decision {
    fn from(value: Result<(), DenialReason>) -> Self {
        match value {
            Ok(()) => Decision::allow(),
            Err(reason) => Decision::deny(reason),
        }
    }
}
