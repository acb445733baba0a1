//! Authorization error taxonomy.

use thiserror::Error;

use brewguard_auth::PermissionDenied;
use brewguard_core::ProductId;
use brewguard_products::StoreError;

use crate::decision::DenialReason;

/// Failure while assembling attribute bundles.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The request named a product that does not exist. Not a denial: the
    /// caller answers "not found" without evaluating any policy.
    #[error("product {0} not found")]
    ResourceNotFound(ProductId),

    /// Storage failed; propagate as an infrastructure error.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    /// No principal. Handled upstream; listed for completeness.
    #[error("authentication required")]
    AuthenticationRequired,

    #[error("product {0} not found")]
    ResourceNotFound(ProductId),

    /// The route's id segment is not a product id. Answered like
    /// [`ResourceNotFound`](Self::ResourceNotFound).
    #[error("product '{0}' not found: not a product id")]
    MalformedProductId(String),

    #[error(transparent)]
    PermissionDenied(#[from] PermissionDenied),

    #[error("denied by policy: {0}")]
    PolicyDenied(DenialReason),

    /// The registry has no entry for a role. Always a denial, never a crash.
    #[error("invalid policy configuration: {0}")]
    InvalidPolicyConfiguration(String),

    #[error(transparent)]
    Storage(StoreError),
}

impl AuthzError {
    /// True for outcomes that mean "access denied" (as opposed to not found,
    /// unauthenticated, or an infrastructure failure).
    pub fn is_denial(&self) -> bool {
        matches!(
            self,
            AuthzError::PermissionDenied(_)
                | AuthzError::PolicyDenied(_)
                | AuthzError::InvalidPolicyConfiguration(_)
        )
    }

    /// Message safe to hand to the untrusted caller. The precise cause stays
    /// in the error value for logging.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthzError::AuthenticationRequired => "authentication required",
            AuthzError::ResourceNotFound(_) | AuthzError::MalformedProductId(_) => {
                "product not found"
            }
            AuthzError::PermissionDenied(_)
            | AuthzError::PolicyDenied(_)
            | AuthzError::InvalidPolicyConfiguration(_) => "access denied",
            AuthzError::Storage(_) => "internal error",
        }
    }

    /// Structured denial reason, if this is a denial.
    pub fn denial_reason(&self) -> Option<DenialReason> {
        match self {
            AuthzError::PolicyDenied(reason) => Some(*reason),
            AuthzError::PermissionDenied(_) | AuthzError::InvalidPolicyConfiguration(_) => {
                Some(DenialReason::RoleMismatch)
            }
            _ => None,
        }
    }
}

impl From<ExtractError> for AuthzError {
    fn from(value: ExtractError) -> Self {
        match value {
            ExtractError::ResourceNotFound(id) => AuthzError::ResourceNotFound(id),
            ExtractError::Storage(e) => AuthzError::Storage(e),
        }
    }
}
