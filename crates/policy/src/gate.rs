//! The access gate: endpoint guard → RBAC lookup or attribute extraction +
//! policy evaluation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;

use brewguard_auth::{Permission, Principal, authorize};
use brewguard_products::ProductCatalog;

use crate::attributes::Method;
use crate::config::EngineConfig;
use crate::decision::Decision;
use crate::error::AuthzError;
use crate::extract::AttributeExtractor;
use crate::guard::{Endpoint, Guard, ProductRef};
use crate::policy::Policy;

/// One request as seen by the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequest {
    pub endpoint: Endpoint,
    pub product: Option<ProductRef>,
    pub method: Method,
    pub path: String,
    pub now: DateTime<Utc>,
}

impl AccessRequest {
    /// Resolve a raw method + path. `None` for routes the gate does not know.
    pub fn from_route(method: Method, path: &str, now: DateTime<Utc>) -> Option<Self> {
        let (endpoint, product) = Endpoint::resolve(method, path)?;
        Some(Self {
            endpoint,
            product,
            method,
            path: path.to_string(),
            now,
        })
    }
}

/// Decides requests against a shared, immutable [`EngineConfig`].
pub struct AccessGate<C> {
    config: Arc<EngineConfig>,
    extractor: AttributeExtractor<C>,
}

impl<C: ProductCatalog> AccessGate<C> {
    pub fn new(config: Arc<EngineConfig>, catalog: C) -> Self {
        let extractor = AttributeExtractor::new(catalog, config.store_offset);
        Self { config, extractor }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Authorize `request` for `principal`.
    ///
    /// - `Ok(())`: allowed
    /// - `PermissionDenied` / `PolicyDenied` / `InvalidPolicyConfiguration`: access denied
    /// - `ResourceNotFound` / `MalformedProductId`: the named product does not
    ///   exist (no policy was evaluated)
    /// - `Storage`: infrastructure failure while reading the product
    #[instrument(
        level = "debug",
        skip(self, principal, request),
        fields(staff_id = %principal.id, endpoint = ?request.endpoint)
    )]
    pub fn authorize(
        &self,
        principal: &Principal,
        request: &AccessRequest,
    ) -> Result<(), AuthzError> {
        let result = match request.endpoint.guard() {
            Guard::Authenticated => Ok(()),
            Guard::Permission(permission) => self.require_permission(principal, &permission),
            Guard::Policy(policy) => self.require_policy(principal, request, &policy),
        };

        if let Err(err) = &result {
            match err.denial_reason() {
                Some(reason) => tracing::debug!(%reason, error = %err, "access denied"),
                None => tracing::debug!(error = %err, "authorization did not complete"),
            }
        }
        result
    }

    /// Like [`authorize`](Self::authorize), but denials come back as a
    /// [`Decision`]. Only not-found and infrastructure failures are errors.
    pub fn check(
        &self,
        principal: &Principal,
        request: &AccessRequest,
    ) -> Result<Decision, AuthzError> {
        match self.authorize(principal, request) {
            Ok(()) => Ok(Decision::allow()),
            Err(err) => match err.denial_reason() {
                Some(reason) => Ok(Decision::deny(reason)),
                None => Err(err),
            },
        }
    }

    fn require_policy(
        &self,
        principal: &Principal,
        request: &AccessRequest,
        policy: &Policy,
    ) -> Result<(), AuthzError> {
        let product_id = match &request.product {
            Some(ProductRef::Malformed(raw)) => {
                return Err(AuthzError::MalformedProductId(raw.clone()));
            }
            Some(ProductRef::Id(id)) => Some(*id),
            None => None,
        };

        let bundle = self.extractor.extract(
            principal,
            product_id,
            request.method,
            &request.path,
            request.now,
        )?;
        match bundle.evaluate(policy).denied_reason {
            None => Ok(()),
            Some(reason) => Err(AuthzError::PolicyDenied(reason)),
        }
    }

    fn require_permission(
        &self,
        principal: &Principal,
        permission: &Permission,
    ) -> Result<(), AuthzError> {
        let registry = &self.config.registry;
        if !registry.is_configured(principal.role) {
            tracing::warn!(
                kind = "invalid_policy_configuration",
                role = %principal.role,
                permission = %permission,
                "role has no entry in the role-permission map; denying"
            );
            return Err(AuthzError::InvalidPolicyConfiguration(format!(
                "role '{}' has no entry in the role-permission map",
                principal.role
            )));
        }
        authorize(registry, principal, permission)?;
        Ok(())
    }
}
