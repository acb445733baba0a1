//! Immutable role → permission registry.
//!
//! Built once at process start (from the built-in table or a JSON document)
//! and shared by reference afterwards. There is no mutation API.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use thiserror::Error;

use crate::permissions::{
    MANAGE_PRICES, MANAGE_PRODUCTS, MANAGE_STAFF, UPDATE_AVAILABILITY, UPDATE_PRODUCTS,
};
use crate::{Permission, Role};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("malformed role-permission document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Role → permission set. The owner role implicitly holds every permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionMap {
    grants: HashMap<Role, BTreeSet<Permission>>,
}

impl RolePermissionMap {
    /// The table the store ships with.
    pub fn builtin() -> Self {
        Self::from_grants([
            (
                Role::Owner,
                vec![
                    MANAGE_STAFF,
                    MANAGE_PRODUCTS,
                    MANAGE_PRICES,
                    UPDATE_AVAILABILITY,
                    UPDATE_PRODUCTS,
                ],
            ),
            (
                Role::StoreManager,
                vec![
                    MANAGE_PRODUCTS,
                    MANAGE_PRICES,
                    UPDATE_AVAILABILITY,
                    UPDATE_PRODUCTS,
                ],
            ),
            (Role::ShiftManager, vec![UPDATE_PRODUCTS, UPDATE_AVAILABILITY]),
            (Role::Barista, vec![UPDATE_AVAILABILITY]),
        ])
    }

    pub fn from_grants<I, P>(grants: I) -> Self
    where
        I: IntoIterator<Item = (Role, P)>,
        P: IntoIterator<Item = Permission>,
    {
        let mut map: HashMap<Role, BTreeSet<Permission>> = HashMap::new();
        for (role, perms) in grants {
            map.entry(role).or_default().extend(perms);
        }
        Self { grants: map }
    }

    /// Parse a `{ "<role>": ["perm", ...] }` document.
    ///
    /// Unknown role names are skipped with a configuration warning; whatever
    /// they were meant to grant is simply not granted.
    pub fn from_json_str(doc: &str) -> Result<Self, RegistryError> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(doc)?;

        let mut grants = Vec::with_capacity(raw.len());
        for (name, perms) in raw {
            match name.parse::<Role>() {
                Ok(role) => {
                    let perms: Vec<Permission> = perms.into_iter().map(Permission::new).collect();
                    grants.push((role, perms));
                }
                Err(_) => {
                    tracing::warn!(
                        kind = "invalid_policy_configuration",
                        role = %name,
                        "ignoring unknown role in role-permission document"
                    );
                }
            }
        }

        Ok(Self::from_grants(grants))
    }

    /// RBAC check.
    ///
    /// - Owner: always true.
    /// - Role missing from the map: false, logged as a configuration warning.
    /// - Otherwise: membership in the role's set.
    pub fn has_permission(&self, role: Role, permission: &Permission) -> bool {
        if role == Role::Owner {
            return true;
        }

        match self.grants.get(&role) {
            Some(perms) => perms.contains(permission),
            None => {
                tracing::warn!(
                    kind = "invalid_policy_configuration",
                    role = %role,
                    permission = %permission,
                    "role has no entry in the role-permission map; denying"
                );
                false
            }
        }
    }

    /// True if `role` has an entry in the map (the owner always does).
    pub fn is_configured(&self, role: Role) -> bool {
        role == Role::Owner || self.grants.contains_key(&role)
    }

    /// RBAC check for a raw role name (e.g. straight from token claims).
    ///
    /// Names that are not a known role are denied, never an error.
    pub fn has_permission_named(&self, role: &str, permission: &Permission) -> bool {
        match role.parse::<Role>() {
            Ok(role) => self.has_permission(role, permission),
            Err(_) => {
                tracing::warn!(
                    kind = "invalid_policy_configuration",
                    role = %role,
                    permission = %permission,
                    "unknown role name; denying"
                );
                false
            }
        }
    }

    /// Every permission token mentioned anywhere in the map.
    pub fn known_permissions(&self) -> BTreeSet<Permission> {
        self.grants.values().flatten().cloned().collect()
    }

    /// Effective permissions of `role`, sorted.
    ///
    /// For the owner this is every permission known to the map.
    pub fn permissions_for(&self, role: Role) -> Vec<Permission> {
        if role == Role::Owner {
            return self.known_permissions().into_iter().collect();
        }
        self.grants
            .get(&role)
            .map(|perms| perms.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Roles holding `permission`, in declaration order of [`Role::ALL`].
    pub fn roles_granting(&self, permission: &Permission) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| {
                *role == Role::Owner
                    || self
                        .grants
                        .get(role)
                        .is_some_and(|perms| perms.contains(permission))
            })
            .collect()
    }
}

impl Default for RolePermissionMap {
    fn default() -> Self {
        Self::builtin()
    }
}
