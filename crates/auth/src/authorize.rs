use serde::Serialize;
use thiserror::Error;

use crate::{Permission, Principal, Role, RolePermissionMap};

/// Simple RBAC lookup failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("forbidden: role '{role}' lacks permission '{permission}'")]
pub struct PermissionDenied {
    pub role: Role,
    pub permission: Permission,
}

/// Authorize a principal for a single permission.
///
/// - No IO
/// - No panics
/// - No business logic (pure registry lookup)
pub fn authorize(
    registry: &RolePermissionMap,
    principal: &Principal,
    required: &Permission,
) -> Result<(), PermissionDenied> {
    if registry.has_permission(principal.role, required) {
        Ok(())
    } else {
        Err(PermissionDenied {
            role: principal.role,
            permission: required.clone(),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation (Audit Trail)
// ─────────────────────────────────────────────────────────────────────────────

/// Why a role does or does not hold a permission.
///
/// Meant for operators debugging "why was this denied?"; never sent to the
/// untrusted caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionExplanation {
    pub role: Role,
    pub permission: Permission,
    pub granted: bool,
    pub reason: String,
    /// Roles that would have been granted the permission.
    pub granting_roles: Vec<Role>,
}

pub fn explain_permission(
    registry: &RolePermissionMap,
    role: Role,
    permission: &Permission,
) -> PermissionExplanation {
    let granted = registry.has_permission(role, permission);
    let granting_roles = registry.roles_granting(permission);

    let reason = if role == Role::Owner {
        "owner holds every permission".to_string()
    } else if granted {
        format!("role '{role}' is granted '{permission}' by the role-permission map")
    } else {
        format!(
            "role '{role}' is not granted '{permission}'; current permissions: {:?}",
            registry
                .permissions_for(role)
                .iter()
                .map(Permission::as_str)
                .collect::<Vec<_>>()
        )
    };

    PermissionExplanation {
        role,
        permission: permission.clone(),
        granted,
        reason,
        granting_roles,
    }
}
