use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are coarse-grained tokens (e.g. "manage_products"). Which
/// tokens a role holds is decided by the [`RolePermissionMap`](crate::RolePermissionMap).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

pub const MANAGE_STAFF: Permission = Permission::from_static("manage_staff");
pub const MANAGE_PRODUCTS: Permission = Permission::from_static("manage_products");
pub const MANAGE_PRICES: Permission = Permission::from_static("manage_prices");
pub const UPDATE_PRODUCTS: Permission = Permission::from_static("update_products");
pub const UPDATE_AVAILABILITY: Permission = Permission::from_static("update_availability");
/// Held by no role explicitly; owner-only through the universal grant.
pub const MANAGE_INVENTORY: Permission = Permission::from_static("manage_inventory");
/// Held by no role explicitly; owner-only through the universal grant.
pub const MANAGE_SETTINGS: Permission = Permission::from_static("manage_settings");
