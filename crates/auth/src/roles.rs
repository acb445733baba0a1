use core::str::FromStr;

use serde::{Deserialize, Serialize};

use brewguard_core::DomainError;

/// Staff role used for RBAC.
///
/// The set is closed: anything the upstream identity layer hands us that is
/// not one of these names is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    StoreManager,
    ShiftManager,
    Barista,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Owner,
        Role::StoreManager,
        Role::ShiftManager,
        Role::Barista,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::StoreManager => "store_manager",
            Role::ShiftManager => "shift_manager",
            Role::Barista => "barista",
        }
    }

    /// Owner and store manager: exempt from shift windows and treated as
    /// managers of every product.
    pub fn is_store_management(&self) -> bool {
        matches!(self, Role::Owner | Role::StoreManager)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown role '{s}'")))
    }
}
