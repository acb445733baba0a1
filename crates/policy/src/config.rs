//! Engine configuration, read once at startup.

use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};
use thiserror::Error;

use brewguard_auth::{RegistryError, RolePermissionMap};

/// Path to a JSON role → permissions document. Unset: built-in table.
pub const ROLE_PERMISSIONS_VAR: &str = "BREWGUARD_ROLE_PERMISSIONS";
/// Signed minutes east of UTC for the store's wall clock. Unset: 0.
pub const STORE_UTC_OFFSET_VAR: &str = "BREWGUARD_STORE_UTC_OFFSET_MINUTES";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("invalid store UTC offset '{0}': expected minutes in -1439..=1439")]
    InvalidOffset(String),
}

/// Immutable engine configuration, shared by reference (or `Arc`) across
/// every decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub registry: RolePermissionMap,
    pub store_offset: FixedOffset,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            registry: RolePermissionMap::builtin(),
            store_offset: Utc.fix(),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (tests pass a closure).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let registry = match lookup(ROLE_PERMISSIONS_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                let doc = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read {
                        path: path.clone(),
                        source,
                    })?;
                tracing::info!(path = %path.display(), "loading role-permission map");
                RolePermissionMap::from_json_str(&doc)?
            }
            None => RolePermissionMap::builtin(),
        };

        let store_offset = match lookup(STORE_UTC_OFFSET_VAR) {
            Some(raw) => parse_offset(&raw)?,
            None => Self::default().store_offset,
        };

        Ok(Self {
            registry,
            store_offset,
        })
    }
}

/// Offsets must stay strictly inside one day.
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

fn parse_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    let invalid = || ConfigError::InvalidOffset(raw.to_string());
    let minutes: i32 = raw.trim().parse().map_err(|_| invalid())?;
    if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
        return Err(invalid());
    }
    let seconds = minutes.checked_mul(60).ok_or_else(invalid)?;
    FixedOffset::east_opt(seconds).ok_or_else(invalid)
}
