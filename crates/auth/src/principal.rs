use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use brewguard_core::{DomainError, DomainResult, StaffId};

use crate::Role;

/// Working shift a staff member is rostered on.
///
/// Windows are half-open hour ranges in store-local time; evening wraps
/// midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    /// `[6, 12)`
    Morning,
    /// `[12, 18)`
    Afternoon,
    /// `[18, 24) ∪ [0, 6)`
    Evening,
}

impl Shift {
    /// Returns true if `hour` (0..=23) falls inside this shift's window.
    ///
    /// Hours outside `0..=23` are never inside any window.
    pub fn contains_hour(&self, hour: u8) -> bool {
        match self {
            Shift::Morning => (6..12).contains(&hour),
            Shift::Afternoon => (12..18).contains(&hour),
            Shift::Evening => (18..24).contains(&hour) || hour < 6,
        }
    }
}

/// Barista training level, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct TrainingLevel(u8);

impl TrainingLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> DomainResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&level) {
            return Err(DomainError::out_of_range(
                "training_level",
                i64::from(level),
                i64::from(Self::MIN),
                i64::from(Self::MAX),
            ));
        }
        Ok(Self(level))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Default for TrainingLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for TrainingLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TrainingLevel> for u8 {
    fn from(value: TrainingLevel) -> Self {
        value.0
    }
}

/// A fully resolved, authenticated staff member.
///
/// Authentication happens upstream; by the time a `Principal` exists the
/// identity is trusted. Optional fields stay optional here so that policies
/// can fail closed on them instead of the caller inventing defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: StaffId,
    pub role: Role,
    pub shift: Option<Shift>,
    pub training_level: TrainingLevel,
    pub hire_date: Option<NaiveDate>,
    pub store_location: String,
}

impl Principal {
    /// Creates a principal with the defaults new staff records get: morning
    /// shift, training level 1, the main store and no recorded hire date.
    pub fn new(id: StaffId, role: Role) -> Self {
        Self {
            id,
            role,
            shift: Some(Shift::Morning),
            training_level: TrainingLevel::default(),
            hire_date: None,
            store_location: "main".to_string(),
        }
    }

    /// Builder: set shift.
    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shift = Some(shift);
        self
    }

    /// Builder: clear shift (unrostered staff).
    pub fn without_shift(mut self) -> Self {
        self.shift = None;
        self
    }

    /// Builder: set training level.
    pub fn with_training(mut self, level: TrainingLevel) -> Self {
        self.training_level = level;
        self
    }

    /// Builder: set hire date.
    pub fn hired_on(mut self, date: NaiveDate) -> Self {
        self.hire_date = Some(date);
        self
    }

    /// Builder: set store location.
    pub fn at_location(mut self, location: impl Into<String>) -> Self {
        self.store_location = location.into();
        self
    }
}
