//! Attribute bundles for one authorization decision.
//!
//! - [`StaffAttributes`]: the authenticated subject
//! - [`ResourceAttributes`]: the product being acted on, or explicitly absent
//! - [`ActionAttributes`]: what is being attempted
//! - [`EnvironmentAttributes`]: ambient context at decision time
//!
//! All four are captured once per request (see [`AttributeExtractor`](crate::AttributeExtractor))
//! and never re-read during evaluation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use brewguard_auth::{Principal, Role, Shift, TrainingLevel};
use brewguard_core::{DomainError, StaffId};
use brewguard_products::ProductRecord;

/// Attributes describing the staff member requesting access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffAttributes {
    pub id: StaffId,
    pub role: Role,
    pub shift: Option<Shift>,
    pub training_level: TrainingLevel,
    pub hire_date: Option<NaiveDate>,
    pub store_location: String,
}

impl From<&Principal> for StaffAttributes {
    fn from(p: &Principal) -> Self {
        Self {
            id: p.id,
            role: p.role,
            shift: p.shift,
            training_level: p.training_level,
            hire_date: p.hire_date,
            store_location: p.store_location.clone(),
        }
    }
}

/// Projection of a product that policies may look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttributes {
    pub category: String,
    pub specialty_item: bool,
    pub limited_time_offer: bool,
    pub created_by: StaffId,
}

impl From<&ProductRecord> for ProductAttributes {
    fn from(p: &ProductRecord) -> Self {
        Self {
            category: p.category.clone(),
            specialty_item: p.specialty_item,
            limited_time_offer: p.limited_time_offer,
            created_by: p.created_by,
        }
    }
}

/// The object of the action.
///
/// `Absent` is used when the request names no resource (e.g. creation).
/// A named resource that does not exist never reaches this type; the
/// extractor reports it as not found instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceAttributes {
    Product(ProductAttributes),
    Absent,
}

impl ResourceAttributes {
    pub fn product(&self) -> Option<&ProductAttributes> {
        match self {
            ResourceAttributes::Product(p) => Some(p),
            ResourceAttributes::Absent => None,
        }
    }
}

/// HTTP method of the attempted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl core::fmt::Display for Method {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Method {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            other => Err(DomainError::validation(format!("unsupported method '{other}'"))),
        }
    }
}

/// What is being attempted, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionAttributes {
    pub method: Method,
    pub path: String,
    pub time: DateTime<Utc>,
}

/// Ambient context, in store-local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentAttributes {
    /// 0..=23
    pub current_hour: u8,
    pub is_weekend: bool,
    pub today: NaiveDate,
}

/// The four bundles for one decision, captured together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeBundle {
    pub staff: StaffAttributes,
    pub resource: ResourceAttributes,
    pub action: ActionAttributes,
    pub env: EnvironmentAttributes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewguard_core::ProductId;

    #[test]
    fn method_parsing_is_case_insensitive() {
        assert_eq!("patch".parse::<Method>().unwrap(), Method::Patch);
        assert_eq!("DELETE".parse::<Method>().unwrap(), Method::Delete);
        assert!("TRACE".parse::<Method>().is_err());
    }

    #[test]
    fn product_projection_keeps_policy_relevant_fields() {
        let creator = StaffId::new();
        let record = ProductRecord::new(ProductId::new(), "Cortado", "coffee", creator).specialty();
        let attrs = ProductAttributes::from(&record);

        assert_eq!(attrs.created_by, creator);
        assert!(attrs.specialty_item);
        assert!(!attrs.limited_time_offer);
        assert_eq!(attrs.category, "coffee");
    }

    #[test]
    fn absent_resource_is_a_distinct_variant() {
        let json = serde_json::to_value(ResourceAttributes::Absent).unwrap();
        assert_eq!(json["kind"], "absent");
        assert!(ResourceAttributes::Absent.product().is_none());
    }
}
