//! Per-endpoint guards.
//!
//! Which check protects which endpoint is declared once, here, as data.

use serde::{Deserialize, Serialize};

use brewguard_auth::Permission;
use brewguard_auth::permissions::{
    MANAGE_INVENTORY, MANAGE_PRICES, MANAGE_PRODUCTS, MANAGE_SETTINGS, MANAGE_STAFF,
    UPDATE_AVAILABILITY, UPDATE_PRODUCTS,
};
use brewguard_core::ProductId;

use crate::attributes::Method;
use crate::policy::{self, Policy};

/// The product a route's id segment names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductRef {
    Id(ProductId),
    /// The segment is not a product id, so no such product can exist.
    Malformed(String),
}

impl ProductRef {
    fn parse(segment: &str) -> Self {
        segment
            .parse::<ProductId>()
            .map(ProductRef::Id)
            .unwrap_or_else(|_| ProductRef::Malformed(segment.to_string()))
    }

    pub fn id(&self) -> Option<ProductId> {
        match self {
            ProductRef::Id(id) => Some(*id),
            ProductRef::Malformed(_) => None,
        }
    }
}

/// How an endpoint is protected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "guard", content = "with", rename_all = "snake_case")]
pub enum Guard {
    /// Any authenticated staff member.
    Authenticated,
    /// RBAC: the role must hold the permission.
    Permission(Permission),
    /// ABAC: the policy must allow against the request's attributes.
    Policy(Policy),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    ListProducts,
    GetProduct,
    CreateProduct,
    UpdateProduct,
    UpdateProductDetails,
    UpdateAvailability,
    UpdatePrice,
    DeleteProduct,
    ListStaff,
    GetStaff,
    CreateStaff,
    UpdateStaff,
    DeleteStaff,
    ViewInventory,
    ManageInventory,
    ViewSettings,
    UpdateSettings,
}

impl Endpoint {
    pub fn guard(&self) -> Guard {
        match self {
            Endpoint::ListProducts
            | Endpoint::GetProduct
            | Endpoint::ViewInventory
            | Endpoint::ViewSettings => Guard::Authenticated,
            Endpoint::CreateProduct | Endpoint::DeleteProduct => Guard::Permission(MANAGE_PRODUCTS),
            Endpoint::UpdateProduct => Guard::Policy(policy::update_product()),
            Endpoint::UpdateProductDetails => Guard::Permission(UPDATE_PRODUCTS),
            Endpoint::UpdateAvailability => Guard::Permission(UPDATE_AVAILABILITY),
            Endpoint::UpdatePrice => Guard::Permission(MANAGE_PRICES),
            Endpoint::ListStaff
            | Endpoint::GetStaff
            | Endpoint::CreateStaff
            | Endpoint::UpdateStaff
            | Endpoint::DeleteStaff => Guard::Permission(MANAGE_STAFF),
            Endpoint::ManageInventory => Guard::Permission(MANAGE_INVENTORY),
            Endpoint::UpdateSettings => Guard::Permission(MANAGE_SETTINGS),
        }
    }

    /// True when deciding this endpoint reads the product's attributes.
    pub fn needs_resource(&self) -> bool {
        matches!(self.guard(), Guard::Policy(_))
    }

    /// Map an HTTP method and path to an endpoint and, for product routes,
    /// the product the id segment names.
    ///
    /// Unknown routes resolve to `None`. A product route whose id segment is
    /// not a valid [`ProductId`] still resolves, with [`ProductRef::Malformed`].
    pub fn resolve(method: Method, path: &str) -> Option<(Endpoint, Option<ProductRef>)> {
        let segments: Vec<&str> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        let endpoint = match (method, segments.as_slice()) {
            (Method::Get, ["products"]) => Endpoint::ListProducts,
            (Method::Post, ["products"]) => Endpoint::CreateProduct,
            (Method::Get, ["products", _]) => Endpoint::GetProduct,
            (Method::Put, ["products", _]) => Endpoint::UpdateProduct,
            (Method::Delete, ["products", _]) => Endpoint::DeleteProduct,
            (Method::Patch, ["products", _, "details"]) => Endpoint::UpdateProductDetails,
            (Method::Patch, ["products", _, "availability"]) => Endpoint::UpdateAvailability,
            (Method::Patch, ["products", _, "price"]) => Endpoint::UpdatePrice,

            (Method::Get, ["staff"]) => Endpoint::ListStaff,
            (Method::Post, ["staff"]) => Endpoint::CreateStaff,
            (Method::Get, ["staff", _]) => Endpoint::GetStaff,
            (Method::Put, ["staff", _]) => Endpoint::UpdateStaff,
            (Method::Delete, ["staff", _]) => Endpoint::DeleteStaff,

            (Method::Get, ["inventory"] | ["inventory", _]) => Endpoint::ViewInventory,
            (Method::Post, ["inventory"]) => Endpoint::ManageInventory,
            (Method::Put | Method::Delete, ["inventory", _]) => Endpoint::ManageInventory,

            (Method::Get, ["settings"]) => Endpoint::ViewSettings,
            (Method::Put, ["settings"]) => Endpoint::UpdateSettings,
            _ => return None,
        };

        let product = match segments.as_slice() {
            ["products", id, ..] => Some(ProductRef::parse(id)),
            _ => None,
        };

        Some((endpoint, product))
    }
}
