use serde::{Deserialize, Serialize};

use brewguard_core::{Entity, ProductId, StaffId};

/// A product as stored on the menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub price_cents: u64, // smallest currency unit
    pub category: String,
    pub specialty_item: bool,
    pub limited_time_offer: bool,
    pub availability: bool,
    pub created_by: StaffId,
}

impl ProductRecord {
    /// A plain, available product with no special flags.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        category: impl Into<String>,
        created_by: StaffId,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price_cents: 0,
            category: category.into(),
            specialty_item: false,
            limited_time_offer: false,
            availability: true,
            created_by,
        }
    }

    /// Builder: mark as a specialty item.
    pub fn specialty(mut self) -> Self {
        self.specialty_item = true;
        self
    }

    /// Builder: mark as a limited-time offer.
    pub fn limited_time(mut self) -> Self {
        self.limited_time_offer = true;
        self
    }

    /// Builder: set price.
    pub fn priced_at(mut self, cents: u64) -> Self {
        self.price_cents = cents;
        self
    }
}

impl Entity for ProductRecord {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_product_has_no_special_flags() {
        let p = ProductRecord::new(ProductId::new(), "Flat white", "coffee", StaffId::new());
        assert!(!p.specialty_item);
        assert!(!p.limited_time_offer);
        assert!(p.availability);
    }

    #[test]
    fn serializes_with_camel_case_flags() {
        let p = ProductRecord::new(ProductId::new(), "Pumpkin latte", "seasonal", StaffId::new())
            .limited_time()
            .priced_at(550);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["limitedTimeOffer"], true);
        assert_eq!(json["specialtyItem"], false);
        assert_eq!(json["priceCents"], 550);
    }
}
