//! Attribute extraction: the only step of a decision that touches storage.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc, Weekday};
use tracing::instrument;

use brewguard_auth::Principal;
use brewguard_core::ProductId;
use brewguard_products::ProductCatalog;

use crate::attributes::{
    ActionAttributes, AttributeBundle, EnvironmentAttributes, Method, ProductAttributes,
    ResourceAttributes, StaffAttributes,
};
use crate::error::ExtractError;

/// Builds the attribute bundles for one request.
#[derive(Debug, Clone)]
pub struct AttributeExtractor<C> {
    catalog: C,
    store_offset: FixedOffset,
}

impl<C: ProductCatalog> AttributeExtractor<C> {
    pub fn new(catalog: C, store_offset: FixedOffset) -> Self {
        Self {
            catalog,
            store_offset,
        }
    }

    /// Snapshot all four bundles.
    ///
    /// `now` is read once by the caller; hour, weekday and date are all
    /// derived from that single instant in store-local time.
    ///
    /// - No product id → [`ResourceAttributes::Absent`]
    /// - Product id with no record → [`ExtractError::ResourceNotFound`]
    /// - Storage failure → [`ExtractError::Storage`]
    #[instrument(level = "debug", skip(self, principal), fields(staff_id = %principal.id))]
    pub fn extract(
        &self,
        principal: &Principal,
        product_id: Option<ProductId>,
        method: Method,
        path: &str,
        now: DateTime<Utc>,
    ) -> Result<AttributeBundle, ExtractError> {
        let resource = match product_id {
            Some(id) => {
                let record = self
                    .catalog
                    .get(&id)?
                    .ok_or(ExtractError::ResourceNotFound(id))?;
                ResourceAttributes::Product(ProductAttributes::from(&record))
            }
            None => ResourceAttributes::Absent,
        };

        Ok(AttributeBundle {
            staff: StaffAttributes::from(principal),
            resource,
            action: ActionAttributes {
                method,
                path: path.to_string(),
                time: now,
            },
            env: environment_at(now, self.store_offset),
        })
    }
}

/// Environment attributes for `now` as seen on the store's wall clock.
pub fn environment_at(now: DateTime<Utc>, store_offset: FixedOffset) -> EnvironmentAttributes {
    let local = now.with_timezone(&store_offset);
    EnvironmentAttributes {
        current_hour: local.hour() as u8,
        is_weekend: matches!(local.weekday(), Weekday::Sat | Weekday::Sun),
        today: local.date_naive(),
    }
}
