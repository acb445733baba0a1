//! Shared test fixtures.

use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, TimeZone, Utc};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

use brewguard_auth::{Role, Shift, TrainingLevel};
use brewguard_core::StaffId;

use crate::attributes::{
    ActionAttributes, EnvironmentAttributes, Method, ProductAttributes, ResourceAttributes,
    StaffAttributes,
};

/// Morning-shift staff member with training level 1 and no hire date.
pub fn staff(role: Role) -> StaffAttributes {
    StaffAttributes {
        id: StaffId::new(),
        role,
        shift: Some(Shift::Morning),
        training_level: TrainingLevel::default(),
        hire_date: None,
        store_location: "main".to_string(),
    }
}

/// A Wednesday at `hour`.
pub fn at_hour(hour: u8) -> EnvironmentAttributes {
    EnvironmentAttributes {
        current_hour: hour,
        is_weekend: false,
        today: NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(),
    }
}

pub fn put_product() -> ActionAttributes {
    ActionAttributes {
        method: Method::Put,
        path: "/products/1".to_string(),
        time: Utc.with_ymd_and_hms(2026, 10, 14, 9, 0, 0).unwrap(),
    }
}

pub fn product(
    created_by: StaffId,
    specialty_item: bool,
    limited_time_offer: bool,
) -> ResourceAttributes {
    ResourceAttributes::Product(ProductAttributes {
        category: "coffee".to_string(),
        specialty_item,
        limited_time_offer,
        created_by,
    })
}

pub fn plain_product(created_by: StaffId) -> ResourceAttributes {
    product(created_by, false, false)
}

pub fn specialty_product(created_by: StaffId) -> ResourceAttributes {
    product(created_by, true, false)
}

pub fn limited_time_product(created_by: StaffId) -> ResourceAttributes {
    product(created_by, false, true)
}

/// One event seen by [`CapturedEvents`].
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: Vec<(String, String)>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Tracing layer that records every event, for asserting on log output.
#[derive(Debug, Clone, Default)]
pub struct CapturedEvents {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl CapturedEvents {
    pub fn subscriber(&self) -> impl Subscriber + Send + Sync + 'static {
        tracing_subscriber::registry().with(self.clone())
    }

    pub fn at_level(&self, level: Level) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.level == level)
            .cloned()
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for CapturedEvents {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: Vec<(String, String)>,
}

impl Visit for FieldVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.fields.push((field.name().to_string(), format!("{value:?}")));
    }
}
