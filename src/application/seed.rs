use crate::domain::errors::DomainError;
use crate::domain::order::OrderDraft;
use crate::domain::resource::{NewResource, ResourceStatus};

use super::Services;

const DEMO_RESOURCES: [(&str, ResourceStatus); 4] = [
    ("CNC Machine 1", ResourceStatus::Available),
    ("Assembly Line A", ResourceStatus::Available),
    ("Painting Booth", ResourceStatus::Busy),
    ("CNC Machine 2", ResourceStatus::Maintenance),
];

/// Insert the demo resources and a sample pending order into an empty store.
/// Returns `false` without writing when any resource already exists.
pub fn seed_demo_data(services: &Services) -> Result<bool, DomainError> {
    if services.resources.count_resources()? > 0 {
        log::debug!("resources present, skipping demo data");
        return Ok(false);
    }

    for (name, status) in DEMO_RESOURCES {
        services.resources.create_resource(NewResource {
            name: name.to_string(),
            status,
        })?;
    }
    services.orders.create_order(OrderDraft {
        order_name: "Sample Pending Order".to_string(),
        notes: Some("This is a sample order to start with.".to_string()),
        ..OrderDraft::default()
    })?;

    log::info!("seeded {} demo resources", DEMO_RESOURCES.len());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderQuery, OrderStatus};

    #[test]
    fn seeds_once() {
        let services = Services::in_memory();
        assert!(seed_demo_data(&services).unwrap());
        assert!(!seed_demo_data(&services).unwrap());

        let resources = services.resources.list_resources(None).unwrap();
        assert_eq!(resources.len(), 4);
        let available = resources.iter().filter(|r| r.is_available()).count();
        assert_eq!(available, 2);

        let orders = services.orders.list_orders(OrderQuery::default()).unwrap();
        assert_eq!(orders.total, 1);
        assert_eq!(orders.items[0].order.status, OrderStatus::Pending);
        assert_eq!(orders.items[0].order.order_name, "Sample Pending Order");
    }
}
