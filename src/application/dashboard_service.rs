use std::sync::Arc;

use crate::domain::dashboard::{summarize, DashboardSummary};
use crate::domain::errors::DomainError;
use crate::domain::ports::{OrderRepository, ResourceRepository};

pub struct DashboardService {
    orders: Arc<dyn OrderRepository>,
    resources: Arc<dyn ResourceRepository>,
}

impl DashboardService {
    pub fn new(orders: Arc<dyn OrderRepository>, resources: Arc<dyn ResourceRepository>) -> Self {
        Self { orders, resources }
    }

    pub fn summary(&self) -> Result<DashboardSummary, DomainError> {
        let orders = self.orders.list_all()?;
        let resources = self.resources.list(None)?;
        Ok(summarize(&orders, &resources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderDraft, OrderStatus};
    use crate::domain::resource::{NewResource, ResourceStatus};
    use crate::infrastructure::MemoryStore;

    #[test]
    fn summary_reflects_stored_data() {
        let store = Arc::new(MemoryStore::new());
        let service = DashboardService::new(store.clone(), store.clone());

        let cnc = ResourceRepository::create(
            store.as_ref(),
            NewResource {
                name: "CNC Machine 1".to_string(),
                status: ResourceStatus::Available,
            },
        )
        .unwrap();
        ResourceRepository::create(
            store.as_ref(),
            NewResource {
                name: "CNC Machine 2".to_string(),
                status: ResourceStatus::Maintenance,
            },
        )
        .unwrap();
        OrderRepository::create(
            store.as_ref(),
            OrderDraft {
                order_name: "Sample".to_string(),
                status: OrderStatus::Scheduled,
                resource_id: Some(cnc.id),
                ..OrderDraft::default()
            },
        )
        .unwrap();

        let summary = service.summary().unwrap();
        assert_eq!(summary.total_orders, 1);
        assert_eq!(summary.scheduled_orders, 1);
        assert_eq!(summary.available_resources, 1);
        assert_eq!(summary.total_resources, 2);
        assert_eq!(summary.resource_utilization[0].scheduled_orders, 1);
    }
}
