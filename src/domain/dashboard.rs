use uuid::Uuid;

use super::order::{OrderStatus, ProductionOrder};
use super::resource::{Resource, ResourceStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUtilization {
    pub resource_id: Uuid,
    pub name: String,
    pub status: ResourceStatus,
    pub scheduled_orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_orders: usize,
    pub scheduled_orders: usize,
    pub pending_orders: usize,
    pub available_resources: usize,
    pub total_resources: usize,
    /// Only statuses that occur, in canonical status order.
    pub orders_by_status: Vec<StatusCount>,
    /// One entry per resource, in the order the resources were given.
    pub resource_utilization: Vec<ResourceUtilization>,
}

pub fn summarize(orders: &[ProductionOrder], resources: &[Resource]) -> DashboardSummary {
    let count_status =
        |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();

    let orders_by_status = OrderStatus::ALL
        .into_iter()
        .map(|status| StatusCount {
            status,
            count: count_status(status),
        })
        .filter(|entry| entry.count > 0)
        .collect();

    let resource_utilization = resources
        .iter()
        .map(|resource| ResourceUtilization {
            resource_id: resource.id,
            name: resource.name.clone(),
            status: resource.status,
            scheduled_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Scheduled && o.resource_id == Some(resource.id))
                .count(),
        })
        .collect();

    DashboardSummary {
        total_orders: orders.len(),
        scheduled_orders: count_status(OrderStatus::Scheduled),
        pending_orders: count_status(OrderStatus::Pending),
        available_resources: resources.iter().filter(|r| r.is_available()).count(),
        total_resources: resources.len(),
        orders_by_status,
        resource_utilization,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn resource(name: &str, status: ResourceStatus) -> Resource {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        Resource {
            id: Uuid::new_v4(),
            name: name.to_string(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    fn order(status: OrderStatus, resource_id: Option<Uuid>) -> ProductionOrder {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        ProductionOrder {
            id: Uuid::new_v4(),
            order_name: "Order".to_string(),
            status,
            resource_id,
            start_time: None,
            end_time: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_inputs_give_zeroes() {
        let summary = summarize(&[], &[]);
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.total_resources, 0);
        assert!(summary.orders_by_status.is_empty());
        assert!(summary.resource_utilization.is_empty());
    }

    #[test]
    fn counts_orders_and_resources() {
        let cnc = resource("CNC Machine 1", ResourceStatus::Available);
        let booth = resource("Painting Booth", ResourceStatus::Busy);
        let orders = vec![
            order(OrderStatus::Pending, None),
            order(OrderStatus::Scheduled, Some(cnc.id)),
            order(OrderStatus::Scheduled, Some(cnc.id)),
            order(OrderStatus::Completed, Some(booth.id)),
            order(OrderStatus::Pending, None),
        ];
        let summary = summarize(&orders, &[cnc.clone(), booth.clone()]);

        assert_eq!(summary.total_orders, 5);
        assert_eq!(summary.scheduled_orders, 2);
        assert_eq!(summary.pending_orders, 2);
        assert_eq!(summary.available_resources, 1);
        assert_eq!(summary.total_resources, 2);
        assert_eq!(
            summary.orders_by_status,
            vec![
                StatusCount { status: OrderStatus::Pending, count: 2 },
                StatusCount { status: OrderStatus::Scheduled, count: 2 },
                StatusCount { status: OrderStatus::Completed, count: 1 },
            ]
        );
        assert_eq!(summary.resource_utilization[0].scheduled_orders, 2);
        assert_eq!(summary.resource_utilization[0].name, "CNC Machine 1");
        // Completed orders do not count towards utilization.
        assert_eq!(summary.resource_utilization[1].scheduled_orders, 0);
        assert_eq!(summary.resource_utilization[1].status, ResourceStatus::Busy);
    }
}
