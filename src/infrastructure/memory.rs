//! In-process implementation of both repository ports.
//!
//! Mirrors the relational behaviour the services rely on: unique resource
//! names, the `resource_id` foreign key and `ON DELETE SET NULL`. Backs the
//! service and HTTP tests, which run without a database.

use std::cmp::Ordering;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    OrderDraft, OrderPage, OrderQuery, OrderSortField, OrderStatus, OrderView, ProductionOrder,
    SortDirection,
};
use crate::domain::ports::{OrderRepository, ResourceRepository};
use crate::domain::resource::{NewResource, Resource, ResourceChanges, ResourceStatus};
use crate::domain::validation::{ValidationErrors, FIELD_RESOURCE_ID, MSG_UNKNOWN_RESOURCE};

use super::MSG_DUPLICATE_RESOURCE_NAME;

#[derive(Default)]
struct State {
    resources: Vec<Resource>,
    orders: Vec<ProductionOrder>,
}

impl State {
    fn resource(&self, id: Uuid) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    fn check_reference(&self, resource_id: Option<Uuid>) -> Result<(), DomainError> {
        match resource_id {
            Some(id) if self.resource(id).is_none() => Err(DomainError::Validation(
                ValidationErrors::single(FIELD_RESOURCE_ID, MSG_UNKNOWN_RESOURCE),
            )),
            _ => Ok(()),
        }
    }

    fn check_unique_name(&self, name: &str, except: Option<Uuid>) -> Result<(), DomainError> {
        let taken = self
            .resources
            .iter()
            .any(|r| r.name == name && Some(r.id) != except);
        if taken {
            return Err(DomainError::Duplicate(MSG_DUPLICATE_RESOURCE_NAME.to_string()));
        }
        Ok(())
    }

    fn view(&self, order: &ProductionOrder) -> OrderView {
        OrderView {
            order: order.clone(),
            resource: order.resource_id.and_then(|id| self.resource(id)).cloned(),
        }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, DomainError> {
        self.state
            .lock()
            .map_err(|_| DomainError::Internal("memory store lock poisoned".to_string()))
    }
}

fn compare(a: &ProductionOrder, b: &ProductionOrder, sort: OrderSortField) -> Ordering {
    match sort {
        OrderSortField::OrderName => a.order_name.cmp(&b.order_name),
        OrderSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        // Missing start times sort after present ones, as in Postgres ASC.
        OrderSortField::StartTime => match (a.start_time, b.start_time) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}

impl ResourceRepository for MemoryStore {
    fn create(&self, resource: NewResource) -> Result<Resource, DomainError> {
        let mut state = self.lock()?;
        state.check_unique_name(&resource.name, None)?;

        let now = Utc::now();
        let created = Resource {
            id: Uuid::new_v4(),
            name: resource.name,
            status: resource.status,
            created_at: now,
            updated_at: now,
        };
        state.resources.push(created.clone());
        Ok(created)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Resource>, DomainError> {
        Ok(self.lock()?.resource(id).cloned())
    }

    fn list(&self, status: Option<ResourceStatus>) -> Result<Vec<Resource>, DomainError> {
        let state = self.lock()?;
        let mut resources: Vec<Resource> = state
            .resources
            .iter()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        resources.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(resources)
    }

    fn update(&self, id: Uuid, changes: ResourceChanges) -> Result<Option<Resource>, DomainError> {
        let mut state = self.lock()?;
        if let Some(name) = &changes.name {
            state.check_unique_name(name, Some(id))?;
        }

        let Some(resource) = state.resources.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            resource.name = name;
        }
        if let Some(status) = changes.status {
            resource.status = status;
        }
        resource.updated_at = Utc::now();
        Ok(Some(resource.clone()))
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.lock()?;
        let before = state.resources.len();
        state.resources.retain(|r| r.id != id);
        if state.resources.len() == before {
            return Ok(false);
        }

        for order in state.orders.iter_mut().filter(|o| o.resource_id == Some(id)) {
            order.resource_id = None;
        }
        Ok(true)
    }

    fn count(&self) -> Result<i64, DomainError> {
        Ok(self.lock()?.resources.len() as i64)
    }
}

impl OrderRepository for MemoryStore {
    fn create(&self, draft: OrderDraft) -> Result<ProductionOrder, DomainError> {
        let mut state = self.lock()?;
        state.check_reference(draft.resource_id)?;

        let now = Utc::now();
        let order = ProductionOrder {
            id: Uuid::new_v4(),
            order_name: draft.order_name,
            status: draft.status,
            resource_id: draft.resource_id,
            start_time: draft.start_time,
            end_time: draft.end_time,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };
        state.orders.push(order.clone());
        Ok(order)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let state = self.lock()?;
        Ok(state
            .orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| state.view(o)))
    }

    fn list(&self, query: &OrderQuery) -> Result<OrderPage, DomainError> {
        let state = self.lock()?;
        let mut matching: Vec<&ProductionOrder> =
            state.orders.iter().filter(|o| query.matches(o)).collect();

        matching.sort_by(|a, b| {
            let ordering = compare(a, b, query.sort);
            let ordering = match query.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            ordering.then_with(|| a.id.cmp(&b.id))
        });

        let total = matching.len() as i64;
        let items = matching
            .into_iter()
            .skip(query.offset().max(0) as usize)
            .take(query.limit.max(0) as usize)
            .map(|o| state.view(o))
            .collect();
        Ok(OrderPage { items, total })
    }

    fn list_all(&self) -> Result<Vec<ProductionOrder>, DomainError> {
        Ok(self.lock()?.orders.clone())
    }

    fn scheduled_for_resource(
        &self,
        resource_id: Uuid,
    ) -> Result<Vec<ProductionOrder>, DomainError> {
        Ok(self
            .lock()?
            .orders
            .iter()
            .filter(|o| o.status == OrderStatus::Scheduled && o.resource_id == Some(resource_id))
            .cloned()
            .collect())
    }

    fn update(&self, id: Uuid, draft: OrderDraft) -> Result<Option<ProductionOrder>, DomainError> {
        let mut state = self.lock()?;
        state.check_reference(draft.resource_id)?;

        let Some(order) = state.orders.iter_mut().find(|o| o.id == id) else {
            return Ok(None);
        };
        order.order_name = draft.order_name;
        order.status = draft.status;
        order.resource_id = draft.resource_id;
        order.start_time = draft.start_time;
        order.end_time = draft.end_time;
        order.notes = draft.notes;
        order.updated_at = Utc::now();
        Ok(Some(order.clone()))
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.lock()?;
        let before = state.orders.len();
        state.orders.retain(|o| o.id != id);
        Ok(state.orders.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_resource(store: &MemoryStore, name: &str) -> Resource {
        ResourceRepository::create(
            store,
            NewResource {
                name: name.to_string(),
                status: ResourceStatus::Available,
            },
        )
        .expect("create resource failed")
    }

    fn draft(name: &str, resource_id: Option<Uuid>) -> OrderDraft {
        OrderDraft {
            order_name: name.to_string(),
            resource_id,
            ..OrderDraft::default()
        }
    }

    #[test]
    fn duplicate_resource_names_are_rejected() {
        let store = MemoryStore::new();
        add_resource(&store, "CNC Machine 1");
        let err = ResourceRepository::create(
            &store,
            NewResource {
                name: "CNC Machine 1".to_string(),
                status: ResourceStatus::Busy,
            },
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Duplicate(_)));
    }

    #[test]
    fn renaming_to_own_name_is_allowed() {
        let store = MemoryStore::new();
        let cnc = add_resource(&store, "CNC Machine 1");
        let changes = ResourceChanges {
            name: Some("CNC Machine 1".to_string()),
            status: None,
        };
        assert!(ResourceRepository::update(&store, cnc.id, changes)
            .unwrap()
            .is_some());
    }

    #[test]
    fn orders_must_reference_existing_resources() {
        let store = MemoryStore::new();
        let err = OrderRepository::create(&store, draft("Batch", Some(Uuid::new_v4())))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn deleting_resource_nulls_order_references() {
        let store = MemoryStore::new();
        let cnc = add_resource(&store, "CNC Machine 1");
        let order = OrderRepository::create(&store, draft("Batch", Some(cnc.id))).unwrap();

        assert!(ResourceRepository::delete(&store, cnc.id).unwrap());

        let view = OrderRepository::find_by_id(&store, order.id)
            .unwrap()
            .expect("order survives");
        assert_eq!(view.order.resource_id, None);
        assert!(view.resource.is_none());
        assert!(!ResourceRepository::delete(&store, cnc.id).unwrap());
    }

    #[test]
    fn list_sorts_by_name_and_pages() {
        let store = MemoryStore::new();
        for name in ["Delta", "Alpha", "Charlie", "Bravo"] {
            OrderRepository::create(&store, draft(name, None)).unwrap();
        }
        let query = OrderQuery {
            sort: OrderSortField::OrderName,
            direction: SortDirection::Asc,
            page: 2,
            limit: 3,
            ..OrderQuery::default()
        };
        let page = OrderRepository::list(&store, &query).unwrap();
        assert_eq!(page.total, 4);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].order.order_name, "Delta");
    }
}
