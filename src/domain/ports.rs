use uuid::Uuid;

use super::errors::DomainError;
use super::order::{OrderDraft, OrderPage, OrderQuery, OrderView, ProductionOrder};
use super::resource::{NewResource, Resource, ResourceChanges, ResourceStatus};

pub trait ResourceRepository: Send + Sync + 'static {
    /// Fails with [`DomainError::Duplicate`] when the name is taken.
    fn create(&self, resource: NewResource) -> Result<Resource, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Resource>, DomainError>;
    /// Ordered by name.
    fn list(&self, status: Option<ResourceStatus>) -> Result<Vec<Resource>, DomainError>;
    /// `Ok(None)` when no resource has this id.
    fn update(&self, id: Uuid, changes: ResourceChanges) -> Result<Option<Resource>, DomainError>;
    /// Returns whether a row was deleted. Orders referencing the resource
    /// keep existing with their resource cleared.
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
    fn count(&self) -> Result<i64, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, draft: OrderDraft) -> Result<ProductionOrder, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;
    fn list(&self, query: &OrderQuery) -> Result<OrderPage, DomainError>;
    fn list_all(&self) -> Result<Vec<ProductionOrder>, DomainError>;
    fn scheduled_for_resource(&self, resource_id: Uuid)
        -> Result<Vec<ProductionOrder>, DomainError>;
    /// Replaces every editable field. `Ok(None)` when no order has this id.
    fn update(&self, id: Uuid, draft: OrderDraft) -> Result<Option<ProductionOrder>, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
