use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{OrderDraft, OrderPage, OrderQuery, OrderStatus, OrderView, ProductionOrder};
use crate::domain::ports::{OrderRepository, ResourceRepository};
use crate::domain::schedule::{find_conflicts, ScheduleCandidate};
use crate::domain::validation::{
    validate_order, ValidationErrors, FIELD_RESOURCE_ID, MSG_UNKNOWN_RESOURCE,
};

/// Outcome of the pre-submission check: field errors plus the Scheduled
/// orders whose window the submission would overlap.
#[derive(Debug, Clone, Default)]
pub struct SubmissionReport {
    pub errors: ValidationErrors,
    pub conflicts: Vec<ProductionOrder>,
}

impl SubmissionReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty() && self.conflicts.is_empty()
    }
}

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    resources: Arc<dyn ResourceRepository>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, resources: Arc<dyn ResourceRepository>) -> Self {
        Self { orders, resources }
    }

    pub fn create_order(&self, draft: OrderDraft) -> Result<OrderView, DomainError> {
        self.check_writable(&draft)?;
        let order = self.orders.create(draft)?;
        log::info!("created order {} ({})", order.id, order.status);
        self.attach_resource(order)
    }

    pub fn get_order(&self, id: Uuid) -> Result<OrderView, DomainError> {
        self.orders
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Order"))
    }

    pub fn list_orders(&self, query: OrderQuery) -> Result<OrderPage, DomainError> {
        let query = query.normalized();
        log::debug!(
            "listing orders page {} (limit {}, statuses {:?})",
            query.page,
            query.limit,
            query.statuses
        );
        self.orders.list(&query)
    }

    /// Full-record replacement; any status transition is allowed.
    pub fn update_order(&self, id: Uuid, draft: OrderDraft) -> Result<OrderView, DomainError> {
        self.check_writable(&draft)?;
        let order = self
            .orders
            .update(id, draft)?
            .ok_or(DomainError::NotFound("Order"))?;
        log::info!("updated order {id} (status {})", order.status);
        self.attach_resource(order)
    }

    pub fn delete_order(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.orders.delete(id)? {
            return Err(DomainError::NotFound("Order"));
        }
        log::info!("deleted order {id}");
        Ok(())
    }

    /// Stored Scheduled orders overlapping the candidate window.
    pub fn find_conflicts(
        &self,
        candidate: &ScheduleCandidate,
    ) -> Result<Vec<ProductionOrder>, DomainError> {
        let Some(resource_id) = candidate.resource_id else {
            return Ok(Vec::new());
        };
        let existing = self.orders.scheduled_for_resource(resource_id)?;
        Ok(find_conflicts(candidate, &existing)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Everything a client should verify before submitting `draft`, either as
    /// a new order or as an edit of `editing`. Advisory: create and update do
    /// not repeat the availability and overlap parts.
    pub fn check_submission(
        &self,
        editing: Option<Uuid>,
        draft: &OrderDraft,
    ) -> Result<SubmissionReport, DomainError> {
        let mut errors = match validate_order(draft) {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        let held_resource = match editing {
            Some(id) => self.get_order(id)?.order.resource_id,
            None => None,
        };

        if draft.status == OrderStatus::Scheduled {
            if let Some(resource_id) = draft.resource_id {
                match self.resources.find_by_id(resource_id)? {
                    None => errors.add(FIELD_RESOURCE_ID, MSG_UNKNOWN_RESOURCE),
                    Some(resource)
                        if !resource.is_available() && held_resource != Some(resource.id) =>
                    {
                        errors.add(
                            FIELD_RESOURCE_ID,
                            format!(
                                "Resource \"{}\" is not Available. Please select an Available resource.",
                                resource.name
                            ),
                        );
                    }
                    Some(_) => {}
                }
            }
        }

        // Only two Scheduled orders can clash.
        let conflicts = if draft.status == OrderStatus::Scheduled {
            self.find_conflicts(&ScheduleCandidate::from_draft(editing, draft))?
        } else {
            Vec::new()
        };

        let report = SubmissionReport { errors, conflicts };
        if !report.is_valid() {
            log::warn!(
                "order submission check failed: {} field error(s), {} conflict(s)",
                report.errors.to_string(),
                report.conflicts.len()
            );
        }
        Ok(report)
    }

    fn check_writable(&self, draft: &OrderDraft) -> Result<(), DomainError> {
        if let Err(errors) = validate_order(draft) {
            log::warn!("rejected order: {errors}");
            return Err(errors.into());
        }
        if let Some(resource_id) = draft.resource_id {
            if self.resources.find_by_id(resource_id)?.is_none() {
                return Err(ValidationErrors::single(FIELD_RESOURCE_ID, MSG_UNKNOWN_RESOURCE).into());
            }
        }
        Ok(())
    }

    fn attach_resource(&self, order: ProductionOrder) -> Result<OrderView, DomainError> {
        let resource = match order.resource_id {
            Some(id) => self.resources.find_by_id(id)?,
            None => None,
        };
        Ok(OrderView { order, resource })
    }
}
