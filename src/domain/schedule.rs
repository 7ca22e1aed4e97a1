//! Scheduling-conflict detection.
//!
//! Two windows conflict when their half-open intervals `[start, end)`
//! intersect on the same resource. The check is advisory: write paths do not
//! repeat it, so concurrent submissions can still persist overlapping
//! schedules.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::order::{OrderDraft, OrderStatus, ProductionOrder};

/// The window a client proposes for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleCandidate {
    /// The order being edited; never reported as conflicting with itself.
    pub order_id: Option<Uuid>,
    pub resource_id: Option<Uuid>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl ScheduleCandidate {
    pub fn from_draft(order_id: Option<Uuid>, draft: &OrderDraft) -> Self {
        Self {
            order_id,
            resource_id: draft.resource_id,
            start_time: draft.start_time,
            end_time: draft.end_time,
        }
    }
}

/// Half-open interval intersection.
pub fn overlaps(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    other_start: DateTime<Utc>,
    other_end: DateTime<Utc>,
) -> bool {
    start < other_end && end > other_start
}

/// Scheduled orders on the candidate's resource whose window intersects the
/// candidate's. A candidate lacking a resource or either time conflicts with
/// nothing.
pub fn find_conflicts<'a>(
    candidate: &ScheduleCandidate,
    existing: &'a [ProductionOrder],
) -> Vec<&'a ProductionOrder> {
    let (Some(resource_id), Some(start), Some(end)) = (
        candidate.resource_id,
        candidate.start_time,
        candidate.end_time,
    ) else {
        return Vec::new();
    };

    existing
        .iter()
        .filter(|order| order.status == OrderStatus::Scheduled)
        .filter(|order| order.resource_id == Some(resource_id))
        .filter(|order| Some(order.id) != candidate.order_id)
        .filter(|order| {
            order
                .time_window()
                .is_some_and(|(other_start, other_end)| overlaps(start, end, other_start, other_end))
        })
        .collect()
}

pub fn count_conflicts(candidate: &ScheduleCandidate, existing: &[ProductionOrder]) -> usize {
    find_conflicts(candidate, existing).len()
}
