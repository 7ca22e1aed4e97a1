use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{OrderDraft, OrderStatus, ProductionOrder};
use crate::domain::resource::{Resource, ResourceChanges, ResourceStatus};
use crate::schema::{production_orders, resources};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = resources)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ResourceRow {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = resources)]
pub struct NewResourceRow {
    pub id: Uuid,
    pub name: String,
    pub status: String,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = resources)]
pub struct ResourceChangeset {
    pub name: Option<String>,
    pub status: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResourceChanges> for ResourceChangeset {
    fn from(changes: ResourceChanges) -> Self {
        Self {
            name: changes.name,
            status: changes.status.map(|s| s.as_str().to_string()),
            updated_at: Utc::now(),
        }
    }
}

impl TryFrom<ResourceRow> for Resource {
    type Error = DomainError;

    fn try_from(row: ResourceRow) -> Result<Self, Self::Error> {
        Ok(Resource {
            id: row.id,
            status: row
                .status
                .parse::<ResourceStatus>()
                .map_err(|e| DomainError::Internal(format!("resource {}: {e}", row.id)))?,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = production_orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub order_name: String,
    pub status: String,
    pub resource_id: Option<Uuid>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = production_orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub order_name: String,
    pub status: String,
    pub resource_id: Option<Uuid>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl From<OrderDraft> for NewOrderRow {
    fn from(draft: OrderDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_name: draft.order_name,
            status: draft.status.as_str().to_string(),
            resource_id: draft.resource_id,
            start_time: draft.start_time,
            end_time: draft.end_time,
            notes: draft.notes,
        }
    }
}

/// Full-record replacement: `None` fields are written as NULL.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = production_orders)]
#[diesel(treat_none_as_null = true)]
pub struct OrderChangeset {
    pub order_name: String,
    pub status: String,
    pub resource_id: Option<Uuid>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderDraft> for OrderChangeset {
    fn from(draft: OrderDraft) -> Self {
        Self {
            order_name: draft.order_name,
            status: draft.status.as_str().to_string(),
            resource_id: draft.resource_id,
            start_time: draft.start_time,
            end_time: draft.end_time,
            notes: draft.notes,
            updated_at: Utc::now(),
        }
    }
}

impl TryFrom<OrderRow> for ProductionOrder {
    type Error = DomainError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(ProductionOrder {
            id: row.id,
            status: row
                .status
                .parse::<OrderStatus>()
                .map_err(|e| DomainError::Internal(format!("order {}: {e}", row.id)))?,
            order_name: row.order_name,
            resource_id: row.resource_id,
            start_time: row.start_time,
            end_time: row.end_time,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
