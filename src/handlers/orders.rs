use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::{OrderService, SubmissionReport};
use crate::domain::order::{
    OrderDraft, OrderQuery, OrderSortField, OrderStatus, OrderView, ProductionOrder,
    SortDirection,
};
use crate::domain::validation::{ValidationErrors, FIELD_RESOURCE_ID, FIELD_STATUS};
use crate::errors::AppError;

use super::resources::ResourceResponse;
use super::{non_empty, require_id, DeleteRequest, MessageResponse};

const MSG_ORDER_ID_REQUIRED: &str = "Order ID is required";

// ── Request / response DTOs ──────────────────────────────────────────────────

/// The editable order fields, as sent by the order form.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default)]
    pub order_name: String,
    /// One of Pending, Scheduled, InProgress, Completed, Cancelled. Defaults to Pending.
    pub status: Option<String>,
    /// Empty string means no resource.
    pub resource_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

impl OrderRequest {
    /// Turn the raw request into a draft, reporting unparseable fields the
    /// same way rule violations are reported.
    fn into_draft(self) -> Result<OrderDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let status = match non_empty(self.status) {
            None => OrderStatus::default(),
            Some(raw) => raw.parse::<OrderStatus>().unwrap_or_else(|_| {
                errors.add(
                    FIELD_STATUS,
                    format!(
                        "Invalid order status '{raw}'. Expected one of: Pending, Scheduled, InProgress, Completed, Cancelled."
                    ),
                );
                OrderStatus::default()
            }),
        };

        let resource_id = match non_empty(self.resource_id) {
            None => None,
            Some(raw) => match Uuid::parse_str(raw.trim()) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add(FIELD_RESOURCE_ID, format!("'{raw}' is not a valid resource id"));
                    None
                }
            },
        };

        errors.into_result()?;
        Ok(OrderDraft {
            order_name: self.order_name,
            status,
            resource_id,
            start_time: self.start_time,
            end_time: self.end_time,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub id: Option<String>,
    #[serde(flatten)]
    pub order: OrderRequest,
}

/// A prospective submission. `id` is set when an existing order is being edited.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckOrderRequest {
    pub id: Option<String>,
    #[serde(flatten)]
    pub order: OrderRequest,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_name: String,
    pub status: OrderStatus,
    pub resource_id: Option<Uuid>,
    pub resource: Option<ResourceResponse>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderView> for OrderResponse {
    fn from(view: OrderView) -> Self {
        let OrderView { order, resource } = view;
        Self {
            id: order.id,
            order_name: order.order_name,
            status: order.status,
            resource_id: order.resource_id,
            resource: resource.map(ResourceResponse::from),
            start_time: order.start_time,
            end_time: order.end_time,
            notes: order.notes,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListOrdersParams {
    /// Comma-separated statuses; empty or absent means all.
    pub status: Option<String>,
    /// orderName, createdAt or startTime.
    pub sort: Option<String>,
    /// asc or desc.
    pub direction: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListOrdersParams {
    fn into_query(self) -> Result<OrderQuery, AppError> {
        let mut errors = ValidationErrors::new();
        let mut query = OrderQuery::default();

        for raw in self.status.iter().flat_map(|s| s.split(',')) {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            match raw.parse::<OrderStatus>() {
                Ok(status) if !query.statuses.contains(&status) => query.statuses.push(status),
                Ok(_) => {}
                Err(_) => errors.add(FIELD_STATUS, format!("Unknown order status '{raw}'.")),
            }
        }
        if let Some(raw) = non_empty(self.sort) {
            match raw.parse::<OrderSortField>() {
                Ok(sort) => query.sort = sort,
                Err(msg) => errors.add("sort", msg),
            }
        }
        if let Some(raw) = non_empty(self.direction) {
            match raw.parse::<SortDirection>() {
                Ok(direction) => query.direction = direction,
                Err(msg) => errors.add("direction", msg),
            }
        }
        if let Some(page) = self.page {
            query.page = page;
        }
        if let Some(limit) = self.limit {
            query.limit = limit;
        }

        errors.into_result()?;
        Ok(query.normalized())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConflictResponse {
    pub id: Uuid,
    pub order_name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl From<ProductionOrder> for ConflictResponse {
    fn from(order: ProductionOrder) -> Self {
        Self {
            id: order.id,
            order_name: order.order_name,
            start_time: order.start_time,
            end_time: order.end_time,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckOrderResponse {
    pub valid: bool,
    /// Field name to messages.
    #[schema(value_type = Object)]
    pub errors: ValidationErrors,
    pub conflicts: Vec<ConflictResponse>,
    pub conflict_count: usize,
}

impl From<SubmissionReport> for CheckOrderResponse {
    fn from(report: SubmissionReport) -> Self {
        let valid = report.is_valid();
        let conflict_count = report.conflicts.len();
        Self {
            valid,
            errors: report.errors,
            conflicts: report.conflicts.into_iter().map(Into::into).collect(),
            conflict_count,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    params(ListOrdersParams),
    responses(
        (status = 200, description = "One page of orders", body = ListOrdersResponse),
        (status = 400, description = "Unknown status, sort field or direction"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<OrderService>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner().into_query()?;
    let (page, limit) = (query.page, query.limit);

    let result = web::block(move || service.list_orders(query)).await??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result.items.into_iter().map(Into::into).collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<OrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let view = web::block(move || service.get_order(id)).await??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(view)))
}

/// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = OrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid input"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<OrderService>,
    body: web::Json<OrderRequest>,
) -> Result<HttpResponse, AppError> {
    let draft = body.into_inner().into_draft()?;

    let view = web::block(move || service.create_order(draft)).await??;

    Ok(HttpResponse::Created().json(OrderResponse::from(view)))
}

/// PUT /api/orders
///
/// Replaces every editable field of the order named by `id`.
#[utoipa::path(
    put,
    path = "/api/orders",
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Missing id or invalid input"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_order(
    service: web::Data<OrderService>,
    body: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let id = require_id(body.id.as_deref(), MSG_ORDER_ID_REQUIRED)?;
    let draft = body.order.into_draft()?;

    let view = web::block(move || service.update_order(id, draft)).await??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(view)))
}

/// DELETE /api/orders
#[utoipa::path(
    delete,
    path = "/api/orders",
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Order deleted", body = MessageResponse),
        (status = 400, description = "Missing id"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<OrderService>,
    body: web::Json<DeleteRequest>,
) -> Result<HttpResponse, AppError> {
    let id = require_id(body.id.as_deref(), MSG_ORDER_ID_REQUIRED)?;

    web::block(move || service.delete_order(id)).await??;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Order deleted".to_string(),
    }))
}

/// POST /api/orders/check
///
/// Dry run of a submission: field errors, resource availability and overlap
/// with other Scheduled orders on the same resource. Nothing is written.
#[utoipa::path(
    post,
    path = "/api/orders/check",
    request_body = CheckOrderRequest,
    responses(
        (status = 200, description = "Check result", body = CheckOrderResponse),
        (status = 400, description = "Unparseable input"),
        (status = 404, description = "Edited order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn check_order(
    service: web::Data<OrderService>,
    body: web::Json<CheckOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let editing = match body.id.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(require_id(Some(raw), MSG_ORDER_ID_REQUIRED)?),
    };
    let draft = body.order.into_draft()?;

    let report = web::block(move || service.check_submission(editing, &draft)).await??;

    Ok(HttpResponse::Ok().json(CheckOrderResponse::from(report)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_resource_id_means_unassigned() {
        let draft = OrderRequest {
            order_name: "Batch".to_string(),
            resource_id: Some(String::new()),
            ..OrderRequest::default()
        }
        .into_draft()
        .unwrap();
        assert_eq!(draft.resource_id, None);
        assert_eq!(draft.status, OrderStatus::Pending);
    }

    #[test]
    fn unparseable_fields_are_reported_per_field() {
        let errors = OrderRequest {
            order_name: "Batch".to_string(),
            status: Some("Done".to_string()),
            resource_id: Some("machine-1".to_string()),
            ..OrderRequest::default()
        }
        .into_draft()
        .unwrap_err();
        assert!(errors.field(FIELD_STATUS).is_some());
        assert!(errors.field(FIELD_RESOURCE_ID).is_some());
    }

    #[test]
    fn status_filter_accepts_comma_separated_values() {
        let query = ListOrdersParams {
            status: Some("Scheduled, Pending,,Scheduled".to_string()),
            sort: Some("startTime".to_string()),
            direction: Some("asc".to_string()),
            page: None,
            limit: Some(500),
        }
        .into_query()
        .unwrap();
        assert_eq!(
            query.statuses,
            vec![OrderStatus::Scheduled, OrderStatus::Pending]
        );
        assert_eq!(query.sort, OrderSortField::StartTime);
        assert_eq!(query.direction, SortDirection::Asc);
        assert_eq!(query.limit, OrderQuery::MAX_LIMIT);
    }

    #[test]
    fn unknown_filter_status_is_rejected() {
        let err = ListOrdersParams {
            status: Some("Archived".to_string()),
            sort: None,
            direction: None,
            page: None,
            limit: None,
        }
        .into_query()
        .unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}
