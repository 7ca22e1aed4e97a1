use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::DashboardService;
use crate::domain::dashboard::{DashboardSummary, ResourceUtilization, StatusCount};
use crate::domain::order::OrderStatus;
use crate::domain::resource::ResourceStatus;
use crate::errors::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusCountResponse {
    pub status: OrderStatus,
    pub count: usize,
}

impl From<StatusCount> for StatusCountResponse {
    fn from(entry: StatusCount) -> Self {
        Self {
            status: entry.status,
            count: entry.count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUtilizationResponse {
    pub resource_id: Uuid,
    pub name: String,
    pub status: ResourceStatus,
    pub scheduled_orders: usize,
}

impl From<ResourceUtilization> for ResourceUtilizationResponse {
    fn from(entry: ResourceUtilization) -> Self {
        Self {
            resource_id: entry.resource_id,
            name: entry.name,
            status: entry.status,
            scheduled_orders: entry.scheduled_orders,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_orders: usize,
    pub scheduled_orders: usize,
    pub pending_orders: usize,
    pub available_resources: usize,
    pub total_resources: usize,
    pub orders_by_status: Vec<StatusCountResponse>,
    pub resource_utilization: Vec<ResourceUtilizationResponse>,
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            total_orders: summary.total_orders,
            scheduled_orders: summary.scheduled_orders,
            pending_orders: summary.pending_orders,
            available_resources: summary.available_resources,
            total_resources: summary.total_resources,
            orders_by_status: summary.orders_by_status.into_iter().map(Into::into).collect(),
            resource_utilization: summary
                .resource_utilization
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

/// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Order and resource counts", body = DashboardResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "dashboard"
)]
pub async fn get_dashboard(
    service: web::Data<DashboardService>,
) -> Result<HttpResponse, AppError> {
    let summary = web::block(move || service.summary()).await??;

    Ok(HttpResponse::Ok().json(DashboardResponse::from(summary)))
}
