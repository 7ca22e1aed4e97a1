use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ResourceService;
use crate::domain::resource::{NewResource, Resource, ResourceChanges, ResourceStatus};
use crate::domain::validation::{ValidationErrors, FIELD_STATUS};
use crate::errors::AppError;

use super::{non_empty, require_id, DeleteRequest, MessageResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateResourceRequest {
    #[serde(default)]
    pub name: String,
    /// One of Available, Busy, Maintenance. Defaults to Available.
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateResourceRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: Uuid,
    pub name: String,
    pub status: ResourceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Resource> for ResourceResponse {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id,
            name: r.name,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListResourcesParams {
    pub status: Option<String>,
}

pub(crate) fn parse_resource_status(
    raw: Option<String>,
) -> Result<Option<ResourceStatus>, AppError> {
    match non_empty(raw) {
        None => Ok(None),
        Some(raw) => raw.parse::<ResourceStatus>().map(Some).map_err(|_| {
            ValidationErrors::single(
                FIELD_STATUS,
                format!(
                    "Invalid resource status '{raw}'. Expected one of: Available, Busy, Maintenance."
                ),
            )
            .into()
        }),
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/resources
#[utoipa::path(
    get,
    path = "/api/resources",
    params(
        ("status" = Option<String>, Query, description = "Only resources in this status"),
    ),
    responses(
        (status = 200, description = "Resources ordered by name", body = [ResourceResponse]),
        (status = 400, description = "Unknown status"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "resources"
)]
pub async fn list_resources(
    service: web::Data<ResourceService>,
    query: web::Query<ListResourcesParams>,
) -> Result<HttpResponse, AppError> {
    let status = parse_resource_status(query.into_inner().status)?;

    let resources = web::block(move || service.list_resources(status)).await??;

    let body: Vec<ResourceResponse> = resources.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/resources/{id}
#[utoipa::path(
    get,
    path = "/api/resources/{id}",
    params(
        ("id" = Uuid, Path, description = "Resource UUID"),
    ),
    responses(
        (status = 200, description = "Resource found", body = ResourceResponse),
        (status = 404, description = "Resource not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "resources"
)]
pub async fn get_resource(
    service: web::Data<ResourceService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let resource = web::block(move || service.get_resource(id)).await??;

    Ok(HttpResponse::Ok().json(ResourceResponse::from(resource)))
}

/// POST /api/resources
#[utoipa::path(
    post,
    path = "/api/resources",
    request_body = CreateResourceRequest,
    responses(
        (status = 201, description = "Resource created", body = ResourceResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Resource name already exists"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "resources"
)]
pub async fn create_resource(
    service: web::Data<ResourceService>,
    body: web::Json<CreateResourceRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let new_resource = NewResource {
        name: body.name,
        status: parse_resource_status(body.status)?.unwrap_or_default(),
    };

    let created = web::block(move || service.create_resource(new_resource)).await??;

    Ok(HttpResponse::Created().json(ResourceResponse::from(created)))
}

/// PUT /api/resources
///
/// Partial update: only the fields present in the body change.
#[utoipa::path(
    put,
    path = "/api/resources",
    request_body = UpdateResourceRequest,
    responses(
        (status = 200, description = "Resource updated", body = ResourceResponse),
        (status = 400, description = "Missing id or invalid input"),
        (status = 404, description = "Resource not found"),
        (status = 409, description = "Resource name already exists"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "resources"
)]
pub async fn update_resource(
    service: web::Data<ResourceService>,
    body: web::Json<UpdateResourceRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let id = require_id(body.id.as_deref(), "Resource ID is required")?;
    let changes = ResourceChanges {
        name: body.name,
        status: parse_resource_status(body.status)?,
    };

    let updated = web::block(move || service.update_resource(id, changes)).await??;

    Ok(HttpResponse::Ok().json(ResourceResponse::from(updated)))
}

/// DELETE /api/resources
///
/// Orders assigned to the resource keep existing with no resource.
#[utoipa::path(
    delete,
    path = "/api/resources",
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Resource deleted", body = MessageResponse),
        (status = 400, description = "Missing id"),
        (status = 404, description = "Resource not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "resources"
)]
pub async fn delete_resource(
    service: web::Data<ResourceService>,
    body: web::Json<DeleteRequest>,
) -> Result<HttpResponse, AppError> {
    let id = require_id(body.id.as_deref(), "Resource ID is required")?;

    web::block(move || service.delete_resource(id)).await??;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Resource deleted".to_string(),
    }))
}
