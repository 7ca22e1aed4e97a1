pub mod dashboard;
pub mod orders;
pub mod resources;

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::AppError;

/// Body of `DELETE` requests, which identify the record in the body.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteRequest {
    pub id: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Parse the `id` carried in a PUT/DELETE body. Missing or empty ids get
/// `missing` as the error message.
pub(crate) fn require_id(raw: Option<&str>, missing: &str) -> Result<Uuid, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Err(AppError::bad_request(missing)),
        Some(id) => Uuid::parse_str(id)
            .map_err(|_| AppError::invalid_input(format!("'{id}' is not a valid id"))),
    }
}

/// Treat an empty string like an absent value, as form clients send `""`
/// for an unselected option.
pub(crate) fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.trim().is_empty())
}

pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req: &HttpRequest| AppError::invalid_input(err.to_string()).into())
}

pub(crate) fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req: &HttpRequest| AppError::invalid_input(err.to_string()).into())
}

pub(crate) fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req: &HttpRequest| AppError::invalid_input(err.to_string()).into())
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}
