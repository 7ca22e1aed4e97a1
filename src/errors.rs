use actix_web::HttpResponse;
use serde_json::Value;
use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::errors::DomainError;
use crate::domain::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest {
        message: String,
        details: Option<Value>,
    },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub const INVALID_INPUT: &'static str = "Invalid input";

    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            details: None,
        }
    }

    /// A malformed body, query string or path segment.
    pub fn invalid_input(details: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: Self::INVALID_INPUT.to_string(),
            details: Some(Value::String(details.into())),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(entity) => AppError::NotFound(format!("{entity} not found")),
            DomainError::Validation(errors) => AppError::BadRequest {
                message: AppError::INVALID_INPUT.to_string(),
                details: serde_json::to_value(&errors).ok(),
            },
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation(errors).into()
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest { message, details } => {
                let mut body = serde_json::json!({ "error": message });
                if let Some(details) = details {
                    body["details"] = details.clone();
                }
                HttpResponse::BadRequest().json(body)
            }
            AppError::NotFound(msg) => {
                HttpResponse::NotFound().json(serde_json::json!({ "error": msg }))
            }
            AppError::Conflict(msg) => {
                HttpResponse::Conflict().json(serde_json::json!({ "error": msg }))
            }
            AppError::Internal(msg) => {
                log::error!("request failed: {msg}");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

/// Failures that stop the process before the server starts listening.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create database connection pool: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("failed to run database migrations: {0}")]
    Migration(String),

    #[error("failed to seed demo data: {0}")]
    Seed(#[from] DomainError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::FIELD_ORDER_NAME;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    async fn body_json(err: &AppError) -> Value {
        let bytes = to_bytes(err.error_response().into_body())
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[test]
    fn not_found_returns_404() {
        let resp = AppError::NotFound("Order not found".to_string()).error_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(err.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn conflict_returns_409() {
        let err = AppError::Conflict("Resource name already exists".to_string());
        assert_eq!(err.error_response().status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn internal_error_hides_the_cause() {
        let body = body_json(&AppError::Internal("connection refused".to_string())).await;
        assert_eq!(body, serde_json::json!({ "error": "Internal server error" }));
    }

    #[actix_web::test]
    async fn bad_request_without_details_has_only_error() {
        let body = body_json(&AppError::bad_request("Order ID is required")).await;
        assert_eq!(body, serde_json::json!({ "error": "Order ID is required" }));
    }

    #[actix_web::test]
    async fn domain_validation_maps_to_400_with_field_details() {
        let app_err: AppError =
            DomainError::Validation(ValidationErrors::single(FIELD_ORDER_NAME, "too short"))
                .into();
        assert_eq!(app_err.error_response().status(), StatusCode::BAD_REQUEST);
        let body = body_json(&app_err).await;
        assert_eq!(
            body,
            serde_json::json!({
                "error": "Invalid input",
                "details": { "orderName": ["too short"] }
            })
        );
    }

    #[test]
    fn domain_not_found_maps_to_app_not_found() {
        let app_err: AppError = DomainError::NotFound("Order").into();
        assert!(matches!(app_err, AppError::NotFound(ref msg) if msg == "Order not found"));
    }

    #[test]
    fn domain_duplicate_maps_to_conflict() {
        let app_err: AppError = DomainError::Duplicate("taken".to_string()).into();
        assert!(matches!(app_err, AppError::Conflict(_)));
    }

    #[test]
    fn domain_internal_maps_to_app_internal() {
        let app_err: AppError = DomainError::Internal("oops".to_string()).into();
        assert!(matches!(app_err, AppError::Internal(_)));
    }

    #[test]
    fn internal_error_display() {
        assert_eq!(
            AppError::Internal("msg".to_string()).to_string(),
            "Internal error: msg"
        );
    }
}
