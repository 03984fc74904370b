use crate::core::ValidationErrors;
use crate::models::ErrorResponse;
use crate::services::DirectoryError;
use crate::views::FetchFailure;
use actix_web::{error, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Errors surfaced by the HTTP layer
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Navigation state missing: no profile data")]
    NavigationStateMissing,

    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_failed",
            AppError::NavigationStateMissing => "no_profile_data",
            AppError::Directory(e) => match FetchFailure::from(e) {
                FetchFailure::NetworkFailure => "network_failure",
                _ => "malformed_response",
            },
            AppError::Template(_) => "template_error",
            AppError::Config(_) => "config_error",
        }
    }
}

impl error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NavigationStateMissing => StatusCode::BAD_REQUEST,
            AppError::Directory(_) => StatusCode::BAD_GATEWAY,
            AppError::Template(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let message = match self {
            AppError::Directory(e) => FetchFailure::from(e).reason().to_string(),
            // Template internals are not for the client
            AppError::Template(_) => "Failed to render page".to_string(),
            other => other.to_string(),
        };

        HttpResponse::build(status).json(ErrorResponse {
            error: self.code().to_string(),
            message,
            status_code: status.as_u16(),
        })
    }
}

/// JSON body for a malformed request payload
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    });
    error::InternalError::from_response(err, response).into()
}

/// JSON body for a malformed query string
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    });
    error::InternalError::from_response(err, response).into()
}
