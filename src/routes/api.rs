use crate::core::validate_draft;
use crate::error::AppError;
use crate::models::{
    message_for, ErrorResponse, Gender, HealthResponse, MatchesResponse, MessageResponse, ProfileDraft,
    SendMessageRequest, ValidateResponse,
};
use crate::routes::AppState;
use actix_web::{web, HttpResponse};
use validator::Validate;

/// Configure JSON API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/profile/validate", web::post().to(validate_profile))
        .route("/matches", web::post().to(find_matches))
        .route("/messages", web::post().to(send_message));
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Validate a profile draft without submitting it
///
/// POST /api/v1/profile/validate
async fn validate_profile(req: web::Json<ProfileDraft>) -> HttpResponse {
    let errors = validate_draft(&req);
    if errors.is_empty() {
        return HttpResponse::Ok().json(ValidateResponse { valid: true, errors });
    }

    tracing::debug!("Profile validation failed: {}", errors);
    HttpResponse::UnprocessableEntity().json(ValidateResponse { valid: false, errors })
}

/// Find matches for a profile draft
///
/// POST /api/v1/matches
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "surname": "string",
///   "age": "27",
///   "gender": "male|female|other",
///   "bio": "string"
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<ProfileDraft>,
) -> Result<HttpResponse, AppError> {
    let errors = validate_draft(&req);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let submitted = req.parsed_gender().unwrap_or(Gender::Other);
    let target = state.ctx.target_gender(submitted);

    tracing::info!("Finding {} matches for a {} profile", target, submitted);

    let matches = state.ctx.directory.fetch_matches(target).await?;

    tracing::info!("Returning {} matches", matches.len());

    Ok(HttpResponse::Ok().json(MatchesResponse {
        target_gender: target,
        total_results: matches.len(),
        matches,
    }))
}

/// Toast payload for a card's "send message" button
///
/// POST /api/v1/messages
async fn send_message(
    state: web::Data<AppState>,
    req: web::Json<SendMessageRequest>,
) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for send_message request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    HttpResponse::Ok().json(MessageResponse {
        message: message_for(req.first_name.trim()),
        visible_for_ms: state.ctx.toast_duration.as_millis() as u64,
    })
}
