use serde::{Deserialize, Serialize};
use crate::core::ValidationErrors;
use crate::models::domain::{Gender, MatchProfile};

/// Response for the profile validation endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(skip_serializing_if = "ValidationErrors::is_empty")]
    pub errors: ValidationErrors,
}

/// Response for the matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    #[serde(rename = "targetGender")]
    pub target_gender: Gender,
    pub matches: Vec<MatchProfile>,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

/// Toast payload for a sent message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(rename = "visibleForMs")]
    pub visible_for_ms: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
