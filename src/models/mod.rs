// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{message_for, Field, Gender, MatchProfile, ProfileDraft, BIO_MAX_CHARS};
pub use requests::SendMessageRequest;
pub use responses::{ErrorResponse, HealthResponse, MatchesResponse, MessageResponse, ValidateResponse};
