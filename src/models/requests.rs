use serde::{Deserialize, Serialize};
use validator::Validate;

/// "Send message" from a match card
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 100))]
    #[serde(alias = "first_name", rename = "firstName")]
    pub first_name: String,
}
