// Core behaviour exports
pub mod gender;
pub mod schedule;
pub mod toast;
pub mod validation;

pub use gender::target_gender;
pub use schedule::Scheduled;
pub use toast::{Toast, ToastState, DEFAULT_TOAST_DURATION};
pub use validation::{validate_draft, ValidationErrors, MIN_AGE};
