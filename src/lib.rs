//! Lume Discover - profile form and match discovery for the Lume dating app
//!
//! The three screens (landing, profile form, results) are headless view
//! models driven by tokio; the HTTP layer renders them as pages and exposes
//! a small JSON API.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod views;

// Re-export commonly used types
pub use core::{target_gender, validate_draft, Toast, ValidationErrors};
pub use error::AppError;
pub use models::{Field, Gender, MatchProfile, ProfileDraft};
pub use services::{DirectoryClient, DirectoryError};
pub use views::{App, Navigation, RequestState, ResultsView, Route, ViewContext};
