//! Headless view models for the three screens
//!
//! Each view owns its transient state and any scheduled work; dropping a view
//! tears that work down. Views talk to each other only through
//! [`Navigation`] values sent on a [`Navigator`].

pub mod app;
pub mod form;
pub mod landing;
pub mod results;

pub use app::{App, Screen};
pub use form::{FormView, SubmitOutcome};
pub use landing::LandingView;
pub use results::{FetchFailure, RequestState, ResultsView};

use crate::core::{target_gender, DEFAULT_TOAST_DURATION};
use crate::models::{Gender, ProfileDraft};
use crate::services::DirectoryClient;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

/// Default artificial delay between a valid submit and navigation
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1000);

/// Addressable screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Form,
    Results,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Form => "/form",
            Route::Results => "/result",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        match path.trim_end_matches('/') {
            "" => Some(Route::Landing),
            "/form" => Some(Route::Form),
            "/result" => Some(Route::Results),
            _ => None,
        }
    }
}

/// A transition request, carrying the one-shot payload for the results view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Landing,
    Form,
    Results(Option<ProfileDraft>),
}

impl Navigation {
    pub fn route(&self) -> Route {
        match self {
            Navigation::Landing => Route::Landing,
            Navigation::Form => Route::Form,
            Navigation::Results(_) => Route::Results,
        }
    }

    /// Entering a screen by its path; nothing rides along
    pub fn to(route: Route) -> Self {
        match route {
            Route::Landing => Navigation::Landing,
            Route::Form => Navigation::Form,
            Route::Results => Navigation::Results(None),
        }
    }
}

/// Sending half of the navigation channel handed to every view
#[derive(Debug, Clone)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<Navigation>,
}

impl Navigator {
    pub fn channel() -> (Navigator, mpsc::UnboundedReceiver<Navigation>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Navigator { tx }, rx)
    }

    pub fn navigate(&self, navigation: Navigation) {
        tracing::debug!("Navigating to {}", navigation.route().path());
        if self.tx.send(navigation).is_err() {
            tracing::debug!("Navigation dropped, router is gone");
        }
    }
}

/// Collaborators and timings shared by the views of one app instance
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub directory: Arc<DirectoryClient>,
    pub submit_delay: Duration,
    pub toast_duration: Duration,
    rng: Arc<Mutex<StdRng>>,
}

impl ViewContext {
    pub fn new(directory: Arc<DirectoryClient>) -> Self {
        Self {
            directory,
            submit_delay: DEFAULT_SUBMIT_DELAY,
            toast_duration: DEFAULT_TOAST_DURATION,
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        }
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration = duration;
        self
    }

    /// Make the `other` tie-break reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    pub fn target_gender(&self, submitted: Gender) -> Gender {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        target_gender(submitted, &mut *rng)
    }
}
