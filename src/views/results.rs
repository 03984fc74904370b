use crate::core::{Scheduled, Toast, ToastState};
use crate::models::{Gender, MatchProfile, ProfileDraft};
use crate::services::DirectoryError;
use crate::views::{Navigation, Navigator, ViewContext};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Why the results view could not show matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    NoProfileData,
    MalformedResponse,
    NetworkFailure,
}

impl FetchFailure {
    pub fn reason(&self) -> &'static str {
        match self {
            FetchFailure::NoProfileData => "no profile data",
            FetchFailure::MalformedResponse => "malformed response",
            FetchFailure::NetworkFailure => "network failure",
        }
    }
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

impl From<&DirectoryError> for FetchFailure {
    fn from(error: &DirectoryError) -> Self {
        if error.is_network() {
            FetchFailure::NetworkFailure
        } else {
            FetchFailure::MalformedResponse
        }
    }
}

/// Which branch of the results screen renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Loading,
    Success(Vec<MatchProfile>),
    Error(FetchFailure),
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    /// Cards to render; empty unless the fetch succeeded
    pub fn profiles(&self) -> &[MatchProfile] {
        match self {
            RequestState::Success(profiles) => profiles,
            _ => &[],
        }
    }

    pub fn failure(&self) -> Option<FetchFailure> {
        match self {
            RequestState::Error(failure) => Some(*failure),
            _ => None,
        }
    }
}

/// Write side of the request state, shared with the fetch task
///
/// Only the first resolution after `Loading` lands, and nothing lands once
/// the view is unmounted.
#[derive(Debug)]
pub(crate) struct StateCell {
    tx: watch::Sender<RequestState>,
    mounted: Arc<AtomicBool>,
}

impl StateCell {
    pub(crate) fn resolve(&self, next: RequestState) -> bool {
        if !self.mounted.load(Ordering::SeqCst) {
            tracing::debug!("Results view unmounted, dropping fetch result");
            return false;
        }
        self.tx.send_if_modified(|state| {
            if !state.is_loading() {
                return false;
            }
            *state = next;
            true
        })
    }
}

/// Matches screen
///
/// Mounting with a profile starts exactly one directory request. Mounting
/// without one goes straight to the "no profile data" error.
#[derive(Debug)]
pub struct ResultsView {
    profile: Option<ProfileDraft>,
    target: Option<Gender>,
    state: watch::Receiver<RequestState>,
    mounted: Arc<AtomicBool>,
    fetch: Option<Scheduled>,
    toast: Toast,
    navigator: Navigator,
}

impl ResultsView {
    pub fn mount(payload: Option<ProfileDraft>, ctx: &ViewContext, navigator: Navigator) -> Self {
        let mounted = Arc::new(AtomicBool::new(true));
        let toast = Toast::new(ctx.toast_duration);

        let Some(profile) = payload else {
            tracing::info!("Results opened without profile data");
            let (_, state) = watch::channel(RequestState::Error(FetchFailure::NoProfileData));
            return Self {
                profile: None,
                target: None,
                state,
                mounted,
                fetch: None,
                toast,
                navigator,
            };
        };

        // Drafts only get here through validation; anything odd takes the tie-break
        let submitted = profile.parsed_gender().unwrap_or(Gender::Other);
        let target = ctx.target_gender(submitted);

        let (tx, state) = watch::channel(RequestState::Loading);
        let cell = StateCell {
            tx,
            mounted: mounted.clone(),
        };
        let directory = ctx.directory.clone();

        tracing::info!("Fetching {} matches for a {} profile", target, submitted);
        let fetch = Scheduled::spawn(async move {
            let next = match directory.fetch_matches(target).await {
                Ok(profiles) => RequestState::Success(profiles),
                Err(e) => {
                    tracing::error!("Failed to fetch matches: {}", e);
                    RequestState::Error(FetchFailure::from(&e))
                }
            };
            cell.resolve(next);
        });

        Self {
            profile: Some(profile),
            target: Some(target),
            state,
            mounted,
            fetch: Some(fetch),
            toast,
            navigator,
        }
    }

    pub fn profile(&self) -> Option<&ProfileDraft> {
        self.profile.as_ref()
    }

    pub fn target_gender(&self) -> Option<Gender> {
        self.target
    }

    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Wait until the request leaves `Loading`
    ///
    /// Returns the current state as is if the fetch was torn down first.
    pub async fn settled(&mut self) -> RequestState {
        let settled = match self.state.wait_for(|state| !state.is_loading()).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| self.state.borrow().clone())
    }

    /// Header line shown above the cards
    pub fn greeting(&self) -> Option<String> {
        self.profile.as_ref().map(|p| {
            format!("Hello {}! Here are some profiles you might like", p.surname.trim())
        })
    }

    /// "Send message" on the card at `index`
    pub fn send_message(&mut self, index: usize) -> Option<String> {
        let message = self.state.borrow().profiles().get(index)?.message_text();
        self.toast.show(message.clone());
        Some(message)
    }

    pub fn toast(&self) -> ToastState {
        self.toast.state()
    }

    /// "Try again" / "Edit my profile"
    pub fn retry(&self) {
        self.navigator.navigate(Navigation::Form);
    }

    pub fn back(&self) {
        self.navigator.navigate(Navigation::Landing);
    }

    /// Tear down: pending fetch and toast timer are cancelled
    pub fn unmount(&mut self) {
        if !self.mounted.swap(false, Ordering::SeqCst) {
            return;
        }
        if let Some(fetch) = self.fetch.take() {
            fetch.cancel();
        }
        self.toast.dismiss();
    }
}

impl Drop for ResultsView {
    fn drop(&mut self) {
        self.unmount();
    }
}
