use crate::core::schedule::Scheduled;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Default time a toast stays on screen
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// What the toast currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastState {
    pub visible: bool,
    pub message: String,
}

/// Transient, auto-dismissing notification
///
/// Showing a new message while one is visible replaces it and restarts the
/// countdown; nothing is queued. The pending hide is owned by the toast and
/// is cancelled when the toast is dropped.
#[derive(Debug)]
pub struct Toast {
    duration: Duration,
    state: Arc<watch::Sender<ToastState>>,
    generation: Arc<AtomicU64>,
    hide: Option<Scheduled>,
}

impl Toast {
    pub fn new(duration: Duration) -> Self {
        let (state, _) = watch::channel(ToastState::default());
        Self {
            duration,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            hide: None,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Show `message` now and hide it once the duration elapses
    pub fn show(&mut self, message: impl Into<String>) {
        let message = message.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::debug!("Showing toast (generation {}): {}", generation, message);
        self.state.send_replace(ToastState {
            visible: true,
            message,
        });

        let state = self.state.clone();
        let current = self.generation.clone();
        // Replacing the handle aborts the previous countdown
        self.hide = Some(Scheduled::after(self.duration, move || {
            // A newer show() owns the toast now
            if current.load(Ordering::SeqCst) != generation {
                return;
            }
            state.send_modify(|s| s.visible = false);
        }));
    }

    /// Hide immediately and drop the pending countdown
    pub fn dismiss(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.hide = None;
        self.state.send_modify(|s| s.visible = false);
    }

    pub fn state(&self) -> ToastState {
        self.state.borrow().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    /// The message, while the toast is on screen
    pub fn message(&self) -> Option<String> {
        let state = self.state.borrow();
        state.visible.then(|| state.message.clone())
    }

    pub fn subscribe(&self) -> watch::Receiver<ToastState> {
        self.state.subscribe()
    }
}

impl Default for Toast {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}
