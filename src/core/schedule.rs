use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A unit of deferred work owned by a view
///
/// The task is aborted when the handle is cancelled or dropped, so work
/// scheduled by a view never runs against a torn-down view.
#[derive(Debug)]
pub struct Scheduled {
    handle: JoinHandle<()>,
}

impl Scheduled {
    /// Run `f` once `delay` has elapsed
    pub fn after<F>(delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        })
    }

    /// Drive a future to completion in the background
    pub fn spawn<Fut>(future: Fut) -> Self
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Scheduled {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
