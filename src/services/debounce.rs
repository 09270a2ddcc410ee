//! Cancellable trailing-edge debounce timer.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

/// Runs only the last scheduled action once `delay` passes without a newer
/// one being scheduled.
///
/// Timers run on the ambient tokio runtime. After [`Debouncer::shutdown`]
/// (or drop) no pending or future action fires.
pub struct Debouncer {
    delay: Duration,
    shutdown: CancellationToken,
    pending: Mutex<Option<CancellationToken>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            shutdown: CancellationToken::new(),
            pending: Mutex::new(None),
        }
    }

    /// Restarts the timer with `action` as the only pending action.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if self.shutdown.is_cancelled() {
            log::debug!("Debouncer is shut down, dropping scheduled action");
            return;
        }

        let token = self.shutdown.child_token();
        if let Some(previous) = self.pending.lock().replace(token.clone()) {
            previous.cancel();
        }

        let delay = self.delay;
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => action.await,
            }
        });
    }

    /// Drops the pending action, if any.
    pub fn cancel(&self) {
        if let Some(pending) = self.pending.lock().take() {
            pending.cancel();
        }
    }

    /// Cancels the pending action and refuses new ones.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
        self.pending.lock().take();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
