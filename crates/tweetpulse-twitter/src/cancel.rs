//! Cooperative cancellation for long retry waits.
//!
//! A 15-minute rate-limit backoff must never pin down a caller that has
//! given up on the run. [`CancelHandle::cancel`] flips a watch channel that
//! the retry loop races against its backoff sleep; a cancelled fetch reports
//! a distinct `Cancelled` outcome instead of partial data.

use tokio::sync::watch;

/// Creates a connected cancel handle/token pair.
#[must_use]
pub fn cancellation() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

/// Owning side; firing it wakes every cloned [`CancelToken`].
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Cheaply cloneable token observed by retry loops.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// A token that can never fire, for non-interactive callers.
    #[must_use]
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        Self { rx }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once the handle fires. Pends forever if the handle was
    /// dropped without cancelling (or the token came from [`Self::never`]).
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}
