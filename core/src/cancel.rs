//! Cooperative cancellation for in-flight fetches.
//!
//! [`CancelHandle`] is the capability handed to the store through the
//! request notification: any clone can cancel the exchange. [`CancelSignal`]
//! is the observing side: the transport races the exchange against it and
//! the abort listener waits on it.
//!
//! Built on [`tokio::sync::watch`], so cancelling flips a single boolean
//! edge that every observer sees.

use tokio::sync::watch;

/// Capability to cancel one in-flight fetch.
///
/// Created per invocation by the environment (see
/// [`FetchEnvironment::cancel_handle`]) and passed to the request
/// notification constructor, so the store can keep it in state and cancel
/// later. Clones share the underlying channel: cancelling any clone cancels
/// the exchange.
///
/// [`FetchEnvironment::cancel_handle`]: crate::environment::FetchEnvironment::cancel_handle
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Create a new, un-cancelled handle.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Derive the observing side of this handle.
    #[must_use]
    pub fn signal(&self) -> CancelSignal {
        CancelSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Cancel the exchange this handle belongs to.
    ///
    /// Idempotent: cancelling an already-cancelled handle has no further
    /// effect.
    pub fn cancel(&self) {
        // send_replace delivers even when no receiver exists yet.
        self.tx.send_replace(true);
    }

    /// Whether cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer for a [`CancelHandle`].
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    /// Whether cancellation has been signalled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve when cancellation is signalled, and only then.
    ///
    /// If every [`CancelHandle`] is dropped without cancelling, this future
    /// never resolves. Use it to race an operation against cancellation,
    /// where the operation completing makes the race moot.
    pub async fn cancelled(mut self) {
        if self.rx.wait_for(|cancelled| *cancelled).await.is_err() {
            // All handles dropped while un-cancelled: stay pending.
            std::future::pending::<()>().await;
        }
    }

    /// Wait for the signal to settle either way.
    ///
    /// Returns `true` when cancellation was signalled, `false` once every
    /// [`CancelHandle`] has been dropped without cancelling.
    pub async fn wait(mut self) -> bool {
        self.rx.wait_for(|cancelled| *cancelled).await.is_ok()
    }
}
