//! Cancellation of in-flight waits.

use std::future::pending;
use tokio::sync::watch;

/// Owner side of a cancellation signal.
///
/// Hands out [`CancelToken`]s; calling [`Cancellation::cancel`] wakes every
/// token, including ones created afterwards.
#[derive(Debug, Clone)]
pub struct Cancellation {
    tx: std::sync::Arc<watch::Sender<bool>>,
}

impl Cancellation {
    /// Create a new, not yet cancelled, signal.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: std::sync::Arc::new(tx) }
    }

    /// Get a token observing this signal.
    pub fn token(&self) -> CancelToken {
        CancelToken { rx: self.tx.subscribe() }
    }

    /// Cancel every wait holding a token.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Whether [`Cancellation::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// Cancel when the process receives Ctrl-C.
    pub fn cancel_on_ctrl_c(&self) {
        let this = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Interrupt received, cancelling");
                this.cancel();
            }
        });
    }
}

impl Default for Cancellation {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiver side of a cancellation signal.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// A token that is never cancelled.
    pub fn never() -> Self {
        let (_, rx) = watch::channel(false);
        Self { rx }
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation is requested.
    ///
    /// Never resolves if the owning [`Cancellation`] is dropped without
    /// cancelling.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                pending::<()>().await;
            }
        }
    }
}
