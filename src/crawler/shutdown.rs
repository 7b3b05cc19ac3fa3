//! Cancellation of a running crawl
//!
//! The binary holds a [`ShutdownHandle`] and triggers it on Ctrl+C. The
//! engine watches the paired [`ShutdownSignal`] between and during rounds.

use tokio::sync::watch;

/// Creates a connected handle/signal pair
pub fn shutdown_channel() -> (ShutdownHandle, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx }, ShutdownSignal { rx })
}

/// Requests cancellation of a crawl
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Observes cancellation requests
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        // Keep the value readable after the sender is gone
        drop(tx);
        Self { rx }
    }

    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once shutdown has been requested
    ///
    /// Never resolves if every handle was dropped without requesting it.
    pub async fn recv(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}
