//! Cooperative cancellation shared by the scheduler's workers.

use tokio::sync::watch;

/// Sending half: requests a graceful stop.
#[derive(Debug, Clone)]
pub struct ShutdownTrigger {
    /// Flag channel.
    tx: std::sync::Arc<watch::Sender<bool>>,
}

/// Receiving half: observed by workers between and during attempts.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    /// Flag channel.
    rx: watch::Receiver<bool>,
}

/// Create a connected trigger/signal pair.
#[must_use]
pub fn shutdown_channel() -> (ShutdownTrigger, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (
        ShutdownTrigger {
            tx: std::sync::Arc::new(tx),
        },
        ShutdownSignal { rx },
    )
}

impl ShutdownTrigger {
    /// Request shutdown; idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl ShutdownSignal {
    /// A signal that never fires.
    #[must_use]
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        // Keep the value readable after the sender is gone.
        drop(tx);
        Self { rx }
    }

    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// What: Wait until shutdown is requested.
    ///
    /// Output:
    /// - Resolves once triggered; pends forever if the trigger is dropped untriggered
    pub async fn triggered(&mut self) {
        let closed = self.rx.wait_for(|stop| *stop).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}
