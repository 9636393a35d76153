//! Graceful shutdown fan-out.

use std::future::Future;

use tokio::sync::broadcast;

/// One trigger, many listeners.
///
/// Each long-running task holds a future from [`Shutdown::signalled`] and
/// stops once it resolves.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Future that resolves when [`trigger`](Self::trigger) is called.
    ///
    /// Subscribes immediately, so a trigger fired before the future is
    /// first polled is not missed.
    pub fn signalled(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.recv().await;
        }
    }

    /// Notify every listener. Returns how many were listening.
    pub fn trigger(&self) -> usize {
        self.tx.send(()).unwrap_or(0)
    }

    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
