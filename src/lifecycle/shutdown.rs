//! Shutdown coordination for the gateway.

use std::future::Future;

use tokio::sync::broadcast;

use crate::lifecycle::signals;

/// Coordinator for graceful shutdown.
///
/// The server waits on one of the futures handed out here; tests trigger
/// it directly, the binary also reacts to OS signals.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Resolves once `trigger` is called (or the coordinator is dropped).
    pub fn triggered(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.recv().await;
        }
    }

    /// Resolves on `trigger` or on SIGINT/SIGTERM, whichever comes first.
    pub fn triggered_or_signal(&self) -> impl Future<Output = ()> + Send + 'static {
        let triggered = self.triggered();
        async move {
            tokio::select! {
                _ = triggered => {}
                _ = signals::wait_for_signal() => {}
            }
        }
    }

    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of futures still waiting.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_resolves_waiters() {
        let shutdown = Shutdown::new();
        let waiter = tokio::spawn(shutdown.triggered());
        assert_eq!(shutdown.receiver_count(), 1);

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should resolve")
            .unwrap();
    }
}
