//! Coordinated shutdown signal.
//!
//! The server's accept loop (and test harnesses) subscribe before the
//! runtime starts serving; `trigger` tells every subscriber to drain and
//! exit. A broadcast channel fits because the signal is one-shot and
//! fan-out: late subscribers after a trigger simply observe a closed
//! channel and stop.

use tokio::sync::broadcast;

/// Hands out shutdown receivers and fires the signal.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Obtain a receiver for the shutdown signal. Must be called before
    /// `trigger` for the signal to be observed.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the shutdown signal. Subscribers that already went away are
    /// not an error.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}
