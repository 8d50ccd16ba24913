//! Versioned "your geometry may have changed" signal for the editor surface.
//!
//! Backed by a `watch` channel: observers compare versions and re-layout on
//! any change. Redundant fires are harmless; the signal carries no state the
//! editor could lose.

use tokio::sync::watch;
use tracing::debug;

/// Why the signal fired. Only used for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutCause {
    Mounted,
    SplitChanged,
    ExternalResize,
    Visibility,
}

#[derive(Debug)]
pub struct LayoutSyncSignal {
    tx: watch::Sender<u64>,
}

impl Default for LayoutSyncSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutSyncSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self { tx }
    }

    /// Bump the version. Works with or without live observers.
    pub fn fire(&self, cause: LayoutCause) -> u64 {
        self.tx.send_modify(|v| *v += 1);
        let version = *self.tx.borrow();
        debug!(target: "workspace", ?cause, version, "Layout sync signal fired");
        version
    }

    pub fn version(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_strictly_increases() {
        let signal = LayoutSyncSignal::new();
        assert_eq!(signal.version(), 0);
        let a = signal.fire(LayoutCause::Mounted);
        let b = signal.fire(LayoutCause::ExternalResize);
        assert!(b > a && a > 0);
    }

    #[tokio::test]
    async fn observers_see_changes() {
        let signal = LayoutSyncSignal::new();
        let mut first = signal.subscribe();
        let mut second = signal.subscribe();
        signal.fire(LayoutCause::SplitChanged);
        first.changed().await.unwrap();
        second.changed().await.unwrap();
        assert_eq!(*first.borrow_and_update(), 1);
        assert_eq!(*second.borrow_and_update(), 1);
    }

    #[test]
    fn redundant_fires_coalesce_for_slow_observers() {
        let signal = LayoutSyncSignal::new();
        let mut rx = signal.subscribe();
        signal.fire(LayoutCause::SplitChanged);
        signal.fire(LayoutCause::SplitChanged);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 2);
        assert!(!rx.has_changed().unwrap());
    }
}
