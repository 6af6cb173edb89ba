//! One-shot latch for remote-channel readiness.
//!
//! The transport reports channel-open exactly when it happens; downstream
//! consumers (the eager site-info fetch, most notably) may subscribe before
//! *or after* that moment.  A `tokio::sync::watch` channel gives both cases
//! the same answer: the current value is checked first, so a subscriber that
//! arrives late still observes the open state — no missed wakeup.

use tokio::sync::watch;

/// Tracks whether the remote channel has become usable.
///
/// Cloning is cheap; all clones share the same latch.
#[derive(Debug, Clone)]
pub struct ConnectionGate {
    opened: watch::Sender<bool>,
}

impl ConnectionGate {
    /// Creates a gate in the not-yet-open state.
    pub fn new() -> Self {
        let (opened, _) = watch::channel(false);
        Self { opened }
    }

    /// Records the channel-open transition.
    ///
    /// Returns `true` only on the first call; later calls are no-ops so the
    /// ready signal can never fire twice per bridge lifetime.
    pub fn on_open(&self) -> bool {
        self.opened.send_if_modified(|open| {
            if *open {
                false
            } else {
                *open = true;
                true
            }
        })
    }

    /// `true` once [`on_open`](Self::on_open) has been called.
    pub fn is_open(&self) -> bool {
        *self.opened.borrow()
    }

    /// Resolves once the channel is open — immediately if it already is.
    pub async fn ready(&self) {
        let mut rx = self.opened.subscribe();
        // The sender lives inside `self`, which this future borrows, so
        // `wait_for` cannot observe a closed channel.
        let _ = rx.wait_for(|open| *open).await;
    }
}

impl Default for ConnectionGate {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
