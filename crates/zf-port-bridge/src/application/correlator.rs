//! Request/response correlation against the wrapper API.
//!
//! Each [`invoke`](RequestResponseCorrelator::invoke) issues exactly one
//! outbound invocation and produces a future that settles with its single
//! outcome — success and failure alike arrive as [`RemoteResult`] data, never
//! as a propagated error, so the host can always be told what happened.
//!
//! # Settle-once contract
//!
//! Every pending invocation is a `oneshot` channel keyed by its invoke id.
//! Settlement *removes* the entry before sending, so a duplicate response for
//! the same id finds nothing to settle and is reported back to the caller as
//! unmatched.  A `oneshot` sender cannot send twice, making double resolution
//! structurally impossible rather than merely checked.
//!
//! # Concurrency
//!
//! Invocations are independent: any number may be in flight at once, and they
//! resolve in whatever order the wrapper answers.  No timeout is enforced —
//! an invocation the wrapper never answers stays pending indefinitely.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;
use zf_core::{CommandFrame, InvokeSequence, RemoteResult};

use crate::application::error::BridgeError;

/// Converts host commands into correlated wrapper invocations.
pub struct RequestResponseCorrelator {
    /// Frames the transport collaborator must deliver to the wrapper.
    outbound: mpsc::UnboundedSender<CommandFrame>,
    /// One settle handle per in-flight invocation, keyed by invoke id.
    ///
    /// A `std::sync::Mutex` is deliberate: the lock is never held across an
    /// await point, and poisoning is unreachable because no code path panics
    /// while holding it.
    pending: Mutex<HashMap<u64, oneshot::Sender<RemoteResult>>>,
    seq: InvokeSequence,
}

impl RequestResponseCorrelator {
    /// Creates a correlator that places invocations on `outbound`.
    pub fn new(outbound: mpsc::UnboundedSender<CommandFrame>) -> Self {
        Self {
            outbound,
            pending: Mutex::new(HashMap::new()),
            seq: InvokeSequence::new(),
        }
    }

    /// Issues one remote invocation and awaits its single outcome.
    ///
    /// Both remote success and remote failure resolve the returned future —
    /// failure is handed back as [`RemoteResult::Failure`] data, not as an
    /// `Err`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::RemoteChannelClosed`] only when the transport
    /// endpoint is gone (bridge teardown), in which case no outcome can ever
    /// arrive.
    pub async fn invoke(&self, command: &str, params: Vec<Value>) -> Result<RemoteResult, BridgeError> {
        let id = self.seq.next();
        let (settle_tx, settle_rx) = oneshot::channel();

        self.lock_pending().insert(id, settle_tx);
        debug!(command, id, "issuing remote invocation");

        let frame = CommandFrame {
            cmd: command.to_string(),
            id,
            params,
        };
        if self.outbound.send(frame).is_err() {
            // The transport is gone; withdraw the pending entry so it does
            // not linger for the rest of the bridge lifetime.
            self.lock_pending().remove(&id);
            return Err(BridgeError::RemoteChannelClosed);
        }

        settle_rx.await.map_err(|_| BridgeError::RemoteChannelClosed)
    }

    /// Settles the invocation with id `to`, waking its `invoke` future.
    ///
    /// Returns `false` when no invocation with that id is pending — either
    /// the wrapper answered twice or answered something the bridge never
    /// asked.  The caller decides how loudly to report that.
    pub fn settle(&self, to: u64, result: RemoteResult) -> bool {
        match self.lock_pending().remove(&to) {
            Some(settle_tx) => {
                // A send error means the invoker gave up (its future was
                // dropped); the outcome has nowhere to go, which is fine.
                let _ = settle_tx.send(result);
                true
            }
            None => false,
        }
    }

    /// Number of invocations currently awaiting an outcome.
    pub fn pending(&self) -> usize {
        self.lock_pending().len()
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, HashMap<u64, oneshot::Sender<RemoteResult>>> {
        // See the field doc: poisoning cannot occur.
        self.pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use tokio_test::{assert_pending, assert_ready};

    #[test]
    fn test_invoke_stays_pending_until_settled() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let correlator = RequestResponseCorrelator::new(tx);

        let mut invoke = tokio_test::task::spawn(correlator.invoke("siteInfo", vec![]));
        assert_pending!(invoke.poll());

        // The frame went out with the allocated id.
        let frame = rx.try_recv().expect("invocation frame must be sent");
        assert_eq!(frame.cmd, "siteInfo");
        assert_eq!(correlator.pending(), 1);

        // Settling wakes the future with the outcome.
        assert!(correlator.settle(frame.id, RemoteResult::Success(json!({"peers": 1}))));
        assert!(invoke.is_woken());
        let outcome = assert_ready!(invoke.poll()).unwrap();
        assert_eq!(outcome, RemoteResult::Success(json!({"peers": 1})));
        assert_eq!(correlator.pending(), 0);
    }

    #[test]
    fn test_failure_outcome_resolves_the_future_as_data() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let correlator = RequestResponseCorrelator::new(tx);

        let mut invoke = tokio_test::task::spawn(correlator.invoke("fileGet", vec![json!("x")]));
        assert_pending!(invoke.poll());
        let frame = rx.try_recv().unwrap();

        correlator.settle(frame.id, RemoteResult::Failure(json!({"error": "not found"})));

        // Failure must resolve the deferred, never leave it pending or Err.
        let outcome = assert_ready!(invoke.poll()).unwrap();
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_settle_unknown_id_reports_unmatched() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let correlator = RequestResponseCorrelator::new(tx);
        assert!(!correlator.settle(99, RemoteResult::Success(json!(null))));
    }

    #[test]
    fn test_double_settle_second_is_unmatched() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let correlator = RequestResponseCorrelator::new(tx);

        let mut invoke = tokio_test::task::spawn(correlator.invoke("ping", vec![]));
        assert_pending!(invoke.poll());
        let frame = rx.try_recv().unwrap();

        assert!(correlator.settle(frame.id, RemoteResult::Success(json!("pong"))));
        assert!(!correlator.settle(frame.id, RemoteResult::Success(json!("again"))));

        // The future saw exactly the first outcome.
        let outcome = assert_ready!(invoke.poll()).unwrap();
        assert_eq!(outcome, RemoteResult::Success(json!("pong")));
    }

    #[test]
    fn test_invoke_after_transport_drop_errors_and_leaves_nothing_pending() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let correlator = RequestResponseCorrelator::new(tx);

        let mut invoke = tokio_test::task::spawn(correlator.invoke("ping", vec![]));
        let result = assert_ready!(invoke.poll());
        assert!(matches!(result, Err(BridgeError::RemoteChannelClosed)));
        assert_eq!(correlator.pending(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_invocations_resolve_out_of_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let correlator = Arc::new(RequestResponseCorrelator::new(tx));

        let first = tokio::spawn({
            let c = Arc::clone(&correlator);
            async move { c.invoke("first", vec![]).await }
        });
        let second = tokio::spawn({
            let c = Arc::clone(&correlator);
            async move { c.invoke("second", vec![]).await }
        });

        // Collect both frames, then answer them in reverse order.
        let frame_a = rx.recv().await.unwrap();
        let frame_b = rx.recv().await.unwrap();
        let (first_frame, second_frame) = if frame_a.cmd == "first" {
            (frame_a, frame_b)
        } else {
            (frame_b, frame_a)
        };

        correlator.settle(second_frame.id, RemoteResult::Success(json!("2nd")));
        correlator.settle(first_frame.id, RemoteResult::Success(json!("1st")));

        // Each invocation got its own outcome, not the other's.
        assert_eq!(first.await.unwrap().unwrap(), RemoteResult::Success(json!("1st")));
        assert_eq!(second.await.unwrap().unwrap(), RemoteResult::Success(json!("2nd")));
    }
}
