//! Typed frame representations for the wrapper channel.
//!
//! Two directions, two shapes:
//!
//! ```text
//! Bridge → Wrapper:  CommandFrame   {"cmd": name, "id": n, "params": [...]}
//! Wrapper → Bridge:  InboundFrame   response / push event / channel-opened
//! ```
//!
//! The bridge never inspects payload contents beyond the frame envelope, so
//! parameters and results are carried as opaque [`serde_json::Value`]s.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Outbound: invocation frames ───────────────────────────────────────────────

/// A single remote invocation, as placed on the wrapper channel.
///
/// Every invocation carries a bridge-allocated `id` (see
/// [`crate::protocol::sequence::InvokeSequence`]); the wrapper echoes it back
/// in the `to` field of the matching response.  Exactly one response per `id`
/// is expected — the wrapper API never answers an invocation twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandFrame {
    /// Remote API operation name, e.g. `siteInfo` or `wrapperPushState`.
    pub cmd: String,
    /// Bridge-allocated invocation id, echoed in the response's `to` field.
    pub id: u64,
    /// Positional arguments, passed through opaquely.
    pub params: Vec<Value>,
}

// ── Inbound: responses, pushes, and the open signal ───────────────────────────

/// Everything the wrapper channel can deliver to the bridge.
///
/// The three variants are distinguished on the wire by the `cmd` field:
/// `"response"` answers a prior invocation, the reserved
/// `wrapperOpenedWebsocket` command signals channel readiness, and every other
/// command name is an unsolicited push event.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundFrame {
    /// The single outcome of a prior invocation.
    Response {
        /// The `id` of the [`CommandFrame`] this answers.
        to: u64,
        /// The settled outcome, success or failure.
        result: RemoteResult,
    },

    /// An unsolicited named notification from the wrapper.
    ///
    /// `message` is the *whole* frame object (including its `params` field),
    /// mirroring what the wrapper hands to event listeners.  Consumers that
    /// care about the payload drill into `message["params"]` themselves.
    Push {
        /// Event name — the frame's `cmd` field.
        cmd: String,
        /// The full frame object, untouched.
        message: Value,
    },

    /// The wrapper's one-time control signal that the channel is usable.
    ChannelOpened,
}

// ── Invocation outcomes ───────────────────────────────────────────────────────

/// The settled outcome of a remote invocation.
///
/// The wrapper reports failures in-band: a response whose `result` is an
/// object carrying an `"error"` key is a failure, anything else is a success.
/// Both carry the payload opaquely — the bridge forwards outcomes, it never
/// interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RemoteResult {
    /// The invocation succeeded; the payload is the raw result value.
    Success(Value),
    /// The invocation failed; the payload is the raw error value.
    Failure(Value),
}

impl RemoteResult {
    /// Classifies a raw wire `result` value into success or failure.
    ///
    /// An object with an `"error"` key is the wrapper's failure convention;
    /// everything else (including `null`, strings like `"ok"`, and arrays) is
    /// a success.
    pub fn from_wire(result: Value) -> Self {
        match result.as_object() {
            Some(obj) if obj.contains_key("error") => RemoteResult::Failure(result),
            _ => RemoteResult::Success(result),
        }
    }

    /// `true` for [`RemoteResult::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, RemoteResult::Success(_))
    }

    /// Borrows the payload regardless of outcome kind.
    pub fn payload(&self) -> &Value {
        match self {
            RemoteResult::Success(v) | RemoteResult::Failure(v) => v,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
