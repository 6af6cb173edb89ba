//! The bridge's application-level error type.

use thiserror::Error;

/// Errors raised by the bridge's dispatch and correlation logic.
///
/// Remote invocation *failures* are not errors — they settle as
/// [`zf_core::RemoteResult::Failure`] and are forwarded to the host as data.
/// `BridgeError` covers the faults the bridge cannot hand back as data.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A navigation payload could not be understood.
    ///
    /// An inbound pop event that fails to parse is not recovered: silently
    /// dropping it would desynchronize host history from the remote context's
    /// actual location, so the fault surfaces to whoever owns the bridge
    /// task.  An outbound push-state echo with no query is logged and
    /// skipped — the host authored that command and must not lose the
    /// commands behind it.
    #[error("malformed navigation payload: {reason}")]
    MalformedNavigation {
        /// What was wrong with the payload.
        reason: String,
    },

    /// The outbound frame channel closed before an invocation could settle.
    ///
    /// Only happens during teardown, when the transport collaborator has
    /// dropped its endpoint.
    #[error("remote channel closed before the invocation settled")]
    RemoteChannelClosed,
}
