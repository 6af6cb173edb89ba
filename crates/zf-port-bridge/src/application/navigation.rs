//! History-state translation between the two domains.
//!
//! Outbound: a host-issued push-state command carries a `[state, title,
//! query]` argument triple; the query (third argument, by convention) is
//! echoed straight back on the URL-changed port so the host's router observes
//! its own push.
//!
//! Inbound: the wrapper's pop-state event carries a full address string; only
//! its query component matters to the host, so the address is parsed and the
//! characters after `?` are forwarded raw (percent-decoding and structure are
//! the host's business).
//!
//! Malformed payloads in either direction are reported as
//! [`BridgeError::MalformedNavigation`]; callers treat the directions
//! differently (an inbound fault stops the pump, an outbound one is logged
//! and skipped).

use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::application::error::BridgeError;
use crate::domain::ports::HostPorts;

/// Decodes and encodes navigation events between the wrapper and host forms.
#[derive(Debug, Clone)]
pub struct NavigationBridge {
    ports: HostPorts,
}

impl NavigationBridge {
    /// Creates a navigation bridge forwarding onto `ports`.
    pub fn new(ports: HostPorts) -> Self {
        Self { ports }
    }

    /// Echoes a host push-state command's query fragment back to the host.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::MalformedNavigation`] when the args carry no
    /// string in the third position — the push has no query to echo, and
    /// guessing one would desynchronize the host router.
    pub fn on_host_push(&self, args: &[Value]) -> Result<(), BridgeError> {
        let query = args
            .get(2)
            .and_then(Value::as_str)
            .ok_or_else(|| BridgeError::MalformedNavigation {
                reason: format!("push-state args carry no query string in third position: {args:?}"),
            })?;

        debug!(query, "echoing host push-state");
        self.ports.send_url_changed(query.to_string());
        Ok(())
    }

    /// Forwards the query component of a wrapper pop-state event.
    ///
    /// `message` is the full push-event frame; the address lives at
    /// `params.href`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::MalformedNavigation`] when the address is
    /// absent or fails to parse as a URL.
    pub fn on_remote_pop(&self, message: &Value) -> Result<(), BridgeError> {
        let href = message
            .pointer("/params/href")
            .and_then(Value::as_str)
            .ok_or_else(|| BridgeError::MalformedNavigation {
                reason: "pop-state event carries no params.href address".to_string(),
            })?;

        let url = Url::parse(href).map_err(|e| BridgeError::MalformedNavigation {
            reason: format!("cannot parse pop-state address `{href}`: {e}"),
        })?;

        // An address without a query still navigated somewhere; the host
        // receives an empty query string, matching a bare `?`-less URL.
        let query = url.query().unwrap_or("");
        debug!(query, "forwarding wrapper pop-state");
        self.ports.send_url_changed(query.to_string());
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
