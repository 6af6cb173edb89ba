//! Typed outbound ports towards the host application.
//!
//! The host consumes bridge output through named, typed channels — one per
//! notification kind.  [`HostPorts`] bundles the sending halves (owned by the
//! bridge and its listeners); [`HostPortReceivers`] bundles the receiving
//! halves (handed to the host once, at construction).
//!
//! All sends are fire-and-forget: a dropped receiver means the host no longer
//! cares about that port, so the bridge logs the discarded notification at
//! `warn` and keeps running.  No port send can ever fail the bridge.

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::command::HostResponse;

/// Sending halves of every host-facing port.
///
/// Cheap to clone — each fanout listener captures its own copy.
#[derive(Debug, Clone)]
pub struct HostPorts {
    ready: mpsc::UnboundedSender<()>,
    response: mpsc::UnboundedSender<HostResponse>,
    site_info_changed: mpsc::UnboundedSender<Value>,
    cert_changed: mpsc::UnboundedSender<Value>,
    on_file_write: mpsc::UnboundedSender<()>,
    url_changed: mpsc::UnboundedSender<String>,
}

/// Receiving halves of every host-facing port.
///
/// Produced once by [`HostPorts::channel`]; the host application owns these
/// for the bridge's whole lifetime.
#[derive(Debug)]
pub struct HostPortReceivers {
    /// Fires once when the remote channel becomes usable.  No payload.
    pub ready: mpsc::UnboundedReceiver<()>,
    /// One settled outcome per correlated command.
    pub response: mpsc::UnboundedReceiver<HostResponse>,
    /// The `params` object of every site-info update.
    pub site_info_changed: mpsc::UnboundedReceiver<Value>,
    /// Same shape as `site_info_changed`, sent only on a certificate change.
    pub cert_changed: mpsc::UnboundedReceiver<Value>,
    /// Fires on a completed file write.  No payload.
    pub on_file_write: mpsc::UnboundedReceiver<()>,
    /// Raw query string after every navigation, in either direction.
    pub url_changed: mpsc::UnboundedReceiver<String>,
}

impl HostPorts {
    /// Creates the full port bundle, returning senders and receivers.
    pub fn channel() -> (HostPorts, HostPortReceivers) {
        let (ready_tx, ready_rx) = mpsc::unbounded_channel();
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        let (site_info_tx, site_info_rx) = mpsc::unbounded_channel();
        let (cert_tx, cert_rx) = mpsc::unbounded_channel();
        let (file_tx, file_rx) = mpsc::unbounded_channel();
        let (url_tx, url_rx) = mpsc::unbounded_channel();

        (
            HostPorts {
                ready: ready_tx,
                response: response_tx,
                site_info_changed: site_info_tx,
                cert_changed: cert_tx,
                on_file_write: file_tx,
                url_changed: url_tx,
            },
            HostPortReceivers {
                ready: ready_rx,
                response: response_rx,
                site_info_changed: site_info_rx,
                cert_changed: cert_rx,
                on_file_write: file_rx,
                url_changed: url_rx,
            },
        )
    }

    /// Notifies the host that the bridge is live.
    pub fn send_ready(&self) {
        if self.ready.send(()).is_err() {
            warn!(port = "ready", "host port receiver dropped; notification discarded");
        }
    }

    /// Delivers the settled outcome of a correlated command.
    pub fn send_response(&self, response: HostResponse) {
        if self.response.send(response).is_err() {
            warn!(port = "response", "host port receiver dropped; response discarded");
        }
    }

    /// Forwards a site-info `params` object.
    pub fn send_site_info(&self, params: Value) {
        if self.site_info_changed.send(params).is_err() {
            warn!(port = "siteInfoChanged", "host port receiver dropped; update discarded");
        }
    }

    /// Forwards a site-info `params` object on the certificate-change port.
    pub fn send_cert_changed(&self, params: Value) {
        if self.cert_changed.send(params).is_err() {
            warn!(port = "certChanged", "host port receiver dropped; update discarded");
        }
    }

    /// Signals a completed file write.
    pub fn send_file_write(&self) {
        if self.on_file_write.send(()).is_err() {
            warn!(port = "onFileWrite", "host port receiver dropped; notification discarded");
        }
    }

    /// Forwards a raw query string on the URL-changed port.
    pub fn send_url_changed(&self, query: String) {
        if self.url_changed.send(query).is_err() {
            warn!(port = "urlChanged", "host port receiver dropped; navigation discarded");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
