//! Composition root for the bridge's dispatch logic.
//!
//! [`BridgeFacade`] owns one [`ConnectionGate`] and one [`EventFanout`] and
//! exposes correlation and navigation as derived behavior over them.  All of
//! its entry points are driven by the infrastructure pump:
//!
//! - [`on_channel_open`](BridgeFacade::on_channel_open) for the transport's
//!   open signal,
//! - [`on_remote_response`](BridgeFacade::on_remote_response) for invocation
//!   outcomes,
//! - [`on_remote_event`](BridgeFacade::on_remote_event) for push events,
//! - [`on_host_command`](BridgeFacade::on_host_command) for host actions.
//!
//! Subscription wiring happens once, at construction:
//!
//! ```text
//! Ready        → host `ready` port
//! SetSiteInfo  → host `siteInfoChanged` port, plus the secondary trigger
//!                ports (`certChanged` / `onFileWrite`) when the payload's
//!                marker matches
//! PopState     → navigation bridge → host `urlChanged` port
//! ```

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use zf_core::domain::siteinfo;
use zf_core::{CommandFrame, EventName, InboundFrame, RemoteResult, SiteTrigger, CMD_PUSH_STATE, CMD_SITE_INFO};

use crate::application::correlator::RequestResponseCorrelator;
use crate::application::error::BridgeError;
use crate::application::fanout::EventFanout;
use crate::application::gate::ConnectionGate;
use crate::application::navigation::NavigationBridge;
use crate::domain::command::{HostCommand, HostResponse};
use crate::domain::config::BridgeConfig;
use crate::domain::ports::HostPorts;

/// Owns the bridge's state machines and routes every message between them.
///
/// One facade per remote channel, alive for the whole process run.  Methods
/// that forward correlated outcomes spawn short-lived tasks, so the facade
/// must be driven from within a Tokio runtime.
pub struct BridgeFacade {
    config: BridgeConfig,
    gate: ConnectionGate,
    fanout: EventFanout,
    correlator: Arc<RequestResponseCorrelator>,
    navigation: NavigationBridge,
    ports: HostPorts,
    /// Re-injection handle into the pump's inbound queue, used to replay the
    /// eager site-info fetch through the regular push-event path.
    replay: mpsc::UnboundedSender<InboundFrame>,
}

impl BridgeFacade {
    /// Builds the facade and wires all push-event subscriptions.
    ///
    /// `outbound` carries invocation frames to the transport collaborator;
    /// `replay` feeds frames back into the same inbound queue the transport
    /// delivers on.
    pub fn new(
        config: BridgeConfig,
        ports: HostPorts,
        outbound: mpsc::UnboundedSender<CommandFrame>,
        replay: mpsc::UnboundedSender<InboundFrame>,
    ) -> Self {
        let correlator = Arc::new(RequestResponseCorrelator::new(outbound));
        let navigation = NavigationBridge::new(ports.clone());
        let mut fanout = EventFanout::new();

        // Ready → tell the host the bridge is live.
        let ready_ports = ports.clone();
        fanout.subscribe(EventName::Ready, move |_| {
            ready_ports.send_ready();
            Ok(())
        });

        // SetSiteInfo → always forward params, then check the secondary
        // trigger marker.  Markers are independent: each one fires only its
        // own dedicated port.
        let info_ports = ports.clone();
        fanout.subscribe(EventName::SetSiteInfo, move |message| {
            let Some(params) = siteinfo::params(message) else {
                warn!("site-info event without params; dropped");
                return Ok(());
            };
            info_ports.send_site_info(params.clone());

            match siteinfo::trigger(params) {
                Some(SiteTrigger::CertChanged) => info_ports.send_cert_changed(params.clone()),
                Some(SiteTrigger::FileDone) => info_ports.send_file_write(),
                None => {}
            }
            Ok(())
        });

        // PopState → inbound navigation.  Failures propagate out of dispatch.
        let nav = navigation.clone();
        fanout.subscribe(EventName::PopState, move |message| nav.on_remote_pop(message));

        Self {
            config,
            gate: ConnectionGate::new(),
            fanout,
            correlator,
            navigation,
            ports,
            replay,
        }
    }

    /// Handles the transport's channel-open signal.
    ///
    /// The first signal latches the gate and dispatches the ready event; any
    /// repeat is ignored, keeping the ready signal at most-once.
    pub fn on_channel_open(&mut self) -> Result<(), BridgeError> {
        if self.gate.on_open() {
            debug!("remote channel opened");
            self.fanout.dispatch(&EventName::Ready, &Value::Null)
        } else {
            debug!("duplicate channel-open signal ignored");
            Ok(())
        }
    }

    /// Settles the pending invocation a response frame answers.
    pub fn on_remote_response(&self, to: u64, result: RemoteResult) {
        if !self.correlator.settle(to, result) {
            warn!(to, "response matches no pending invocation; dropped");
        }
    }

    /// Fans a wrapper push event out to its subscribers.
    pub fn on_remote_event(&mut self, cmd: &str, message: &Value) -> Result<(), BridgeError> {
        let name = EventName::from_wire(cmd);
        debug!(event = %name, "dispatching push event");
        self.fanout.dispatch(&name, message)
    }

    /// Routes one host command.
    ///
    /// Every command takes the correlator round trip.  If it carried a
    /// correlation id, the settled outcome goes back on the response port;
    /// otherwise the outcome is discarded (optionally after a debug log).
    /// The reserved push-state command *additionally* feeds the navigation
    /// bridge's outbound echo.
    ///
    /// A malformed echo is logged and skipped: one bad host command must
    /// never halt routing of the commands behind it.  The invocation itself
    /// still crosses the wire either way.
    pub fn on_host_command(&mut self, command: HostCommand) {
        debug!(
            command = %command.command,
            correlated = command.req_id.is_some(),
            "routing host command"
        );

        let HostCommand { command: name, args, req_id } = command;
        let nav_args = (name == CMD_PUSH_STATE).then(|| args.clone());

        let correlator = Arc::clone(&self.correlator);
        let ports = self.ports.clone();
        let log_uncorrelated = self.config.log_uncorrelated_responses;
        tokio::spawn(async move {
            match correlator.invoke(&name, args).await {
                Ok(result) => match req_id {
                    Some(id) => ports.send_response(HostResponse { id, response: result }),
                    None if log_uncorrelated => {
                        debug!(command = %name, success = result.is_success(), "fire-and-forget command settled");
                    }
                    None => {}
                },
                Err(e) => warn!(command = %name, error = %e, "invocation did not settle"),
            }
        });

        if let Some(args) = nav_args {
            if let Err(e) = self.navigation.on_host_push(&args) {
                warn!(error = %e, "push-state echo skipped");
            }
        }
    }

    /// Spawns the eager initial site-info fetch, when configured.
    ///
    /// The task waits on the gate's ready signal (arriving late is fine — the
    /// gate replays it), invokes the site-info query through the regular
    /// correlator path, and re-injects a successful result as a site-info
    /// push frame so it flows through exactly the same fanout path late host
    /// subscribers rely on.  A failed fetch has no requester to answer, so it
    /// is logged and dropped.
    pub(crate) fn spawn_initial_fetch(&self) {
        if !self.config.fetch_initial_site_info {
            return;
        }

        let gate = self.gate.clone();
        let correlator = Arc::clone(&self.correlator);
        let replay = self.replay.clone();
        tokio::spawn(async move {
            gate.ready().await;
            match correlator.invoke(CMD_SITE_INFO, Vec::new()).await {
                Ok(RemoteResult::Success(info)) => {
                    let cmd = EventName::SetSiteInfo.as_str().to_string();
                    let message = json!({"cmd": cmd.clone(), "params": info});
                    if replay.send(InboundFrame::Push { cmd, message }).is_err() {
                        debug!("bridge stopped before initial site info could be replayed");
                    }
                }
                Ok(RemoteResult::Failure(e)) => warn!(error = %e, "initial site-info fetch failed"),
                Err(e) => warn!(error = %e, "initial site-info fetch never settled"),
            }
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
