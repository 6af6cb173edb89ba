//! Bridge construction and the single-task event pump.
//!
//! [`Bridge::new`] wires every channel and hands out the two endpoints;
//! [`Bridge::run`] then multiplexes both inbound streams — wrapper frames and
//! host commands — into the facade from one task, so facade state needs no
//! locking.
//!
//! # Shutdown
//!
//! The pump stops when the host's command channel closes (the host endpoint
//! was dropped) or when the inbound frame queue drains after every sender is
//! gone.  The facade keeps a replay sender into the inbound queue for its
//! eager site-info fetch, so dropping the remote endpoint alone does not
//! close that queue — the host side is the authoritative shutdown signal.

use anyhow::Context;
use tokio::sync::mpsc;
use tracing::{debug, error};
use zf_core::InboundFrame;

use crate::application::facade::BridgeFacade;
use crate::domain::command::HostCommand;
use crate::domain::config::BridgeConfig;
use crate::domain::ports::HostPorts;
use crate::infrastructure::endpoint::{HostEndpoint, RemoteEndpoint};

/// The assembled bridge, ready to pump.
pub struct Bridge {
    facade: BridgeFacade,
    inbound: mpsc::UnboundedReceiver<InboundFrame>,
    commands: mpsc::UnboundedReceiver<HostCommand>,
}

impl Bridge {
    /// Builds a bridge and its two endpoints.
    ///
    /// The caller hands [`HostEndpoint`] to the embedding application and
    /// [`RemoteEndpoint`] to the transport collaborator, then drives the
    /// returned bridge with [`run`](Self::run).
    pub fn new(config: BridgeConfig) -> (Self, HostEndpoint, RemoteEndpoint) {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (ports, receivers) = HostPorts::channel();

        let facade = BridgeFacade::new(config, ports, outbound_tx, inbound_tx.clone());

        let bridge = Self {
            facade,
            inbound: inbound_rx,
            commands: command_rx,
        };
        let host = HostEndpoint::new(command_tx, receivers);
        let remote = RemoteEndpoint::new(outbound_rx, inbound_tx);
        (bridge, host, remote)
    }

    /// Runs the pump until either side shuts down.
    ///
    /// # Errors
    ///
    /// Returns the first inbound dispatch failure the facade reports — an
    /// unparseable pop-state address, for one.  Host-command faults are
    /// logged and skipped instead, so one bad command never stops the pump.
    /// Transport-level decode failures never reach here; they stay with the
    /// collaborator that called [`RemoteEndpoint::deliver_json`].
    pub async fn run(mut self) -> anyhow::Result<()> {
        self.facade.spawn_initial_fetch();
        debug!("bridge pump started");

        loop {
            tokio::select! {
                frame = self.inbound.recv() => match frame {
                    Some(InboundFrame::ChannelOpened) => self
                        .facade
                        .on_channel_open()
                        .context("ready dispatch failed")?,
                    Some(InboundFrame::Response { to, result }) => {
                        self.facade.on_remote_response(to, result);
                    }
                    Some(InboundFrame::Push { cmd, message }) => self
                        .facade
                        .on_remote_event(&cmd, &message)
                        .with_context(|| format!("dispatch of remote event `{cmd}` failed"))?,
                    None => {
                        debug!("inbound frame queue closed; pump stopping");
                        break;
                    }
                },
                command = self.commands.recv() => match command {
                    Some(command) => self.facade.on_host_command(command),
                    None => {
                        debug!("host endpoint dropped; pump stopping");
                        break;
                    }
                },
            }
        }
        Ok(())
    }

    /// [`run`](Self::run), but logging the failure instead of returning it.
    ///
    /// Convenience for embedders that spawn the pump as a detached task.
    pub async fn run_logged(self) {
        if let Err(e) = self.run().await {
            error!(error = %format!("{e:#}"), "bridge pump stopped with error");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use zf_core::RemoteResult;

    fn quiet_config() -> BridgeConfig {
        BridgeConfig {
            fetch_initial_site_info: false,
            ..BridgeConfig::default()
        }
    }

    #[tokio::test]
    async fn test_pump_stops_when_host_endpoint_drops() {
        let (bridge, host, _remote) = Bridge::new(quiet_config());
        let pump = tokio::spawn(bridge.run());

        drop(host);

        pump.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_channel_open_reaches_the_ready_port() {
        let (bridge, mut host, remote) = Bridge::new(quiet_config());
        let pump = tokio::spawn(bridge.run());

        remote.deliver(InboundFrame::ChannelOpened).unwrap();

        assert_eq!(host.ports.ready.recv().await, Some(()));
        drop(host);
        drop(remote);
        pump.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_malformed_pop_state_fails_the_pump() {
        let (bridge, host, remote) = Bridge::new(quiet_config());
        let pump = tokio::spawn(bridge.run());

        remote
            .deliver(InboundFrame::Push {
                cmd: "wrapperPopState".to_string(),
                message: json!({"params": {"href": "not a url"}}),
            })
            .unwrap();

        let result = pump.await.unwrap();
        assert!(result.is_err());
        drop(host);
    }

    #[tokio::test]
    async fn test_unmatched_response_is_dropped_without_stopping_the_pump() {
        let (bridge, mut host, remote) = Bridge::new(quiet_config());
        let pump = tokio::spawn(bridge.run());

        remote
            .deliver(InboundFrame::Response {
                to: 424242,
                result: RemoteResult::Success(json!(null)),
            })
            .unwrap();
        remote.deliver(InboundFrame::ChannelOpened).unwrap();

        // The pump survived the stray response and still serves the open.
        assert_eq!(host.ports.ready.recv().await, Some(()));
        drop(host);
        drop(remote);
        pump.await.unwrap().unwrap();
    }
}
