//! Channel surfaces handed out at bridge construction.
//!
//! [`Bridge::new`](crate::Bridge::new) produces one endpoint per side.  The
//! [`HostEndpoint`] goes to the application embedding the bridge; the
//! [`RemoteEndpoint`] goes to whatever transport actually carries frames to
//! and from the wrapper (a websocket task, a test harness, ...).  The bridge
//! itself holds only the opposite halves, so dropping an endpoint is how each
//! side signals it is done.

use tokio::sync::mpsc;
use zf_core::{decode_frame, encode_frame, CommandFrame, InboundFrame, ProtocolError};

use crate::application::error::BridgeError;
use crate::domain::command::HostCommand;
use crate::domain::ports::HostPortReceivers;

/// The host application's surface: submit commands, receive port traffic.
///
/// Dropping the endpoint closes the command channel, which stops the bridge
/// pump.
#[derive(Debug)]
pub struct HostEndpoint {
    commands: mpsc::UnboundedSender<HostCommand>,
    /// Receiving halves of every typed notification port.
    pub ports: HostPortReceivers,
}

impl HostEndpoint {
    pub(crate) fn new(
        commands: mpsc::UnboundedSender<HostCommand>,
        ports: HostPortReceivers,
    ) -> Self {
        Self { commands, ports }
    }

    /// Submits one fire-and-forget command for routing.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::RemoteChannelClosed`] when the bridge pump has
    /// already stopped.
    pub fn submit(&self, command: HostCommand) -> Result<(), BridgeError> {
        self.commands
            .send(command)
            .map_err(|_| BridgeError::RemoteChannelClosed)
    }
}

/// The transport collaborator's surface: drain outbound frames, deliver
/// inbound ones.
///
/// Dropping the endpoint closes the inbound queue; once the host endpoint is
/// also gone the pump drains and stops.
#[derive(Debug)]
pub struct RemoteEndpoint {
    outbound: mpsc::UnboundedReceiver<CommandFrame>,
    inbound: mpsc::UnboundedSender<InboundFrame>,
}

impl RemoteEndpoint {
    pub(crate) fn new(
        outbound: mpsc::UnboundedReceiver<CommandFrame>,
        inbound: mpsc::UnboundedSender<InboundFrame>,
    ) -> Self {
        Self { outbound, inbound }
    }

    /// Receives the next invocation frame the bridge wants delivered, or
    /// `None` once the bridge has stopped.
    pub async fn next_frame(&mut self) -> Option<CommandFrame> {
        self.outbound.recv().await
    }

    /// Like [`next_frame`](Self::next_frame), but serialized to the wire's
    /// JSON text form.
    pub async fn next_json(&mut self) -> Option<Result<String, ProtocolError>> {
        let frame = self.outbound.recv().await?;
        Some(encode_frame(&frame))
    }

    /// Delivers one already-decoded frame from the wrapper.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::RemoteChannelClosed`] when the bridge pump has
    /// already stopped.
    pub fn deliver(&self, frame: InboundFrame) -> Result<(), BridgeError> {
        self.inbound
            .send(frame)
            .map_err(|_| BridgeError::RemoteChannelClosed)
    }

    /// Decodes one JSON text frame from the wrapper and delivers it.
    ///
    /// # Errors
    ///
    /// [`EndpointError::Protocol`] when the text does not decode as a wrapper
    /// frame; [`EndpointError::Bridge`] when the bridge pump has stopped.
    pub fn deliver_json(&self, text: &str) -> Result<(), EndpointError> {
        let frame = decode_frame(text)?;
        self.deliver(frame)?;
        Ok(())
    }
}

/// Failure delivering a raw text frame: either it did not decode, or the
/// bridge is gone.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

// ── Tests ─────────────────────────────────────────────────────────────────────
