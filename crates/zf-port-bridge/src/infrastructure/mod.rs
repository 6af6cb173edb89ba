//! Infrastructure layer for zf-port-bridge.
//!
//! - [`endpoint`] — the two channel surfaces a process embeds: the host side
//!   (command sender + port receivers) and the remote side (frame queues the
//!   transport collaborator drives).
//! - [`pump`] — the [`Bridge`](pump::Bridge) itself: construction and the
//!   single-task event loop that drives the facade.

pub mod endpoint;
pub mod pump;

pub use endpoint::{EndpointError, HostEndpoint, RemoteEndpoint};
pub use pump::Bridge;
