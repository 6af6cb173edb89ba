//! Domain layer for zf-port-bridge.
//!
//! Pure types that describe the bridge's host-facing surface: the command and
//! response shapes, the bundle of outbound notification ports, and the
//! runtime configuration.  Nothing here performs I/O or spawns tasks — the
//! port bundle holds channel handles but only ever does non-blocking sends.

pub mod command;
pub mod config;
pub mod ports;

pub use command::{HostCommand, HostResponse};
pub use config::BridgeConfig;
pub use ports::{HostPortReceivers, HostPorts};
