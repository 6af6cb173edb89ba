//! zf-port-bridge library crate.
//!
//! This crate bridges two asynchronous message-passing domains: a sandboxed
//! wrapper channel exposing a request/response API plus unsolicited push
//! events, and a host application that speaks only through named, typed
//! message ports.
//!
//! # Architecture
//!
//! ```text
//! Host application (typed ports)
//!         ↕
//! [zf-port-bridge]
//!   ├── domain/           Pure types: HostCommand/HostResponse, port bundles, BridgeConfig
//!   ├── application/      Gate, fanout, correlator, navigation, facade
//!   └── infrastructure/   Bridge composition root and the single-task event pump
//!         ↕
//! Wrapper channel (zf-core frames, delivered by a transport collaborator)
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no task spawning (channel handles only).
//! - `application` depends on `domain` and `zf-core`; it owns all dispatch
//!   and correlation logic.
//! - `infrastructure` wires the layers to `tokio` channels and runs the pump.
//!
//! # What the bridge does
//!
//! 1. Turns fire-and-forget host commands into correlated request/response
//!    pairs against the wrapper API, answering on the host's response port
//!    only when the command carried a correlation id.
//! 2. Fans unsolicited wrapper push events out to the host's notification
//!    ports, including the secondary triggers buried in site-info payloads.
//! 3. Keeps history-style navigation state synchronized in both directions
//!    through the host's URL-changed port.

/// Domain layer: host-facing message types, port bundles, configuration.
pub mod domain;

/// Application layer: gate, fanout, correlator, navigation, and the facade.
pub mod application;

/// Infrastructure layer: channel endpoints and the bridge event pump.
pub mod infrastructure;

pub use application::error::BridgeError;
pub use domain::{BridgeConfig, HostCommand, HostResponse};
pub use infrastructure::{Bridge, HostEndpoint, RemoteEndpoint};
