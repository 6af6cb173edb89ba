//! Application layer for zf-port-bridge.
//!
//! All dispatch and correlation logic lives here, free of sockets and
//! transport concerns:
//!
//! - [`gate`] — one-shot channel-readiness latch.
//! - [`fanout`] — named multi-subscriber event dispatcher.
//! - [`correlator`] — invocation ↔ response pairing with settle-once futures.
//! - [`navigation`] — history-state translation in both directions.
//! - [`facade`] — composition root that wires the above to the host ports.

pub mod correlator;
pub mod error;
pub mod facade;
pub mod fanout;
pub mod gate;
pub mod navigation;

pub use correlator::RequestResponseCorrelator;
pub use error::BridgeError;
pub use facade::BridgeFacade;
pub use fanout::EventFanout;
pub use gate::ConnectionGate;
pub use navigation::NavigationBridge;
