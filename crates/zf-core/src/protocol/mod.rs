//! Wire protocol for the wrapper message channel.
//!
//! The channel carries line-of-sight JSON objects in both directions.  This
//! module defines the typed frame representations ([`frames`]), the functions
//! that move between JSON text and those types ([`codec`]), and the atomic
//! counter that allocates invocation ids ([`sequence`]).

pub mod codec;
pub mod frames;
pub mod sequence;

pub use codec::{decode_frame, encode_frame, ProtocolError};
pub use frames::{CommandFrame, InboundFrame, RemoteResult};
pub use sequence::InvokeSequence;
