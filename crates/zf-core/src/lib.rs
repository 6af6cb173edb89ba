//! # zf-core
//!
//! Shared library for the ZeroFrame port bridge containing the wire frame
//! types, the JSON codec, and the site-event vocabulary.
//!
//! This crate is used by the bridge itself and by any transport collaborator
//! that needs to speak the wrapper channel's frame format.  It has zero
//! dependencies on async runtimes, sockets, or the host application.
//!
//! # Architecture overview
//!
//! A sandboxed site talks to its wrapper through a single message channel.
//! Every message on that channel is a JSON object with a `cmd` discriminant:
//!
//! - **Invocations** travel outward as `{"cmd": <name>, "id": <n>, "params": [...]}`.
//! - **Responses** travel inward as `{"cmd": "response", "to": <n>, "result": ...}`,
//!   where `to` names the invocation being answered.
//! - **Push events** travel inward as `{"cmd": <name>, "params": ...}` with no
//!   `to` field — they are unsolicited notifications, not answers.
//! - The wrapper announces channel readiness with the reserved
//!   `wrapperOpenedWebsocket` command.
//!
//! This crate defines:
//!
//! - **`protocol`** – the frame structs, the `RemoteResult` outcome type, the
//!   JSON encode/decode functions, and the invoke-id sequence counter.
//! - **`domain`** – the closed enumeration of known event names (with an open
//!   extension point for unknown ones) and the site-info payload helpers.

pub mod domain;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `zf_core::InboundFrame` instead of `zf_core::protocol::frames::InboundFrame`.
pub use domain::events::{EventName, CMD_OPENED, CMD_PUSH_STATE, CMD_SITE_INFO};
pub use domain::siteinfo::SiteTrigger;
pub use protocol::codec::{decode_frame, encode_frame, ProtocolError};
pub use protocol::frames::{CommandFrame, InboundFrame, RemoteResult};
pub use protocol::sequence::InvokeSequence;
