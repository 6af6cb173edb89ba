//! Helpers for reading `setSiteInfo` push payloads.
//!
//! A site-info push message looks like:
//!
//! ```json
//! {"cmd": "setSiteInfo", "params": {"address": "...", "event": ["file_done", "data/users.json"], ...}}
//! ```
//!
//! `params` is forwarded to the host wholesale.  The optional `params.event`
//! sequence additionally names what happened: its first element is a secondary
//! trigger marker that fires a dedicated host notification on top of the
//! always-sent site-info update.

use serde_json::Value;

/// Secondary trigger markers recognised in `params.event[0]`.
///
/// Each marker fires exactly one dedicated host channel; markers are
/// independent of each other and of the primary site-info forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteTrigger {
    /// The user's certificate selection changed.
    CertChanged,
    /// A site file finished writing.
    FileDone,
}

impl SiteTrigger {
    /// Maps a raw marker string onto the enumeration.
    ///
    /// Returns `None` for markers this crate does not recognise — the wrapper
    /// emits others (e.g. `file_failed`) that have no dedicated host channel.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "cert_changed" => Some(SiteTrigger::CertChanged),
            "file_done" => Some(SiteTrigger::FileDone),
            _ => None,
        }
    }
}

/// Borrows the `params` object out of a full site-info push message.
///
/// Returns `None` when the message carries no `params` field — such a push is
/// malformed but harmless, and callers simply skip forwarding it.
pub fn params(message: &Value) -> Option<&Value> {
    message.get("params")
}

/// Extracts the secondary trigger marker from a `params` object, if any.
///
/// The marker is the first element of `params.event`.  Absent, empty, or
/// non-string markers yield `None`, as do markers without a dedicated
/// channel.
pub fn trigger(params: &Value) -> Option<SiteTrigger> {
    params
        .get("event")?
        .as_array()?
        .first()?
        .as_str()
        .and_then(SiteTrigger::from_marker)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
