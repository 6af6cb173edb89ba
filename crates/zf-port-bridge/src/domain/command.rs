//! Host-facing command and response shapes.
//!
//! The host issues one [`HostCommand`] per outbound action.  When (and only
//! when) the command carries a `reqId`, the bridge eventually answers with
//! exactly one [`HostResponse`] bearing the same id — whether the remote
//! outcome was a success or a failure.  Commands without a `reqId` are pure
//! fire-and-forget.
//!
//! # JSON representation
//!
//! ```json
//! {"command": "fileGet", "args": ["data/users.json"], "reqId": "req-17"}
//! {"command": "wrapperNotification", "args": ["done", "Saved!"]}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use zf_core::RemoteResult;

/// One outbound host action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostCommand {
    /// Remote API operation name.  Not pre-validated by the bridge: an
    /// unknown name simply settles as a remote failure.
    pub command: String,

    /// Positional arguments, passed through opaquely.
    #[serde(default)]
    pub args: Vec<Value>,

    /// Caller-assigned correlation token.
    ///
    /// The bridge never interprets this value; it only carries it back on the
    /// response port once the invocation settles.  `None` means the host does
    /// not want an answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub req_id: Option<String>,
}

/// The bridge's answer to a correlated [`HostCommand`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostResponse {
    /// The correlation token from the originating command, unchanged.
    pub id: String,
    /// The settled remote outcome, success or failure alike.
    pub response: RemoteResult,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_deserializes_with_req_id() {
        let json = r#"{"command": "fileGet", "args": ["data/users.json"], "reqId": "req-17"}"#;
        let cmd: HostCommand = serde_json::from_str(json).unwrap();
        assert_eq!(cmd.command, "fileGet");
        assert_eq!(cmd.args, vec![json!("data/users.json")]);
        assert_eq!(cmd.req_id.as_deref(), Some("req-17"));
    }

    #[test]
    fn test_command_deserializes_without_req_id_or_args() {
        // Both fields are optional on the wire.
        let cmd: HostCommand = serde_json::from_str(r#"{"command": "siteInfo"}"#).unwrap();
        assert_eq!(cmd.command, "siteInfo");
        assert!(cmd.args.is_empty());
        assert_eq!(cmd.req_id, None);
    }

    #[test]
    fn test_command_serializes_req_id_in_camel_case() {
        let cmd = HostCommand {
            command: "ping".to_string(),
            args: vec![],
            req_id: Some("r1".to_string()),
        };
        let text = serde_json::to_string(&cmd).unwrap();
        assert!(text.contains(r#""reqId":"r1""#));
    }

    #[test]
    fn test_command_omits_absent_req_id_when_serializing() {
        let cmd = HostCommand {
            command: "ping".to_string(),
            args: vec![],
            req_id: None,
        };
        let text = serde_json::to_string(&cmd).unwrap();
        assert!(!text.contains("reqId"));
    }

    #[test]
    fn test_response_round_trips_through_json() {
        let original = HostResponse {
            id: "req-17".to_string(),
            response: RemoteResult::Failure(json!({"error": "Forbidden"})),
        };
        let text = serde_json::to_string(&original).unwrap();
        let decoded: HostResponse = serde_json::from_str(&text).unwrap();
        assert_eq!(original, decoded);
    }
}
