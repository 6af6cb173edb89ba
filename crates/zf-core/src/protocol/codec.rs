//! JSON codec for wrapper channel frames.
//!
//! Wire format: each frame is one JSON object.  The `cmd` field is the
//! discriminant:
//!
//! ```text
//! {"cmd": "response", "to": 3, "result": ...}        → InboundFrame::Response
//! {"cmd": "wrapperOpenedWebsocket"}                  → InboundFrame::ChannelOpened
//! {"cmd": "setSiteInfo", "params": {...}}            → InboundFrame::Push
//! ```
//!
//! How the JSON text itself is framed on the underlying transport (message
//! boundaries, handshakes) is the transport collaborator's concern; this
//! module only maps between one complete JSON object and one typed frame.

use serde_json::Value;
use thiserror::Error;

use crate::domain::events::CMD_OPENED;
use crate::protocol::frames::{CommandFrame, InboundFrame, RemoteResult};

/// Errors that can occur while decoding or encoding a frame.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The frame text parsed but was not a JSON object.
    #[error("frame is not a JSON object: {0}")]
    NotAnObject(Value),

    /// A required field is absent from the frame object.
    #[error("frame missing required field `{0}`")]
    MissingField(&'static str),

    /// A field is present but has the wrong JSON type.
    #[error("frame field `{field}` has invalid value: {value}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// The value actually found there.
        value: Value,
    },

    /// The frame text is not valid JSON at all.
    #[error("frame is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes an outbound [`CommandFrame`] to its JSON text representation.
///
/// # Errors
///
/// Returns [`ProtocolError::Json`] if serialization fails (practically
/// impossible for `CommandFrame`, but the signature stays honest).
pub fn encode_frame(frame: &CommandFrame) -> Result<String, ProtocolError> {
    Ok(serde_json::to_string(frame)?)
}

/// Decodes one JSON frame from the wrapper channel into an [`InboundFrame`].
///
/// The `cmd` field selects the variant: `"response"` frames must carry a
/// numeric `to` and a `result`; the reserved channel-open command maps to
/// [`InboundFrame::ChannelOpened`]; every other command name becomes a
/// [`InboundFrame::Push`] carrying the whole frame object as its message.
///
/// # Errors
///
/// Returns a [`ProtocolError`] if the text is not valid JSON, is not an
/// object, lacks a `cmd` field, or is a response frame with a missing or
/// non-numeric `to` field.
pub fn decode_frame(text: &str) -> Result<InboundFrame, ProtocolError> {
    let value: Value = serde_json::from_str(text)?;

    let obj = match value.as_object() {
        Some(obj) => obj,
        None => return Err(ProtocolError::NotAnObject(value)),
    };

    let cmd = obj
        .get("cmd")
        .ok_or(ProtocolError::MissingField("cmd"))?
        .as_str()
        .ok_or_else(|| ProtocolError::InvalidField {
            field: "cmd",
            value: obj["cmd"].clone(),
        })?;

    match cmd {
        "response" => {
            let to = obj
                .get("to")
                .ok_or(ProtocolError::MissingField("to"))?
                .as_u64()
                .ok_or_else(|| ProtocolError::InvalidField {
                    field: "to",
                    value: obj["to"].clone(),
                })?;

            // A response without a `result` field settles as a null success —
            // the wrapper omits the field for void commands.
            let result = obj.get("result").cloned().unwrap_or(Value::Null);

            Ok(InboundFrame::Response {
                to,
                result: RemoteResult::from_wire(result),
            })
        }

        CMD_OPENED => Ok(InboundFrame::ChannelOpened),

        _ => Ok(InboundFrame::Push {
            cmd: cmd.to_string(),
            message: value.clone(),
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_response_frame() {
        let frame = decode_frame(r#"{"cmd":"response","to":3,"result":"ok"}"#).unwrap();
        match frame {
            InboundFrame::Response { to, result } => {
                assert_eq!(to, 3);
                assert!(result.is_success());
                assert_eq!(result.payload(), &json!("ok"));
            }
            other => panic!("expected Response, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_response_frame_with_error_result_is_failure() {
        let frame =
            decode_frame(r#"{"cmd":"response","to":9,"result":{"error":"Forbidden"}}"#).unwrap();
        match frame {
            InboundFrame::Response { to, result } => {
                assert_eq!(to, 9);
                assert!(!result.is_success());
            }
            other => panic!("expected Response, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_response_without_result_field_is_null_success() {
        let frame = decode_frame(r#"{"cmd":"response","to":1}"#).unwrap();
        match frame {
            InboundFrame::Response { result, .. } => {
                assert!(result.is_success());
                assert_eq!(result.payload(), &Value::Null);
            }
            other => panic!("expected Response, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_channel_opened_frame() {
        let frame = decode_frame(r#"{"cmd":"wrapperOpenedWebsocket"}"#).unwrap();
        assert_eq!(frame, InboundFrame::ChannelOpened);
    }

    #[test]
    fn test_decode_push_frame_carries_whole_message() {
        let frame =
            decode_frame(r#"{"cmd":"setSiteInfo","params":{"address":"1abc"}}"#).unwrap();
        match frame {
            InboundFrame::Push { cmd, message } => {
                assert_eq!(cmd, "setSiteInfo");
                // The message is the whole frame object, not just `params`.
                assert_eq!(message["params"]["address"], json!("1abc"));
                assert_eq!(message["cmd"], json!("setSiteInfo"));
            }
            other => panic!("expected Push, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_command_is_still_a_push() {
        // Unknown event names must not be rejected — they are the open
        // extension point for wrapper commands this crate does not know about.
        let frame = decode_frame(r#"{"cmd":"announcerInfo","params":{}}"#).unwrap();
        assert!(matches!(frame, InboundFrame::Push { ref cmd, .. } if cmd == "announcerInfo"));
    }

    #[test]
    fn test_decode_invalid_json_returns_error() {
        let result = decode_frame("{not json");
        assert!(matches!(result, Err(ProtocolError::Json(_))));
    }

    #[test]
    fn test_decode_non_object_returns_error() {
        let result = decode_frame(r#"[1,2,3]"#);
        assert!(matches!(result, Err(ProtocolError::NotAnObject(_))));
    }

    #[test]
    fn test_decode_missing_cmd_returns_error() {
        let result = decode_frame(r#"{"params":{}}"#);
        assert!(matches!(result, Err(ProtocolError::MissingField("cmd"))));
    }

    #[test]
    fn test_decode_response_missing_to_returns_error() {
        let result = decode_frame(r#"{"cmd":"response","result":"ok"}"#);
        assert!(matches!(result, Err(ProtocolError::MissingField("to"))));
    }

    #[test]
    fn test_decode_response_non_numeric_to_returns_error() {
        let result = decode_frame(r#"{"cmd":"response","to":"three","result":"ok"}"#);
        assert!(matches!(
            result,
            Err(ProtocolError::InvalidField { field: "to", .. })
        ));
    }

    #[test]
    fn test_encode_command_frame_decodable_as_json() {
        let frame = CommandFrame {
            cmd: "fileGet".to_string(),
            id: 12,
            params: vec![json!("content.json"), json!(true)],
        };
        let text = encode_frame(&frame).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["cmd"], json!("fileGet"));
        assert_eq!(value["id"], json!(12));
        assert_eq!(value["params"][0], json!("content.json"));
    }
}
