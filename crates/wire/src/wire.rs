// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON text-frame encoding and decoding.

use thiserror::Error;

use crate::Message;

/// Characters of a frame shown in log previews
pub const PREVIEW_CHARS: usize = 100;

/// Inbound frame could not be turned into a [`Message`]
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("frame is not valid JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("frame is not a JSON object")]
    NotAnObject,

    #[error("frame has no string `type` field")]
    MissingType,

    #[error("invalid `{kind}` frame: {source}")]
    Invalid {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Outbound message could not be serialized
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("`{0}` messages are inbound-only and cannot be encoded")]
    Unencodable(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Encode a message as a JSON text frame.
pub fn encode(message: &Message) -> Result<String, EncodeError> {
    if let Message::Unknown { kind } = message {
        return Err(EncodeError::Unencodable(kind.clone()));
    }
    Ok(serde_json::to_string(message)?)
}

/// Decode a JSON text frame.
///
/// A frame whose `type` is not one this protocol defines decodes to
/// [`Message::Unknown`] rather than failing, so newer hubs can add message
/// kinds without breaking older agents. A known `type` with missing or
/// mistyped fields is a [`DecodeError::Invalid`].
pub fn decode(frame: &str) -> Result<Message, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(frame).map_err(DecodeError::Json)?;
    let kind = match &value {
        serde_json::Value::Object(map) => {
            map.get("type")
                .and_then(|v| v.as_str())
                .ok_or(DecodeError::MissingType)?
        }
        _ => return Err(DecodeError::NotAnObject),
    };

    if !Message::is_known_kind(kind) {
        return Ok(Message::Unknown {
            kind: kind.to_string(),
        });
    }

    let kind = kind.to_string();
    serde_json::from_value(value).map_err(|source| DecodeError::Invalid { kind, source })
}

/// First [`PREVIEW_CHARS`] characters of a frame, for logging.
pub fn preview(frame: &str) -> &str {
    wsop_core::short(frame, PREVIEW_CHARS)
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
