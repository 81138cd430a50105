// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};
use wsop_core::{AgentId, Capabilities, RequestId, Signal};

/// Frame exchanged between an agent and the hub
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// Agent → hub: announce id and capabilities (sent on open)
    Register {
        agent_id: AgentId,
        capabilities: Capabilities,
    },

    /// Hub → agent: registration acknowledged
    Registered { agent_id: AgentId },

    /// Hub → agent: transform this signal
    Transform {
        request_id: RequestId,
        signal: Signal,
    },

    /// Agent → hub: transformed signal, echoing the request id
    TransformResult {
        request_id: RequestId,
        signal: Signal,
    },

    /// Agent → hub: heartbeat
    Ping,

    /// Hub → agent: heartbeat reply
    Pong,

    /// Inbound frame with a `type` this agent does not know.
    ///
    /// Produced by [`crate::decode`] only; never sent.
    #[serde(skip)]
    Unknown { kind: String },
}

impl Message {
    /// Every `type` tag this protocol defines.
    pub const KINDS: [&'static str; 6] =
        ["register", "registered", "transform", "transform_result", "ping", "pong"];

    pub fn register(agent_id: AgentId, capabilities: Capabilities) -> Self {
        Message::Register {
            agent_id,
            capabilities,
        }
    }

    pub fn transform_result(request_id: RequestId, signal: Signal) -> Self {
        Message::TransformResult { request_id, signal }
    }

    /// The wire `type` tag of this message.
    pub fn kind(&self) -> &str {
        match self {
            Message::Register { .. } => "register",
            Message::Registered { .. } => "registered",
            Message::Transform { .. } => "transform",
            Message::TransformResult { .. } => "transform_result",
            Message::Ping => "ping",
            Message::Pong => "pong",
            Message::Unknown { kind } => kind,
        }
    }

    pub fn is_known_kind(kind: &str) -> bool {
        Self::KINDS.contains(&kind)
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
