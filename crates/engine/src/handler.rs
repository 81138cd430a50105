// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent message handler: pure dispatch over inbound messages.

use wsop_core::{transform_signal, AgentId, Capabilities};
use wsop_wire::Message;

/// Stateless dispatcher for one agent identity.
#[derive(Debug, Clone)]
pub struct Handler {
    agent_id: AgentId,
    capabilities: Capabilities,
}

impl Handler {
    pub fn new(agent_id: AgentId, capabilities: Capabilities) -> Self {
        Self {
            agent_id,
            capabilities,
        }
    }

    pub fn agent_id(&self) -> &AgentId {
        &self.agent_id
    }

    /// Registration frame sent as soon as a connection opens.
    pub fn register(&self) -> Message {
        Message::register(self.agent_id.clone(), self.capabilities.clone())
    }

    /// React to one inbound message, returning the reply to send, if any.
    pub fn handle(&self, message: Message) -> Option<Message> {
        match message {
            Message::Transform { request_id, signal } => {
                let signal = transform_signal(signal);
                tracing::info!(%request_id, "→ transform_result");
                Some(Message::transform_result(request_id, signal))
            }
            Message::Registered { agent_id } => {
                if agent_id != self.agent_id {
                    tracing::warn!(
                        expected = %self.agent_id,
                        %agent_id,
                        "hub acknowledged a different agent id"
                    );
                }
                tracing::info!(%agent_id, "✓ registered");
                None
            }
            Message::Pong => None,
            Message::Unknown { kind } => {
                tracing::debug!(%kind, "ignoring unknown message type");
                None
            }
            // Agent → hub kinds have no meaning inbound
            other @ (Message::Register { .. }
            | Message::TransformResult { .. }
            | Message::Ping) => {
                tracing::debug!(kind = other.kind(), "ignoring outbound-only message");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "handler_tests.rs"]
mod tests;
