// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Transport connector
//!
//! A `Transport` owns one persistent bidirectional connection to the hub.
//! Lifecycle events are pulled one at a time with [`Transport::next_event`],
//! so whoever drives the loop sees them serially and in arrival order:
//!
//! ```text
//! Opened ─► Message* ─► [Error] ─► Closed ─► (None)
//! ```
//!
//! A `Connector` produces transports, which lets the runtime reconnect
//! without knowing which transport it is talking to.

mod endpoint;
mod ws;

pub use endpoint::{Endpoint, DEFAULT_HOST_PORT, SOCKET_PATH};
pub use ws::{WsConnector, WsTransport, DEFAULT_CONNECT_TIMEOUT};

use async_trait::async_trait;
use thiserror::Error;
use wsop_wire::Message;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeConnector, FakeTransport, FakeTransportHandle};

/// Errors establishing or maintaining the connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("invalid endpoint {0:?}")]
    InvalidEndpoint(String),
    #[error("cannot reach {endpoint}: {reason}")]
    Unreachable { endpoint: String, reason: String },
    #[error("connecting to {endpoint} timed out after {timeout_ms}ms")]
    Timeout { endpoint: String, timeout_ms: u64 },
    #[error("websocket handshake with {endpoint} failed: {reason}")]
    Handshake { endpoint: String, reason: String },
    #[error("connection lost: {0}")]
    Lost(String),
}

/// Errors writing a frame
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SendError {
    #[error("connection is not open")]
    NotOpen,
    #[error("cannot encode frame: {0}")]
    Encode(String),
}

/// Connection lifecycle event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// Connection established; always the first event
    Opened,
    /// Inbound text frame
    Message(String),
    /// Transport-level failure; followed by `Closed`
    Error(ConnectionError),
    /// Connection closed; no further events follow
    Closed { code: Option<u16>, reason: String },
}

/// One open connection to the hub.
#[async_trait]
pub trait Transport: Send + 'static {
    /// Next lifecycle event, or `None` once `Closed` has been delivered.
    async fn next_event(&mut self) -> Option<TransportEvent>;

    /// Encode and enqueue one text frame. Frames go out in call order.
    async fn send(&mut self, message: &Message) -> Result<(), SendError>;

    /// Begin a normal close. `Closed` is still delivered through `next_event`.
    async fn close(&mut self);
}

/// Factory for transports, one per connection attempt.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Transport: Transport;

    async fn connect(&self, endpoint: &Endpoint) -> Result<Self::Transport, ConnectionError>;
}

pub(crate) fn encode_frame(message: &Message) -> Result<String, SendError> {
    wsop_wire::encode(message).map_err(|e| SendError::Encode(e.to_string()))
}
