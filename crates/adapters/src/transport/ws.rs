// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket transport over tokio-tungstenite.
//!
//! Reads are pulled directly from the stream by `next_event`; writes go
//! through an mpsc channel to a single writer task, which keeps them FIFO.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::{self, Message as WsMessage};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use wsop_wire::Message;

use super::{
    encode_frame, ConnectionError, Connector, Endpoint, SendError, Transport, TransportEvent,
};

/// Default bound on TCP connect plus WebSocket handshake
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const OUTBOUND_CAPACITY: usize = 64;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connects to a hub over plain `ws://`.
#[derive(Debug, Clone)]
pub struct WsConnector {
    connect_timeout: Duration,
}

impl WsConnector {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }
}

impl Default for WsConnector {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_TIMEOUT)
    }
}

#[async_trait]
impl Connector for WsConnector {
    type Transport = WsTransport;

    async fn connect(&self, endpoint: &Endpoint) -> Result<WsTransport, ConnectionError> {
        WsTransport::connect(endpoint, self.connect_timeout).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Connected, `Opened` not yet delivered
    Connected,
    Open,
    /// Error delivered, `Closed` still owed
    Failed,
    Done,
}

/// A live WebSocket connection to the hub.
pub struct WsTransport {
    endpoint: Endpoint,
    read: SplitStream<WsStream>,
    outbound: mpsc::Sender<WsMessage>,
    phase: Phase,
}

impl WsTransport {
    /// Open a connection, bounded by `timeout`.
    pub async fn connect(endpoint: &Endpoint, timeout: Duration) -> Result<Self, ConnectionError> {
        tracing::debug!(%endpoint, ?timeout, "ws connect");
        let connect = tokio_tungstenite::connect_async(endpoint.url());
        let stream = match tokio::time::timeout(timeout, connect).await {
            Ok(Ok((stream, _response))) => stream,
            Ok(Err(e)) => return Err(map_connect_error(endpoint, e)),
            Err(_) => {
                return Err(ConnectionError::Timeout {
                    endpoint: endpoint.to_string(),
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                })
            }
        };

        let (write, read) = stream.split();
        let (outbound, outbound_rx) = mpsc::channel(OUTBOUND_CAPACITY);
        tokio::spawn(write_loop(endpoint.clone(), write, outbound_rx));

        tracing::info!(%endpoint, "ws connected");
        Ok(Self {
            endpoint: endpoint.clone(),
            read,
            outbound,
            phase: Phase::Connected,
        })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn next_event(&mut self) -> Option<TransportEvent> {
        match self.phase {
            Phase::Connected => {
                self.phase = Phase::Open;
                return Some(TransportEvent::Opened);
            }
            Phase::Failed => {
                self.phase = Phase::Done;
                return Some(TransportEvent::Closed {
                    code: None,
                    reason: String::new(),
                });
            }
            Phase::Done => return None,
            Phase::Open => {}
        }

        loop {
            match self.read.next().await {
                Some(Ok(WsMessage::Text(text))) => {
                    return Some(TransportEvent::Message(text.as_str().to_string()));
                }
                Some(Ok(WsMessage::Close(frame))) => {
                    self.phase = Phase::Done;
                    let (code, reason) = match frame {
                        Some(f) => (Some(u16::from(f.code)), f.reason.as_str().to_string()),
                        None => (None, String::new()),
                    };
                    return Some(TransportEvent::Closed { code, reason });
                }
                // Binary/Ping/Pong/Frame — tungstenite answers pings itself
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    self.phase = Phase::Failed;
                    return Some(TransportEvent::Error(ConnectionError::Lost(e.to_string())));
                }
                None => {
                    self.phase = Phase::Done;
                    return Some(TransportEvent::Closed {
                        code: None,
                        reason: "stream ended".to_string(),
                    });
                }
            }
        }
    }

    async fn send(&mut self, message: &Message) -> Result<(), SendError> {
        if self.phase == Phase::Done || self.phase == Phase::Failed {
            return Err(SendError::NotOpen);
        }
        let text = encode_frame(message)?;
        self.outbound
            .send(WsMessage::Text(text.into()))
            .await
            .map_err(|_| SendError::NotOpen)
    }

    async fn close(&mut self) {
        let frame = CloseFrame {
            code: CloseCode::Normal,
            reason: "".into(),
        };
        if self.outbound.send(WsMessage::Close(Some(frame))).await.is_err() {
            tracing::debug!(endpoint = %self.endpoint, "ws close: writer already gone");
        }
    }
}

async fn write_loop(
    endpoint: Endpoint,
    mut write: SplitSink<WsStream, WsMessage>,
    mut outbound_rx: mpsc::Receiver<WsMessage>,
) {
    while let Some(frame) = outbound_rx.recv().await {
        let closing = matches!(frame, WsMessage::Close(_));
        if let Err(e) = write.send(frame).await {
            tracing::warn!(%endpoint, error = %e, "ws writer: send failed");
            break;
        }
        if closing {
            break;
        }
    }
    tracing::debug!(%endpoint, "ws writer: exiting");
}

fn map_connect_error(endpoint: &Endpoint, error: tungstenite::Error) -> ConnectionError {
    let endpoint = endpoint.to_string();
    match error {
        tungstenite::Error::Url(e) => ConnectionError::InvalidEndpoint(format!("{endpoint}: {e}")),
        tungstenite::Error::Io(e) => ConnectionError::Unreachable {
            endpoint,
            reason: e.to_string(),
        },
        e @ (tungstenite::Error::Http(_)
        | tungstenite::Error::HttpFormat(_)
        | tungstenite::Error::Protocol(_)) => ConnectionError::Handshake {
            endpoint,
            reason: e.to_string(),
        },
        e => ConnectionError::Unreachable {
            endpoint,
            reason: e.to_string(),
        },
    }
}

#[cfg(test)]
#[path = "ws_tests.rs"]
mod tests;
