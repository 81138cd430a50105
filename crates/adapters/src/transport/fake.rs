// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted transport for testing the runtime without a network.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;
use wsop_wire::Message;

use super::{
    encode_frame, ConnectionError, Connector, Endpoint, SendError, Transport, TransportEvent,
};

struct FakeTransportState {
    events: VecDeque<TransportEvent>,
    /// Encoded frames, in send order
    sent: Vec<String>,
    open: bool,
    close_requested: bool,
    /// Scripted events are exhausted: wait instead of returning `None`
    hold_open: bool,
}

/// Fake transport that replays scripted events and records sent frames
pub struct FakeTransport {
    inner: Arc<Mutex<FakeTransportState>>,
    wake: Arc<Notify>,
}

/// Inspection/injection handle for a [`FakeTransport`]
#[derive(Clone)]
pub struct FakeTransportHandle {
    inner: Arc<Mutex<FakeTransportState>>,
    wake: Arc<Notify>,
}

impl FakeTransport {
    /// Transport that delivers `events` then reports end of stream.
    pub fn scripted(
        events: impl IntoIterator<Item = TransportEvent>,
    ) -> (Self, FakeTransportHandle) {
        Self::build(events, false)
    }

    /// Transport that delivers `events` then waits for injected events or a
    /// local `close()`.
    pub fn held_open(
        events: impl IntoIterator<Item = TransportEvent>,
    ) -> (Self, FakeTransportHandle) {
        Self::build(events, true)
    }

    fn build(
        events: impl IntoIterator<Item = TransportEvent>,
        hold_open: bool,
    ) -> (Self, FakeTransportHandle) {
        let inner = Arc::new(Mutex::new(FakeTransportState {
            events: events.into_iter().collect(),
            sent: Vec::new(),
            open: false,
            close_requested: false,
            hold_open,
        }));
        let wake = Arc::new(Notify::new());
        let handle = FakeTransportHandle {
            inner: Arc::clone(&inner),
            wake: Arc::clone(&wake),
        };
        (Self { inner, wake }, handle)
    }

    fn pop(&self) -> Option<TransportEvent> {
        let mut state = self.inner.lock();
        if let Some(event) = state.events.pop_front() {
            match event {
                TransportEvent::Opened => state.open = true,
                TransportEvent::Closed { .. } => state.open = false,
                _ => {}
            }
            return Some(event);
        }
        if state.close_requested && state.open {
            state.open = false;
            return Some(TransportEvent::Closed {
                code: Some(1000),
                reason: String::new(),
            });
        }
        None
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn next_event(&mut self) -> Option<TransportEvent> {
        loop {
            let notified = self.wake.notified();
            if let Some(event) = self.pop() {
                return Some(event);
            }
            let waiting = {
                let state = self.inner.lock();
                state.hold_open && state.open
            };
            if !waiting {
                return None;
            }
            notified.await;
        }
    }

    async fn send(&mut self, message: &Message) -> Result<(), SendError> {
        let frame = encode_frame(message)?;
        let mut state = self.inner.lock();
        if !state.open {
            return Err(SendError::NotOpen);
        }
        state.sent.push(frame);
        Ok(())
    }

    async fn close(&mut self) {
        self.inner.lock().close_requested = true;
        self.wake.notify_one();
    }
}

impl FakeTransportHandle {
    /// Raw frames sent so far
    pub fn sent_frames(&self) -> Vec<String> {
        self.inner.lock().sent.clone()
    }

    /// Sent frames decoded back into messages
    pub fn sent(&self) -> Vec<Message> {
        self.sent_frames()
            .iter()
            .filter_map(|f| wsop_wire::decode(f).ok())
            .collect()
    }

    /// Queue an event for a held-open transport
    pub fn push(&self, event: TransportEvent) {
        self.inner.lock().events.push_back(event);
        self.wake.notify_one();
    }

    pub fn close_requested(&self) -> bool {
        self.inner.lock().close_requested
    }
}

/// Fake connector handing out pre-built transports or errors, in order
#[derive(Clone)]
pub struct FakeConnector {
    attempts: Arc<Mutex<VecDeque<Result<FakeTransport, ConnectionError>>>>,
    connects: Arc<Mutex<Vec<Endpoint>>>,
}

impl FakeConnector {
    pub fn new(attempts: impl IntoIterator<Item = Result<FakeTransport, ConnectionError>>) -> Self {
        Self {
            attempts: Arc::new(Mutex::new(attempts.into_iter().collect())),
            connects: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Endpoints passed to `connect`, one per attempt
    pub fn connects(&self) -> Vec<Endpoint> {
        self.connects.lock().clone()
    }
}

#[async_trait]
impl Connector for FakeConnector {
    type Transport = FakeTransport;

    async fn connect(&self, endpoint: &Endpoint) -> Result<FakeTransport, ConnectionError> {
        self.connects.lock().push(endpoint.clone());
        self.attempts.lock().pop_front().unwrap_or_else(|| {
            Err(ConnectionError::Unreachable {
                endpoint: endpoint.to_string(),
                reason: "no scripted attempts left".to_string(),
            })
        })
    }
}
