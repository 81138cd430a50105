// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adapters for the remote operator agent's external I/O

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod transport;

pub use transport::{
    ConnectionError, Connector, Endpoint, SendError, Transport, TransportEvent, WsConnector,
    WsTransport,
};

#[cfg(any(test, feature = "test-support"))]
pub use transport::{FakeConnector, FakeTransport, FakeTransportHandle};
