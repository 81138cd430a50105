// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! wsop-engine: message handling and the agent event loop

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod backoff;
mod handler;
mod runtime;

pub use backoff::{ReconnectPolicy, DEFAULT_BACKOFF_BASE, DEFAULT_BACKOFF_MAX};
pub use handler::Handler;
pub use runtime::{AgentConfig, Runtime, SessionEnd, CLOSE_GRACE, DEFAULT_AGENT_ID};
