// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the agent binary.
//!
//! Every variable is optional; unset means the built-in default.

use std::str::FromStr;
use std::time::Duration;

/// Agent id to register as (default `storm_amplifier`)
pub fn agent_id() -> Option<String> {
    std::env::var("WSOP_AGENT_ID")
        .ok()
        .filter(|s| !s.is_empty())
}

/// Bound on TCP connect plus WebSocket handshake
pub fn connect_timeout() -> Option<Duration> {
    parse::<u64>("WSOP_CONNECT_TIMEOUT_MS").map(Duration::from_millis)
}

/// Heartbeat ping interval; unset or 0 disables heartbeats
pub fn heartbeat() -> Option<Duration> {
    parse::<u64>("WSOP_HEARTBEAT_MS").filter(|ms| *ms > 0).map(Duration::from_millis)
}

/// Consecutive reconnect attempts after a failure; unset or 0 disables reconnecting
pub fn max_reconnects() -> u32 {
    parse::<u32>("WSOP_MAX_RECONNECTS").unwrap_or(0)
}

fn parse<T: FromStr>(name: &str) -> Option<T> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(name, value = %raw, "ignoring unparseable environment variable");
            None
        }
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
