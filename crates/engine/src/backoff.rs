// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconnect policy with exponential backoff.

use std::time::Duration;

pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_millis(500);
pub const DEFAULT_BACKOFF_MAX: Duration = Duration::from_secs(30);

/// How many times to reconnect and how long to wait in between.
///
/// `max_reconnects == 0` disables reconnecting: the agent serves one
/// connection and exits when it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Consecutive failed connection attempts tolerated before giving up
    pub max_reconnects: u32,
    pub base: Duration,
    pub max: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

impl ReconnectPolicy {
    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn new(max_reconnects: u32) -> Self {
        Self {
            max_reconnects,
            base: DEFAULT_BACKOFF_BASE,
            max: DEFAULT_BACKOFF_MAX,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_reconnects > 0
    }

    /// Whether another attempt is allowed after `failures` consecutive failures.
    pub fn allows(&self, failures: u32) -> bool {
        failures <= self.max_reconnects
    }

    /// Delay before the next attempt: `base * 2^failures`, capped at `max`.
    pub fn delay(&self, failures: u32) -> Duration {
        let factor = 2u32.checked_pow(failures).unwrap_or(u32::MAX);
        self.base
            .checked_mul(factor)
            .map_or(self.max, |d| d.min(self.max))
    }
}

#[cfg(test)]
#[path = "backoff_tests.rs"]
mod tests;
