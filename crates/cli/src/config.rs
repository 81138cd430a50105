// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Assemble agent configuration from the command line and environment.

use std::time::Duration;

use wsop_adapters::transport::DEFAULT_CONNECT_TIMEOUT;
use wsop_adapters::{ConnectionError, Endpoint};
use wsop_engine::{AgentConfig, ReconnectPolicy};

use crate::env;

/// Everything the binary needs to start the agent
#[derive(Debug, Clone)]
pub struct Settings {
    pub agent: AgentConfig,
    pub connect_timeout: Duration,
}

impl Settings {
    /// Build settings for the hub at `target` (`host:port` or a `ws://` URL).
    pub fn load(target: &str) -> Result<Self, ConnectionError> {
        let mut agent = AgentConfig::new(Endpoint::parse(target)?)
            .reconnect(ReconnectPolicy::new(env::max_reconnects()));
        if let Some(agent_id) = env::agent_id() {
            agent = agent.agent_id(agent_id);
        }
        if let Some(interval) = env::heartbeat() {
            agent = agent.heartbeat(interval);
        }

        Ok(Self {
            agent,
            connect_timeout: env::connect_timeout().unwrap_or(DEFAULT_CONNECT_TIMEOUT),
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
