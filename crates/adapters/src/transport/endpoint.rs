// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::ConnectionError;

/// Host and port used when none is given on the command line
pub const DEFAULT_HOST_PORT: &str = "localhost:4000";

/// Path the hub serves its agent socket on
pub const SOCKET_PATH: &str = "/socket";

/// WebSocket URL of a hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    url: String,
}

impl Endpoint {
    /// Build `ws://<host[:port]>/socket` from a host with an optional port.
    ///
    /// A full `ws://` URL is accepted verbatim. `wss://` is rejected since
    /// the transport is built without TLS.
    pub fn parse(target: &str) -> Result<Self, ConnectionError> {
        let target = target.trim();
        if target.starts_with("wss://") {
            return Err(ConnectionError::InvalidEndpoint(format!(
                "{target}: wss:// is not supported"
            )));
        }
        if target.starts_with("ws://") {
            return Ok(Self {
                url: target.to_string(),
            });
        }

        let invalid = || ConnectionError::InvalidEndpoint(target.to_string());
        let host = match target.rsplit_once(':') {
            // `[::1]` has colons but no port
            Some((host, port)) if !port.ends_with(']') => {
                port.parse::<u16>().map_err(|_| invalid())?;
                host
            }
            _ => target,
        };
        if host.is_empty() || host.contains('/') || host.contains(char::is_whitespace) {
            return Err(invalid());
        }

        Ok(Self {
            url: format!("ws://{target}{SOCKET_PATH}"),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            url: format!("ws://{DEFAULT_HOST_PORT}{SOCKET_PATH}"),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;
