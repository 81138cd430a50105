// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent runtime: drives one connection at a time through the handler.
//!
//! Events are consumed serially from the transport; each inbound frame is
//! decoded, dispatched, and its reply (if any) sent before the next event is
//! read. Nothing is carried between frames.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use wsop_adapters::{ConnectionError, Connector, Endpoint, Transport, TransportEvent};
use wsop_core::{AgentId, Capabilities};
use wsop_wire::{decode, preview, Message};

use crate::backoff::ReconnectPolicy;
use crate::handler::Handler;

/// Agent id used when none is configured
pub const DEFAULT_AGENT_ID: &str = "storm_amplifier";

/// How long to wait for the hub to acknowledge a local close
pub const CLOSE_GRACE: Duration = Duration::from_secs(2);

/// Agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub endpoint: Endpoint,
    pub agent_id: AgentId,
    pub capabilities: Capabilities,
    /// Send `ping` at this interval while connected
    pub heartbeat: Option<Duration>,
    pub reconnect: ReconnectPolicy,
}

impl AgentConfig {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            agent_id: AgentId::new(DEFAULT_AGENT_ID),
            capabilities: Capabilities::transform_only(),
            heartbeat: None,
            reconnect: ReconnectPolicy::disabled(),
        }
    }

    wsop_core::setters! {
        into {
            agent_id: AgentId,
        }
        set {
            capabilities: Capabilities,
            reconnect: ReconnectPolicy,
        }
        option {
            heartbeat: Duration,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(Endpoint::default())
    }
}

/// How a single connection ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// Hub closed the connection (or the stream ended)
    Closed { code: Option<u16>, reason: String },
    /// A transport error ended the connection
    Failed(ConnectionError),
    /// Local shutdown was requested
    Shutdown,
}

enum Step {
    Event(Option<TransportEvent>),
    Shutdown,
    Heartbeat,
    CloseTimeout,
}

/// Runs the agent against connections produced by `C`.
pub struct Runtime<C: Connector> {
    connector: C,
    config: AgentConfig,
    handler: Handler,
}

impl<C: Connector> Runtime<C> {
    pub fn new(connector: C, config: AgentConfig) -> Self {
        let handler = Handler::new(config.agent_id.clone(), config.capabilities.clone());
        Self {
            connector,
            config,
            handler,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Connect and serve until shutdown, or until the connection ends and the
    /// reconnect policy is exhausted.
    ///
    /// Returns `Err` only when a connection attempt fails and no further
    /// attempts are allowed.
    pub async fn run(&self, shutdown: CancellationToken) -> Result<SessionEnd, ConnectionError> {
        let endpoint = &self.config.endpoint;
        let policy = self.config.reconnect;
        let mut failures: u32 = 0;

        loop {
            let attempt = tokio::select! {
                result = self.connector.connect(endpoint) => result,
                _ = shutdown.cancelled() => return Ok(SessionEnd::Shutdown),
            };

            match attempt {
                Ok(mut transport) => {
                    failures = 0;
                    let end = self.serve(&mut transport, &shutdown).await;
                    if end == SessionEnd::Shutdown || !policy.is_enabled() {
                        return Ok(end);
                    }
                    tracing::warn!(?end, "connection ended");
                }
                Err(e) => {
                    failures += 1;
                    if !policy.allows(failures) {
                        tracing::error!(%endpoint, error = %e, "connection failed");
                        return Err(e);
                    }
                    tracing::warn!(%endpoint, error = %e, failures, "connection attempt failed");
                }
            }

            let delay = policy.delay(failures);
            tracing::info!(%endpoint, ?delay, "reconnecting");
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = shutdown.cancelled() => return Ok(SessionEnd::Shutdown),
            }
        }
    }

    /// Serve one open transport until it closes or shutdown is requested.
    pub async fn serve<T: Transport>(
        &self,
        transport: &mut T,
        shutdown: &CancellationToken,
    ) -> SessionEnd {
        let mut heartbeat = self.config.heartbeat.map(heartbeat_interval);
        let mut close_deadline: Option<Instant> = None;
        let mut last_error: Option<ConnectionError> = None;
        let mut open = false;

        loop {
            let step = tokio::select! {
                event = transport.next_event() => Step::Event(event),
                _ = shutdown.cancelled(), if close_deadline.is_none() => Step::Shutdown,
                _ = tick(&mut heartbeat), if open && close_deadline.is_none() => Step::Heartbeat,
                _ = sleep_until(close_deadline), if close_deadline.is_some() => Step::CloseTimeout,
            };

            match step {
                Step::Event(Some(TransportEvent::Opened)) => {
                    open = true;
                    tracing::info!(
                        endpoint = %self.config.endpoint,
                        agent_id = %self.handler.agent_id(),
                        "→ registering"
                    );
                    self.send(transport, &self.handler.register()).await;
                }
                Step::Event(Some(TransportEvent::Message(text))) => {
                    self.on_frame(transport, &text).await;
                }
                Step::Event(Some(TransportEvent::Error(e))) => {
                    tracing::warn!(error = %e, "transport error");
                    last_error = Some(e);
                }
                Step::Event(Some(TransportEvent::Closed { code, reason })) => {
                    tracing::info!(?code, %reason, "connection closed");
                    return if close_deadline.is_some() {
                        SessionEnd::Shutdown
                    } else if let Some(e) = last_error {
                        SessionEnd::Failed(e)
                    } else {
                        SessionEnd::Closed { code, reason }
                    };
                }
                Step::Event(None) => {
                    return if close_deadline.is_some() {
                        SessionEnd::Shutdown
                    } else if let Some(e) = last_error {
                        SessionEnd::Failed(e)
                    } else {
                        SessionEnd::Closed {
                            code: None,
                            reason: "stream ended".to_string(),
                        }
                    };
                }
                Step::Shutdown => {
                    tracing::info!("shutdown requested, closing connection");
                    close_deadline = Some(Instant::now() + CLOSE_GRACE);
                    transport.close().await;
                }
                Step::Heartbeat => {
                    self.send(transport, &Message::Ping).await;
                }
                Step::CloseTimeout => {
                    tracing::warn!(grace = ?CLOSE_GRACE, "hub did not acknowledge close");
                    return SessionEnd::Shutdown;
                }
            }
        }
    }

    async fn on_frame<T: Transport>(&self, transport: &mut T, text: &str) {
        let message = match decode(text) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, frame = preview(text), "dropping malformed frame");
                return;
            }
        };
        tracing::info!(kind = message.kind(), frame = preview(text), "←");

        if let Some(reply) = self.handler.handle(message) {
            self.send(transport, &reply).await;
        }
    }

    async fn send<T: Transport>(&self, transport: &mut T, message: &Message) {
        if let Err(e) = transport.send(message).await {
            tracing::warn!(kind = message.kind(), error = %e, "send failed");
        }
    }
}

fn heartbeat_interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
