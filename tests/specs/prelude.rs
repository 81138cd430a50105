// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: a scripted in-process hub and a CLI command builder.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::WebSocketStream;

/// Upper bound for any single hub-side wait
pub const HUB_TIMEOUT: Duration = Duration::from_secs(10);

/// Hub side of one agent connection
pub struct HubConn {
    ws: WebSocketStream<TcpStream>,
}

impl HubConn {
    /// Next text frame from the agent, parsed as JSON
    pub async fn recv_json(&mut self) -> serde_json::Value {
        loop {
            let frame = tokio::time::timeout(HUB_TIMEOUT, self.ws.next())
                .await
                .expect("timed out waiting for agent frame")
                .expect("agent hung up")
                .expect("websocket error");
            if let WsMessage::Text(text) = frame {
                return serde_json::from_str(text.as_str()).expect("agent sent invalid JSON");
            }
        }
    }

    pub async fn send_json(&mut self, value: serde_json::Value) {
        self.send_raw(&value.to_string()).await;
    }

    pub async fn send_raw(&mut self, text: &str) {
        self.ws
            .send(WsMessage::Text(text.to_string().into()))
            .await
            .expect("hub send failed");
    }

    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
        // Drain until the agent acknowledges
        while let Ok(Some(Ok(_))) = tokio::time::timeout(HUB_TIMEOUT, self.ws.next()).await {}
    }
}

/// Listening hub on an ephemeral localhost port
pub struct Hub {
    listener: TcpListener,
    addr: SocketAddr,
}

impl Hub {
    pub async fn bind() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
        let addr = listener.local_addr().expect("no local addr");
        Self { listener, addr }
    }

    /// `host:port` as the CLI expects it
    pub fn target(&self) -> String {
        self.addr.to_string()
    }

    /// Accept the next agent, asserting it asked for `/socket`
    pub async fn accept(&self) -> HubConn {
        use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};

        let (stream, _) = tokio::time::timeout(HUB_TIMEOUT, self.listener.accept())
            .await
            .expect("timed out waiting for agent")
            .expect("accept failed");
        let check_path = |req: &Request, resp: Response| {
            assert_eq!(req.uri().path(), "/socket");
            Ok::<_, ErrorResponse>(resp)
        };
        let ws = tokio_tungstenite::accept_hdr_async(stream, check_path)
            .await
            .expect("handshake failed");
        HubConn { ws }
    }
}

// ── CLI ─────────────────────────────────────────────────────────────────────

pub struct CliRun {
    assert: assert_cmd::assert::Assert,
}

pub struct CliBuilder {
    cmd: assert_cmd::Command,
}

const WSOP_VARS: [&str; 4] = [
    "WSOP_AGENT_ID",
    "WSOP_CONNECT_TIMEOUT_MS",
    "WSOP_HEARTBEAT_MS",
    "WSOP_MAX_RECONNECTS",
];

/// `wsop` with a clean environment
pub fn cli() -> CliBuilder {
    let mut cmd = assert_cmd::Command::cargo_bin("wsop").expect("wsop binary not built");
    for var in WSOP_VARS {
        cmd.env_remove(var);
    }
    cmd.timeout(HUB_TIMEOUT);
    CliBuilder { cmd }
}

impl CliBuilder {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn passes(mut self) -> CliRun {
        CliRun {
            assert: self.cmd.assert().success(),
        }
    }

    pub fn exits_with(mut self, code: i32) -> CliRun {
        CliRun {
            assert: self.cmd.assert().code(code),
        }
    }
}

impl CliRun {
    pub fn stdout_has(self, needle: &str) -> Self {
        let output = self.assert.get_output();
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let output = self.assert.get_output();
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
        self
    }
}
