// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent runtime against a real WebSocket hub.

use crate::prelude::*;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use wsop_adapters::{Endpoint, WsConnector};
use wsop_engine::{AgentConfig, ReconnectPolicy, Runtime, SessionEnd};

fn runtime_for(hub: &Hub) -> Runtime<WsConnector> {
    let endpoint = Endpoint::parse(&hub.target()).unwrap();
    Runtime::new(WsConnector::default(), AgentConfig::new(endpoint))
}

#[tokio::test]
async fn registers_then_answers_a_transform_request() {
    let hub = Hub::bind().await;
    let runtime = runtime_for(&hub);

    let hub_side = async {
        let mut conn = hub.accept().await;
        similar_asserts::assert_eq!(
            conn.recv_json().await,
            json!({
                "type": "register",
                "agent_id": "storm_amplifier",
                "capabilities": ["transform"]
            })
        );
        conn.send_json(json!({"type": "registered", "agent_id": "storm_amplifier"})).await;
        conn.send_json(json!({"type": "pong"})).await;
        conn.send_json(json!({"type": "broadcast", "text": "hello"})).await;
        conn.send_raw("{not json").await;
        conn.send_json(json!({"type": "transform", "request_id": "r1", "signal": {"values": {}}}))
            .await;

        let result = conn.recv_json().await;
        conn.close().await;
        result
    };

    let (end, result) = tokio::join!(runtime.run(CancellationToken::new()), hub_side);

    similar_asserts::assert_eq!(
        result,
        json!({
            "type": "transform_result",
            "request_id": "r1",
            "signal": {"values": {
                "storm_bringer": 0.35,
                "void_singer": 0.15,
                "spark_lord": 0.10,
                "quiet_tide": -0.20,
                "silk_shadow": -0.10
            }}
        })
    );
    assert!(matches!(end, Ok(SessionEnd::Closed { .. })), "got {end:?}");
}

#[tokio::test]
async fn clamps_and_preserves_unrelated_responders() {
    let hub = Hub::bind().await;
    let runtime = runtime_for(&hub);

    let hub_side = async {
        let mut conn = hub.accept().await;
        let _register = conn.recv_json().await;
        conn.send_json(json!({
            "type": "transform",
            "request_id": "r2",
            "signal": {
                "values": {"storm_bringer": 0.9, "quiet_tide": -0.95, "ember_witch": 0.4},
                "origin": "test"
            }
        }))
        .await;
        let result = conn.recv_json().await;
        conn.close().await;
        result
    };

    let (_end, result) = tokio::join!(runtime.run(CancellationToken::new()), hub_side);

    assert_eq!(result["request_id"], "r2");
    assert_eq!(result["signal"]["values"]["storm_bringer"], 1.0);
    assert_eq!(result["signal"]["values"]["quiet_tide"], -1.0);
    assert_eq!(result["signal"]["values"]["ember_witch"], 0.4);
    assert_eq!(result["signal"]["origin"], "test");
}

#[tokio::test]
async fn reconnects_and_registers_again() {
    let hub = Hub::bind().await;
    let endpoint = Endpoint::parse(&hub.target()).unwrap();
    let config = AgentConfig::new(endpoint).reconnect(ReconnectPolicy::new(3));
    let runtime = Runtime::new(WsConnector::default(), config);
    let shutdown = CancellationToken::new();

    let hub_side = async {
        let mut first = hub.accept().await;
        assert_eq!(first.recv_json().await["type"], "register");
        first.close().await;

        let mut second = hub.accept().await;
        assert_eq!(second.recv_json().await["type"], "register");
        shutdown.cancel();
        // Keep the connection alive until the agent closes it
        second.close().await;
    };

    let (end, ()) = tokio::join!(runtime.run(shutdown.clone()), hub_side);
    assert_eq!(end, Ok(SessionEnd::Shutdown));
}

#[tokio::test]
async fn refused_connection_is_reported() {
    let hub = Hub::bind().await;
    let target = hub.target();
    drop(hub);

    let endpoint = Endpoint::parse(&target).unwrap();
    let runtime = Runtime::new(WsConnector::default(), AgentConfig::new(endpoint));
    let end = runtime.run(CancellationToken::new()).await;
    assert!(end.is_err(), "got {end:?}");
}
