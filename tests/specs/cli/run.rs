// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `wsop <host:port>` end to end against an in-process hub.

use crate::prelude::*;
use serde_json::json;

#[tokio::test(flavor = "multi_thread")]
async fn answers_transform_and_exits_zero_when_hub_closes() {
    let hub = Hub::bind().await;
    let target = hub.target();
    let agent = tokio::task::spawn_blocking(move || {
        cli()
            .args(&[target.as_str()])
            .passes()
            .stderr_has("registered");
    });

    let mut conn = hub.accept().await;
    let register = conn.recv_json().await;
    assert_eq!(register["type"], "register");
    assert_eq!(register["agent_id"], "storm_amplifier");
    assert_eq!(register["capabilities"], json!(["transform"]));

    conn.send_json(json!({"type": "registered", "agent_id": "storm_amplifier"})).await;
    conn.send_json(json!({
        "type": "transform",
        "request_id": "abc",
        "signal": {"values": {"storm_bringer": 0.9}}
    }))
    .await;
    let result = conn.recv_json().await;
    assert_eq!(result["type"], "transform_result");
    assert_eq!(result["request_id"], "abc");
    assert_eq!(result["signal"]["values"]["storm_bringer"], 1.0);

    conn.close().await;
    agent.await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn agent_id_comes_from_environment() {
    let hub = Hub::bind().await;
    let target = hub.target();
    let agent = tokio::task::spawn_blocking(move || {
        cli()
            .env("WSOP_AGENT_ID", "void_amplifier")
            .args(&[target.as_str()])
            .passes();
    });

    let mut conn = hub.accept().await;
    assert_eq!(conn.recv_json().await["agent_id"], "void_amplifier");
    conn.close().await;
    agent.await.unwrap();
}

#[tokio::test]
async fn refused_connection_exits_one() {
    let hub = Hub::bind().await;
    let target = hub.target();
    drop(hub);

    tokio::task::spawn_blocking(move || {
        cli()
            .args(&[target.as_str()])
            .exits_with(1)
            .stderr_has("Error:");
    })
    .await
    .unwrap();
}

#[test]
fn malformed_target_exits_two() {
    cli()
        .args(&["hub:http"])
        .exits_with(2)
        .stderr_has("invalid endpoint");
}

#[test]
fn tls_target_exits_two() {
    cli()
        .args(&["wss://hub.example/socket"])
        .exits_with(2)
        .stderr_has("wss:// is not supported");
}
