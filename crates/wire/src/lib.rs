// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Hub protocol for the remote operator agent.
//!
//! Wire format: one JSON object per WebSocket text frame, discriminated by a
//! string `type` field.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod message;
mod wire;

pub use message::Message;
pub use wire::{decode, encode, preview, DecodeError, EncodeError, PREVIEW_CHARS};
