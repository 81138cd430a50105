// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! wsop-core: Signal model and transform logic for the remote operator agent

pub mod macros;

pub mod capability;
pub mod id;
pub mod signal;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use capability::{Capabilities, Capability};
pub use id::{short, AgentId, RequestId};
pub use signal::{transform_signal, Adjustment, Clamp, Signal, ADJUSTMENTS, WEIGHT_MAX, WEIGHT_MIN};
