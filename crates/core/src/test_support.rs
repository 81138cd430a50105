// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::Signal;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for signals.
pub mod strategies {
    use crate::{Signal, ADJUSTMENTS, WEIGHT_MAX, WEIGHT_MIN};
    use proptest::prelude::*;

    /// Responder names: the adjusted ones plus arbitrary others.
    pub fn arb_responder() -> impl Strategy<Value = String> {
        prop_oneof![
            proptest::sample::select(ADJUSTMENTS.iter().map(|a| a.responder).collect::<Vec<_>>())
                .prop_map(str::to_string),
            "[a-z_]{1,12}",
        ]
    }

    pub fn arb_weight() -> impl Strategy<Value = f64> {
        WEIGHT_MIN..=WEIGHT_MAX
    }

    pub fn arb_signal() -> impl Strategy<Value = Signal> {
        proptest::collection::vec((arb_responder(), arb_weight()), 0..10).prop_map(|pairs| {
            pairs
                .into_iter()
                .fold(Signal::new(), |signal, (k, v)| signal.with(k, v))
        })
    }
}

/// Signal with every adjusted responder already at its clamp bound.
pub fn saturated_signal() -> Signal {
    crate::ADJUSTMENTS
        .iter()
        .fold(Signal::new(), |s, a| s.with(a.responder, a.clamp.bound()))
}
