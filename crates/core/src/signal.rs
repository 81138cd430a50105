// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Signal model and the storm amplification transform.
//!
//! A signal carries a mapping from responder name to a weight in
//! `[WEIGHT_MIN, WEIGHT_MAX]`. The transform nudges a fixed set of responders
//! by a signed delta and clamps them to the range; every other responder is
//! passed through untouched, whatever JSON value it holds.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const WEIGHT_MIN: f64 = -1.0;
pub const WEIGHT_MAX: f64 = 1.0;

/// Which bound an adjustment saturates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clamp {
    /// Positive delta, capped at `WEIGHT_MAX`
    Ceiling,
    /// Negative delta, floored at `WEIGHT_MIN`
    Floor,
}

crate::simple_display! {
    Clamp {
        Ceiling => "amplify",
        Floor => "dampen",
    }
}

impl Clamp {
    pub fn apply(self, weight: f64) -> f64 {
        match self {
            Clamp::Ceiling => weight.min(WEIGHT_MAX),
            Clamp::Floor => weight.max(WEIGHT_MIN),
        }
    }

    /// The bound repeated application converges to.
    pub fn bound(self) -> f64 {
        match self {
            Clamp::Ceiling => WEIGHT_MAX,
            Clamp::Floor => WEIGHT_MIN,
        }
    }
}

/// One row of the adjustment table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjustment {
    pub responder: &'static str,
    pub delta: f64,
    pub clamp: Clamp,
}

impl Adjustment {
    pub const fn amplify(responder: &'static str, delta: f64) -> Self {
        Self {
            responder,
            delta,
            clamp: Clamp::Ceiling,
        }
    }

    pub const fn dampen(responder: &'static str, delta: f64) -> Self {
        Self {
            responder,
            delta,
            clamp: Clamp::Floor,
        }
    }

    /// Absent responders read as 0.0.
    pub fn apply(&self, current: Option<f64>) -> f64 {
        self.clamp.apply(current.unwrap_or(0.0) + self.delta)
    }
}

/// Storm-related responders are amplified, quiet ones dampened.
pub const ADJUSTMENTS: [Adjustment; 5] = [
    Adjustment::amplify("storm_bringer", 0.35),
    Adjustment::amplify("void_singer", 0.15),
    Adjustment::amplify("spark_lord", 0.10),
    Adjustment::dampen("quiet_tide", -0.20),
    Adjustment::dampen("silk_shadow", -0.10),
];

/// Payload of transform requests and results.
///
/// Values are kept as raw JSON so responders outside the adjustment table
/// round-trip exactly. Fields other than `values` are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(default)]
    pub values: IndexMap<String, Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for a responder value.
    pub fn with(mut self, responder: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(responder.into(), value.into());
        self
    }

    /// Numeric weight of a responder. Non-numeric values read as absent.
    pub fn get(&self, responder: &str) -> Option<f64> {
        self.values.get(responder).and_then(Value::as_f64)
    }

    /// Raw JSON value of a responder.
    pub fn raw(&self, responder: &str) -> Option<&Value> {
        self.values.get(responder)
    }

    /// Weight of a responder, treating absent as 0.0.
    pub fn weight(&self, responder: &str) -> f64 {
        self.get(responder).unwrap_or(0.0)
    }

    /// Apply the adjustment table in place.
    pub fn transform(&mut self) {
        for adjustment in &ADJUSTMENTS {
            let next = adjustment.apply(self.get(adjustment.responder));
            self.values.insert(adjustment.responder.to_string(), Value::from(next));
        }
    }

    /// True once every adjusted responder sits at its clamp bound, i.e. a
    /// further transform is a no-op.
    pub fn is_saturated(&self) -> bool {
        ADJUSTMENTS
            .iter()
            .all(|a| self.get(a.responder) == Some(a.clamp.bound()))
    }
}

/// Apply the storm amplification table to a signal.
///
/// Total: never fails. Not idempotent until every adjusted responder has
/// saturated at its bound.
pub fn transform_signal(mut signal: Signal) -> Signal {
    signal.transform();
    signal
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
