// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Capabilities an agent advertises when it registers

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

crate::define_id! {
    /// A single advertised capability (e.g. `transform`).
    pub struct Capability;
}

impl Capability {
    pub const TRANSFORM: &'static str = "transform";

    pub fn transform() -> Self {
        Self::new(Self::TRANSFORM)
    }
}

/// Set of capabilities, serialized as a sorted, de-duplicated JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capabilities(BTreeSet<Capability>);

impl Capabilities {
    /// The capability set of an operator that only answers transform requests.
    pub fn transform_only() -> Self {
        [Capability::transform()].into_iter().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn insert(&mut self, capability: impl Into<Capability>) -> bool {
        self.0.insert(capability.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.0.iter()
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Capability::as_str).collect();
        write!(f, "{}", names.join(","))
    }
}

#[cfg(test)]
#[path = "capability_tests.rs"]
mod tests;
