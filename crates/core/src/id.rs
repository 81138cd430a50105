// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier types carried on the wire

/// Returns a string slice truncated to at most `n` characters.
///
/// Truncates on a char boundary so multi-byte ids never split a code point.
pub fn short(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

crate::define_id! {
    /// Name an agent registers under with the hub (e.g. `storm_amplifier`).
    pub struct AgentId;
}

crate::define_id! {
    /// Hub-assigned correlation id for a transform request.
    ///
    /// Echoed unchanged on the matching `transform_result`.
    pub struct RequestId;
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
