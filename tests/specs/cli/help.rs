// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI help output specs

use crate::prelude::*;

#[test]
fn wsop_help_shows_usage() {
    cli()
        .args(&["--help"])
        .passes()
        .stdout_has("Usage:")
        .stdout_has("host:port");
}

#[test]
fn wsop_version_shows_version() {
    cli()
        .args(&["--version"])
        .passes()
        .stdout_has(env!("CARGO_PKG_VERSION"));
}

#[test]
fn wsop_rejects_extra_arguments() {
    cli()
        .args(&["localhost:4000", "extra"])
        .exits_with(2)
        .stderr_has("Usage:");
}
