// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI specs for the `outbox` binary.
//!
//! The spec files under `cli/` are wired as `[[test]]` targets of the
//! `outbox` crate so they can exercise the built binary via `assert_cmd`.
