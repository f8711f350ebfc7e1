// Copyright 2025 the Tastemap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tastemap Event State: small state machines for map gestures.
//!
//! - [`drag`]: track a pointer drag, report pan deltas, and tell a click from a pan
//! - [`debounce`]: coalesce bursts of events (window resizes) into one
//!
//! Each manager is stateful but simple: it tracks just enough to compute its
//! answer and takes time as an explicit monotonic [`core::time::Duration`]
//! supplied by the host, so behavior is deterministic under test.
//!
//! This crate is `no_std` compatible for all modules.

#![no_std]

pub mod debounce;
pub mod drag;
