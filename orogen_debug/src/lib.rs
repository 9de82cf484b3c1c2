// Copyright 2026 the Orogen Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for orogen ledgers and translation data:
//!
//! - [`pretty`] — human-readable one-line formatting of dirty-bit fields
//!   and locator sets.
//! - [`snapshot`] — JSON summaries of a ledger's entry counts and version
//!   counters.

pub mod pretty;
pub mod snapshot;
