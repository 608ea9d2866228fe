// SPDX-FileCopyrightText: 2026 Parley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Parley integration tests.

pub mod harness;

pub use harness::{TestHarness, TestHarnessBuilder};
