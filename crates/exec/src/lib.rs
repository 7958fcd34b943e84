// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution with structured output capture.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod outcome;
mod runner;

pub use outcome::{parse_output, CommandOutcome, SPAWN_FAILED_EXIT_CODE};
pub use runner::{CommandRunner, ProcessRunner, DEFAULT_TRAILING_ARGS};

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRunner, RunnerCall};
