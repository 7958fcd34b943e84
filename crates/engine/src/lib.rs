// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Batch execution: run planned commands, poll asynchronous operations to
//! completion, and collect ordered result records.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod orchestrator;
mod poll;
mod record;

pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use poll::{CheckReport, CheckState, PollPolicy, Poller, PENDING_PREFIX};
pub use record::ResultRecord;
