// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Completion checks for asynchronous operations.
//!
//! Create and update return before the backend has finished provisioning.
//! The poller re-runs the resource's show command until its
//! `provisioning_status` leaves the `PENDING_*` family:
//!
//! ```text
//! NotNeeded ─────────────────────────────► done
//! Polling ──show fails──────────────────► FailedCheck
//!    │  ▲
//!    │  └── PENDING_* (wait interval)
//!    └──── any other status ────────────► Succeeded
//! ```
//!
//! Attempts, deadline and cancellation also end polling in `FailedCheck`.

use std::time::Duration;

use fanout_exec::{CommandOutcome, CommandRunner};
use fanout_template::Operation;
use serde::Deserialize;
use serde_json::Value;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Status prefix of in-progress provisioning.
pub const PENDING_PREFIX: &str = "PENDING_";

/// Terminal state of a completion check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    /// Read-only or delete operation; nothing to wait for.
    NotNeeded,
    /// The resource left its pending state (any final status).
    Succeeded,
    /// The check itself could not finish.
    FailedCheck,
}

/// Result of checking one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub state: CheckState,
    /// Human-readable outcome recorded on the result.
    pub message: String,
    /// Number of show commands run.
    pub attempts: u32,
    /// Time spent checking, excluding the original command.
    pub elapsed: Duration,
}

/// Pacing and limits for the polling loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Wait between show commands while the resource is pending.
    pub interval: Duration,
    /// Give up after this many show commands.
    pub max_attempts: Option<u32>,
    /// Give up when the next attempt would start after this much time.
    pub timeout: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self { interval: Duration::from_secs(2), max_attempts: None, timeout: None }
    }
}

/// Fields read from a show command's output.
#[derive(Debug, Default, Deserialize)]
struct ProvisioningStatus {
    #[serde(default)]
    id: String,
    #[serde(default)]
    provisioning_status: String,
}

impl ProvisioningStatus {
    fn from_outcome(outcome: &CommandOutcome) -> Self {
        outcome
            .output
            .as_ref()
            .and_then(|map| serde_json::from_value(Value::Object(map.clone())).ok())
            .unwrap_or_default()
    }

    fn is_pending(&self) -> bool {
        self.provisioning_status.starts_with(PENDING_PREFIX)
    }
}

/// Drives completion checks through a [`CommandRunner`].
#[derive(Clone)]
pub struct Poller<R> {
    runner: R,
    policy: PollPolicy,
    cancel: CancellationToken,
}

impl<R: CommandRunner> Poller<R> {
    pub fn new(runner: R, policy: PollPolicy) -> Self {
        Self { runner, policy, cancel: CancellationToken::new() }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Check a successfully executed command.
    pub async fn check(&self, operation: &Operation, outcome: &CommandOutcome) -> CheckReport {
        if !operation.requires_polling() {
            return CheckReport {
                state: CheckState::NotNeeded,
                message: operation.done_label(),
                attempts: 0,
                elapsed: Duration::ZERO,
            };
        }

        let started = Instant::now();
        let report = |state: CheckState, message: String, attempts: u32| CheckReport {
            state,
            message,
            attempts,
            elapsed: started.elapsed(),
        };

        let Some(id) = outcome.output_str("id") else {
            return report(
                CheckState::FailedCheck,
                format!("no id in output of {}", outcome.command),
                0,
            );
        };

        let show = operation.show_command(id);
        tracing::info!(command = %show, "checking execution");

        let mut attempts = 0;
        loop {
            if self.cancel.is_cancelled() {
                return report(CheckState::FailedCheck, format!("check of {id} cancelled"), attempts);
            }

            attempts += 1;
            let shown = self.runner.run(&show).await;
            if !shown.success() {
                tracing::warn!(command = %show, exit_code = shown.exit_code, "check command failed");
                return report(
                    CheckState::FailedCheck,
                    format!("Failed to check execution of {}: {}", outcome.command, shown.error),
                    attempts,
                );
            }

            let status = ProvisioningStatus::from_outcome(&shown);
            if !status.is_pending() {
                return report(
                    CheckState::Succeeded,
                    format!("{}: {}", status.id, status.provisioning_status),
                    attempts,
                );
            }
            tracing::debug!(%id, status = %status.provisioning_status, attempts, "still pending");

            if self.policy.max_attempts.is_some_and(|max| attempts >= max) {
                return report(
                    CheckState::FailedCheck,
                    format!(
                        "gave up after {attempts} checks of {id}: last status {}",
                        status.provisioning_status
                    ),
                    attempts,
                );
            }
            if let Some(timeout) = self.policy.timeout {
                if started.elapsed() + self.policy.interval > timeout {
                    return report(
                        CheckState::FailedCheck,
                        format!(
                            "timed out after {:?} checking {id}: last status {}",
                            started.elapsed(),
                            status.provisioning_status
                        ),
                        attempts,
                    );
                }
            }

            if !self.policy.interval.is_zero() {
                tokio::select! {
                    _ = self.cancel.cancelled() => {}
                    _ = tokio::time::sleep(self.policy.interval) => {}
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod tests;
