// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runs a plan: each command through the runner, then (on exit 0) through
//! the completion check.
//!
//! With concurrency 1 commands run strictly one at a time in plan order.
//! With more, commands are grouped into lanes by dependency key and lanes
//! run on a bounded pool. A lane runs its commands (and their checks) in
//! plan order, so a resource is never polled or touched again before the
//! command that produced it has finished.

use std::collections::HashMap;
use std::sync::Arc;

use fanout_exec::CommandRunner;
use fanout_template::PlannedCommand;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use crate::poll::{PollPolicy, Poller};
use crate::record::ResultRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Maximum number of lanes in flight.
    pub concurrency: usize,
    pub poll: PollPolicy,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self { concurrency: 1, poll: PollPolicy::default() }
    }
}

pub struct Orchestrator<R> {
    runner: R,
    poller: Poller<R>,
    concurrency: usize,
    cancel: CancellationToken,
}

impl<R: CommandRunner> Orchestrator<R> {
    pub fn new(runner: R, config: OrchestratorConfig) -> Self {
        let cancel = CancellationToken::new();
        let poller = Poller::new(runner.clone(), config.poll).with_cancellation(cancel.clone());
        Self { runner, poller, concurrency: config.concurrency.max(1), cancel }
    }

    /// Stop starting new commands (and end pending checks) once `cancel`
    /// fires. Commands already running finish.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.poller = self.poller.with_cancellation(cancel.clone());
        self.cancel = cancel;
        self
    }

    /// Execute every planned command and return records ordered by `seq`.
    pub async fn run_all(&self, plan: &[PlannedCommand]) -> Vec<ResultRecord> {
        tracing::info!(commands = plan.len(), concurrency = self.concurrency, "running batch");
        if self.concurrency == 1 {
            self.run_sequential(plan).await
        } else {
            self.run_lanes(plan).await
        }
    }

    async fn run_sequential(&self, plan: &[PlannedCommand]) -> Vec<ResultRecord> {
        let total = plan.len();
        let mut records = Vec::with_capacity(total);
        for (i, planned) in plan.iter().enumerate() {
            if self.cancel.is_cancelled() {
                tracing::warn!(remaining = total - i, "batch cancelled");
                break;
            }
            records.push(process(&self.runner, &self.poller, i + 1, total, planned).await);
        }
        records
    }

    async fn run_lanes(&self, plan: &[PlannedCommand]) -> Vec<ResultRecord> {
        let total = plan.len();
        let lanes = lanes(plan);
        tracing::debug!(lanes = lanes.len(), "grouped commands into lanes");

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut handles = Vec::with_capacity(lanes.len());

        for lane in lanes {
            let permit = tokio::select! {
                permit = semaphore.clone().acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
                _ = self.cancel.cancelled() => break,
            };

            let runner = self.runner.clone();
            let poller = self.poller.clone();
            let cancel = self.cancel.clone();

            handles.push(tokio::spawn(async move {
                let _permit = permit; // Hold permit until the lane is done
                let mut records = Vec::with_capacity(lane.len());
                for (seq, planned) in lane {
                    if cancel.is_cancelled() {
                        break;
                    }
                    records.push(process(&runner, &poller, seq, total, &planned).await);
                }
                records
            }));
        }

        let mut records = Vec::with_capacity(total);
        for handle in handles {
            match handle.await {
                Ok(mut lane_records) => records.append(&mut lane_records),
                Err(e) => tracing::error!(error = %e, "lane task failed"),
            }
        }
        if self.cancel.is_cancelled() && records.len() < total {
            tracing::warn!(remaining = total - records.len(), "batch cancelled");
        }
        records.sort_by_key(|r| r.seq);
        records
    }
}

/// Group commands by dependency key, keeping first-seen lane order.
/// Commands without a key each get their own lane.
fn lanes(plan: &[PlannedCommand]) -> Vec<Vec<(usize, PlannedCommand)>> {
    let mut lanes: Vec<Vec<(usize, PlannedCommand)>> = Vec::new();
    let mut by_key: HashMap<&str, usize> = HashMap::new();

    for (i, planned) in plan.iter().enumerate() {
        let entry = (i + 1, planned.clone());
        match planned.dependency_key.as_deref() {
            Some(key) => match by_key.get(key) {
                Some(&lane) => lanes[lane].push(entry),
                None => {
                    by_key.insert(key, lanes.len());
                    lanes.push(vec![entry]);
                }
            },
            None => lanes.push(vec![entry]),
        }
    }

    lanes
}

async fn process<R: CommandRunner>(
    runner: &R,
    poller: &Poller<R>,
    seq: usize,
    total: usize,
    planned: &PlannedCommand,
) -> ResultRecord {
    tracing::info!("Command({seq}/{total}): '{}' starts", planned.text);

    let outcome = runner.run(&planned.text).await;
    tracing::info!(
        "Command '{}' exits with: {}, executing time: {:?}",
        outcome.command,
        outcome.exit_code,
        outcome.duration
    );

    if !outcome.success() {
        return ResultRecord::from_outcome(seq, outcome);
    }

    let report = poller.check(&planned.operation, &outcome).await;
    tracing::info!(%seq, state = ?report.state, checked = %report.message, "check finished");

    let mut record = ResultRecord::from_outcome(seq, outcome);
    record.attach_check(report);
    record
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
