// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Result records, the batch's sole output.

use std::time::Duration;

use fanout_exec::CommandOutcome;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::poll::{CheckReport, CheckState};

/// Outcome of one planned command, including its completion check.
///
/// Durations serialise as integer nanoseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    /// 1-based position in the plan.
    #[serde(rename = "seqnum")]
    pub seq: usize,
    pub command: String,
    pub output: Option<Map<String, Value>>,
    pub error: String,
    #[serde(rename = "exitcode")]
    pub exit_code: i32,
    #[serde(serialize_with = "as_nanos")]
    pub duration: Duration,
    /// Completion-check outcome; unset when the command itself failed.
    #[serde(rename = "success")]
    pub checked: Option<String>,
    /// Execution plus check time; unset when the command itself failed.
    #[serde(rename = "done_duration", serialize_with = "opt_as_nanos")]
    pub checked_duration: Option<Duration>,
    #[serde(skip)]
    pub check_state: Option<CheckState>,
}

impl ResultRecord {
    pub fn from_outcome(seq: usize, outcome: CommandOutcome) -> Self {
        Self {
            seq,
            command: outcome.command,
            output: outcome.output,
            error: outcome.error,
            exit_code: outcome.exit_code,
            duration: outcome.duration,
            checked: None,
            checked_duration: None,
            check_state: None,
        }
    }

    /// Attach the completion-check result.
    pub fn attach_check(&mut self, report: CheckReport) {
        self.checked = Some(report.message);
        self.checked_duration = Some(report.elapsed + self.duration);
        self.check_state = Some(report.state);
    }
}

fn nanos(d: &Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

fn as_nanos<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(nanos(d))
}

fn opt_as_nanos<S: Serializer>(d: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
    match d {
        Some(d) => s.serialize_u64(nanos(d)),
        None => s.serialize_none(),
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
