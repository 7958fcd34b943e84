// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted runner for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::outcome::{parse_output, CommandOutcome, SPAWN_FAILED_EXIT_CODE};
use crate::runner::CommandRunner;

/// Recorded invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerCall {
    pub command: String,
}

#[derive(Debug, Clone)]
struct Scripted {
    stdout: Option<Vec<u8>>,
    error: String,
    exit_code: i32,
    duration: Duration,
}

#[derive(Default)]
struct FakeRunnerState {
    scripts: HashMap<String, VecDeque<Scripted>>,
    calls: Vec<RunnerCall>,
    delay: Duration,
}

/// Fake runner that replays scripted outcomes keyed by command text.
///
/// Responses for one command are consumed in order; the last one repeats.
/// Unscripted commands behave like a missing executable.
#[derive(Clone, Default)]
pub struct FakeRunner {
    inner: Arc<Mutex<FakeRunnerState>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful response with JSON stdout.
    pub fn respond_json(&self, command: &str, body: Value) -> &Self {
        self.push(
            command,
            Scripted {
                stdout: Some(body.to_string().into_bytes()),
                error: String::new(),
                exit_code: 0,
                duration: Duration::from_millis(10),
            },
        )
    }

    /// Script a successful response with raw stdout.
    pub fn respond_text(&self, command: &str, stdout: &str) -> &Self {
        self.push(
            command,
            Scripted {
                stdout: Some(stdout.as_bytes().to_vec()),
                error: String::new(),
                exit_code: 0,
                duration: Duration::from_millis(10),
            },
        )
    }

    /// Script a failing response.
    pub fn respond_failure(&self, command: &str, exit_code: i32, stderr: &str) -> &Self {
        self.push(
            command,
            Scripted {
                stdout: None,
                error: format!("{stderr}exit status {exit_code}"),
                exit_code,
                duration: Duration::from_millis(10),
            },
        )
    }

    /// Sleep (on tokio time) before answering each call.
    pub fn set_delay(&self, delay: Duration) {
        self.inner.lock().delay = delay;
    }

    /// All recorded invocations, in call order
    pub fn calls(&self) -> Vec<RunnerCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of times `command` was run
    pub fn call_count(&self, command: &str) -> usize {
        self.inner.lock().calls.iter().filter(|c| c.command == command).count()
    }

    fn push(&self, command: &str, scripted: Scripted) -> &Self {
        self.inner.lock().scripts.entry(command.to_string()).or_default().push_back(scripted);
        self
    }

    fn next_response(&self, command: &str) -> (Option<Scripted>, Duration) {
        let mut state = self.inner.lock();
        state.calls.push(RunnerCall { command: command.to_string() });
        let delay = state.delay;
        let scripted = state.scripts.get_mut(command).and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        });
        (scripted, delay)
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, command: &str) -> CommandOutcome {
        let (scripted, delay) = self.next_response(command);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match scripted {
            Some(s) => CommandOutcome {
                command: command.to_string(),
                output: s.stdout.as_deref().map(parse_output),
                error: s.error,
                exit_code: s.exit_code,
                duration: s.duration,
            },
            None => CommandOutcome {
                command: command.to_string(),
                output: None,
                error: format!("No such file or directory: no script for `{command}`"),
                exit_code: SPAWN_FAILED_EXIT_CODE,
                duration: Duration::ZERO,
            },
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
