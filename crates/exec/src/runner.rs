// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command runner seam and the subprocess-backed implementation.

use std::process::Stdio;
use std::time::Instant;

use async_trait::async_trait;
use tracing::Instrument;

use crate::outcome::{parse_output, CommandOutcome, SPAWN_FAILED_EXIT_CODE};

/// Arguments appended to every command so the CLI prints JSON.
pub const DEFAULT_TRAILING_ARGS: &[&str] = &["--format", "json"];

/// Runs one concrete command and reports its outcome.
///
/// Implementations never fail: spawn and wait errors are folded into the
/// outcome so a batch can continue past them.
#[async_trait]
pub trait CommandRunner: Clone + Send + Sync + 'static {
    async fn run(&self, command: &str) -> CommandOutcome;
}

/// Runs commands as child processes.
///
/// The command text is split on whitespace into program and arguments (no
/// shell quoting), the trailing arguments are appended, and the child
/// inherits the current environment.
#[derive(Clone, Debug)]
pub struct ProcessRunner {
    trailing_args: Vec<String>,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::with_trailing_args(DEFAULT_TRAILING_ARGS.iter().map(|s| s.to_string()))
    }

    pub fn with_trailing_args(args: impl IntoIterator<Item = String>) -> Self {
        Self { trailing_args: args.into_iter().collect() }
    }

    pub fn trailing_args(&self) -> &[String] {
        &self.trailing_args
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &str) -> CommandOutcome {
        let mut tokens = command.split_whitespace();
        let start = Instant::now();

        let Some(program) = tokens.next() else {
            return CommandOutcome {
                command: command.to_string(),
                output: None,
                error: "empty command".to_string(),
                exit_code: SPAWN_FAILED_EXIT_CODE,
                duration: start.elapsed(),
            };
        };
        let args: Vec<&str> = tokens.collect();

        let span = tracing::info_span!(
            "fanout.cmd",
            cmd = %program,
            args = ?args,
            exit_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        );

        let mut process = tokio::process::Command::new(program);
        process.args(&args);
        process.args(&self.trailing_args);
        process.stdin(Stdio::null());
        process.stdout(Stdio::piped());
        process.stderr(Stdio::piped());
        process.kill_on_drop(true);

        let result = async {
            match process.spawn() {
                Ok(child) => child.wait_with_output().await,
                Err(e) => Err(e),
            }
        }
        .instrument(span.clone())
        .await;
        let duration = start.elapsed();

        let outcome = match result {
            Err(e) => CommandOutcome {
                command: command.to_string(),
                output: None,
                error: e.to_string(),
                exit_code: SPAWN_FAILED_EXIT_CODE,
                duration,
            },
            Ok(output) => {
                let mut error = String::from_utf8_lossy(&output.stderr).into_owned();
                if output.status.success() {
                    CommandOutcome {
                        command: command.to_string(),
                        output: Some(parse_output(&output.stdout)),
                        error,
                        exit_code: 0,
                        duration,
                    }
                } else {
                    // stderr followed by the exit status
                    match output.status.code() {
                        Some(code) => error.push_str(&format!("exit status {code}")),
                        None => error.push_str(&output.status.to_string()),
                    }
                    CommandOutcome {
                        command: command.to_string(),
                        output: None,
                        error,
                        exit_code: output.status.code().unwrap_or(SPAWN_FAILED_EXIT_CODE),
                        duration,
                    }
                }
            }
        };

        span.record("exit_code", outcome.exit_code);
        span.record("duration_ms", duration.as_millis() as u64);
        span.in_scope(|| {
            tracing::debug!(exit_code = outcome.exit_code, ?duration, "command finished");
        });

        outcome
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
