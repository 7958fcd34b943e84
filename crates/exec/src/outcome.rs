// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome of running one command.

use serde_json::{Map, Value};
use std::time::Duration;

/// Exit code recorded when a process could not be started or reported no
/// status (killed by a signal).
pub const SPAWN_FAILED_EXIT_CODE: i32 = -1;

/// Record of a single command execution.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    /// The command text as given to the runner.
    pub command: String,
    /// Parsed stdout, or `{"message": <raw stdout>}` when it is not a JSON
    /// object. `None` when the command did not exit successfully.
    pub output: Option<Map<String, Value>>,
    /// Captured stderr plus any spawn/wait error description.
    pub error: String,
    pub exit_code: i32,
    /// Wall-clock duration of spawn + wait.
    pub duration: Duration,
}

impl CommandOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// String field from the structured output.
    pub fn output_str(&self, key: &str) -> Option<&str> {
        self.output.as_ref()?.get(key)?.as_str()
    }
}

/// Parse captured stdout as a JSON object.
///
/// Anything else (plain text, arrays, invalid JSON) is wrapped as
/// `{"message": <stdout>}` so callers can always treat output as an object.
pub fn parse_output(stdout: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(stdout) {
        Ok(Value::Object(map)) => map,
        _ => {
            let mut map = Map::new();
            map.insert(
                "message".to_string(),
                Value::String(String::from_utf8_lossy(stdout).into_owned()),
            );
            map
        }
    }
}

#[cfg(test)]
#[path = "outcome_tests.rs"]
mod tests;
