// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failures that end the run before any command executes.
//!
//! `main()` maps these to a process exit code and prints the message; the
//! pipeline never calls `std::process::exit()` itself.

use std::fmt;

/// Malformed invocation: no template, bad value list, bad definition.
pub const USAGE_EXIT_CODE: i32 = 2;

/// The environment cannot run the batch: no credentials, no executable.
pub const ENVIRONMENT_EXIT_CODE: i32 = 1;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self { code: USAGE_EXIT_CODE, message: message.into() }
    }

    pub fn environment(message: impl Into<String>) -> Self {
        Self { code: ENVIRONMENT_EXIT_CODE, message: message.into() }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ExitError {}
