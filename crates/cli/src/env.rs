// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Variable whose presence shows the control-plane credentials were sourced.
pub const CREDENTIAL_VAR: &str = "OS_USERNAME";

/// True when the credential variable is set (even to an empty value).
pub fn credentials_present() -> bool {
    std::env::var_os(CREDENTIAL_VAR).is_some()
}

/// Default wait between completion checks (`FANOUT_POLL_INTERVAL_MS`, default 2s)
pub fn poll_interval() -> Duration {
    millis_var("FANOUT_POLL_INTERVAL_MS").unwrap_or(Duration::from_secs(2))
}

/// Default cap on completion checks per command (`FANOUT_MAX_POLLS`, unbounded)
pub fn max_polls() -> Option<u32> {
    std::env::var("FANOUT_MAX_POLLS").ok().and_then(|s| s.parse::<u32>().ok())
}

/// Default completion-check deadline (`FANOUT_POLL_TIMEOUT_MS`, none)
pub fn poll_timeout() -> Option<Duration> {
    millis_var("FANOUT_POLL_TIMEOUT_MS")
}

fn millis_var(name: &str) -> Option<Duration> {
    std::env::var(name).ok().and_then(|s| s.parse::<u64>().ok()).map(Duration::from_millis)
}

/// Resolve `program` the way the process spawner will: paths are checked
/// directly, bare names are searched on `PATH`.
pub fn find_executable(program: &str) -> Option<PathBuf> {
    if program.contains(std::path::MAIN_SEPARATOR) {
        let path = PathBuf::from(program);
        return is_executable(&path).then_some(path);
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata().is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
