//! Shared helpers for CLI specs.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Stub `neutron`: creates report PENDING_CREATE, the first show of an id
/// is still pending and later shows are ACTIVE. Verbs ending in `-fail`
/// exit 3.
const STUB_SCRIPT: &str = r#"#!/bin/sh
case "$1" in
  *-create)
    printf '{"id": "%s-id", "provisioning_status": "PENDING_CREATE"}\n' "$3"
    ;;
  *-show)
    if [ -f "$STUB_STATE/$2" ]; then
      printf '{"id": "%s", "provisioning_status": "ACTIVE"}\n' "$2"
    else
      : > "$STUB_STATE/$2"
      printf '{"id": "%s", "provisioning_status": "PENDING_CREATE"}\n' "$2"
    fi
    ;;
  *-delete)
    echo "Deleted $2"
    ;;
  *-fail)
    echo "boom" >&2
    exit 3
    ;;
  *)
    echo '{}'
    ;;
esac
"#;

/// Temporary directory holding the stub CLI.
pub struct Stub {
    dir: TempDir,
}

impl Stub {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("neutron");
        std::fs::write(&script, STUB_SCRIPT).unwrap();
        make_executable(&script);
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `fanout` with the stub first on `PATH` and credentials present.
    pub fn fanout(&self) -> Cli {
        let mut cli = fanout();
        cli.cmd
            .env("PATH", path_with(self.path()))
            .env("STUB_STATE", self.path())
            .env("OS_USERNAME", "admin");
        cli
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

fn path_with(dir: &Path) -> std::ffi::OsString {
    let mut paths = vec![PathBuf::from(dir)];
    if let Some(existing) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&existing));
    }
    std::env::join_paths(paths).unwrap()
}

/// `fanout` with a quiet log filter.
pub fn fanout() -> Cli {
    let mut cmd = Command::cargo_bin("fanout").unwrap();
    cmd.env("RUST_LOG", "warn").env("NO_COLOR", "1");
    Cli { cmd }
}

pub struct Cli {
    cmd: Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn env_remove(mut self, key: &str) -> Self {
        self.cmd.env_remove(key);
        self
    }

    /// Run and assert exit code 0.
    pub fn passes(mut self) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert::from(output);
        assert_eq!(run.code, Some(0), "expected success\nstdout:\n{}\nstderr:\n{}", run.stdout, run.stderr);
        run
    }

    /// Run and assert the given exit code.
    pub fn exits_with(mut self, code: i32) -> RunAssert {
        let output = self.cmd.output().unwrap();
        let run = RunAssert::from(output);
        assert_eq!(run.code, Some(code), "stdout:\n{}\nstderr:\n{}", run.stdout, run.stderr);
        run
    }
}

pub struct RunAssert {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl From<std::process::Output> for RunAssert {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl RunAssert {
    pub fn stdout_has(&self, needle: &str) -> &Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(&self, needle: &str) -> &Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }

    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout).unwrap()
    }
}
