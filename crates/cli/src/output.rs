// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rendering of result records.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

/// Pretty-print `value` as JSON followed by a newline.
pub fn render<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Write `value` to `path` (created or truncated), or to stdout when `None`.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: Option<&Path>) -> anyhow::Result<()> {
    let json = render(value)?;
    match path {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write results to {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
