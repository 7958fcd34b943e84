// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Placeholder discovery

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Regex pattern for %{placeholder_name}
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
pub static PLACEHOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%\{([a-zA-Z_][a-zA-Z0-9_]*)\}").expect("constant regex pattern is valid")
});

/// A single placeholder occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// The full token, e.g. `%{x}`.
    pub token: &'a str,
    /// The bare name, e.g. `x`.
    pub name: &'a str,
}

/// Distinct placeholder names appearing in `text`.
pub fn placeholders(text: &str) -> BTreeSet<String> {
    PLACEHOLDER_PATTERN
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// The leftmost placeholder in `text`, if any.
pub fn first_placeholder(text: &str) -> Option<Placeholder<'_>> {
    let caps = PLACEHOLDER_PATTERN.captures(text)?;
    let token = caps.get(0)?.as_str();
    let name = caps.get(1)?.as_str();
    Some(Placeholder { token, name })
}

#[cfg(test)]
#[path = "placeholder_tests.rs"]
mod tests;
