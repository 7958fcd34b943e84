// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Value lists for placeholders.
//!
//! A value spec is a comma-separated list of tokens. A token of the form
//! `<digits>-<digits>` expands to the inclusive integer range; any other
//! token is taken literally.
//!
//! ```text
//! 1-5          -> 1 2 3 4 5
//! a,b,c        -> a b c
//! 1-3,x,5-5    -> 1 2 3 x 5
//! ```

use regex::Regex;
use std::collections::HashMap;
use std::num::ParseIntError;
use std::sync::LazyLock;
use thiserror::Error;

use crate::placeholder::placeholders;

#[allow(clippy::expect_used)]
static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)-([0-9]+)$").expect("constant regex pattern is valid")
});

/// Errors from parsing value specs and variable definitions
#[derive(Debug, Error)]
pub enum ValueError {
    #[error("invalid range bound `{bound}` in `{token}`: {source}")]
    InvalidBound {
        token: String,
        bound: String,
        source: ParseIntError,
    },
    #[error("invalid variable definition `{0}`: expected <name>:<values>")]
    InvalidDefinition(String),
}

/// Parse a value spec into an ordered list of values.
///
/// Inverted ranges (`5-1`) contribute no values. Empty input yields an
/// empty list.
pub fn parse_values(spec: &str) -> Result<Vec<String>, ValueError> {
    let mut values = Vec::new();
    if spec.is_empty() {
        return Ok(values);
    }

    for token in spec.split(',') {
        let Some(caps) = RANGE_PATTERN.captures(token) else {
            values.push(token.to_string());
            continue;
        };

        let start = parse_bound(token, &caps[1])?;
        let end = parse_bound(token, &caps[2])?;
        if start > end {
            tracing::debug!(%token, "inverted range contributes no values");
        }
        values.extend((start..=end).map(|n| n.to_string()));
    }

    Ok(values)
}

fn parse_bound(token: &str, bound: &str) -> Result<u64, ValueError> {
    bound.parse::<u64>().map_err(|source| ValueError::InvalidBound {
        token: token.to_string(),
        bound: bound.to_string(),
        source,
    })
}

/// Split a `name:values` definition on the first `:`.
///
/// The value part may itself contain `:`.
pub fn parse_definition(definition: &str) -> Result<(&str, &str), ValueError> {
    match definition.split_once(':') {
        Some((name, spec)) if !name.is_empty() => Ok((name, spec)),
        _ => Err(ValueError::InvalidDefinition(definition.to_string())),
    }
}

/// Placeholder name → ordered values.
///
/// Names that were never bound resolve to an empty list, which prunes every
/// expansion that needs them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: HashMap<String, Vec<String>>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare every placeholder used in `template` with an empty list.
    pub fn for_template(template: &str) -> Self {
        let values = placeholders(template).into_iter().map(|name| (name, Vec::new())).collect();
        Self { values }
    }

    /// Append values to `name`, declaring it if needed.
    pub fn extend(&mut self, name: impl Into<String>, values: impl IntoIterator<Item = String>) {
        self.values.entry(name.into()).or_default().extend(values);
    }

    /// Apply a `name:values` definition to an already-declared name.
    ///
    /// Returns `Ok(false)` when the name is not declared (the definition is
    /// ignored). Repeated definitions of one name append in order.
    pub fn define(&mut self, definition: &str) -> Result<bool, ValueError> {
        let (name, spec) = parse_definition(definition)?;
        let parsed = parse_values(spec)?;
        match self.values.get_mut(name) {
            Some(existing) => {
                existing.extend(parsed);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Values bound to `name`, empty when unbound.
    pub fn get(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Declared names whose value list is empty.
    pub fn empty_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .values
            .iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(k, _)| k.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K, V> FromIterator<(K, V)> for Bindings
where
    K: Into<String>,
    V: IntoIterator<Item = String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut bindings = Self::new();
        for (name, values) in iter {
            bindings.extend(name, values);
        }
        bindings
    }
}

#[cfg(test)]
#[path = "values_tests.rs"]
mod tests;
