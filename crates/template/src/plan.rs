// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Expansion plus operation tagging.

use std::sync::Arc;

use serde::Serialize;

use crate::expand::expand;
use crate::operation::Operation;
use crate::placeholder::PLACEHOLDER_PATTERN;
use crate::values::Bindings;

/// A concrete command ready for execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCommand {
    pub text: String,
    pub operation: Arc<Operation>,
    /// Commands sharing a key must run in plan order.
    pub dependency_key: Option<String>,
}

impl PlannedCommand {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let operation = Arc::new(Operation::parse(&text));
        Self::with_operation(text, operation)
    }

    fn with_operation(text: String, operation: Arc<Operation>) -> Self {
        let dependency_key = operation.dependency_key(&text);
        Self { text, operation, dependency_key }
    }
}

/// Expand `template` and tag each command with its operation.
///
/// When the program and subcommand tokens are fixed the descriptor is parsed
/// once from the template and shared by every command.
pub fn plan(template: &str, bindings: &Bindings) -> Vec<PlannedCommand> {
    let head: Vec<&str> = template.split_whitespace().take(2).collect();
    let shared = if head.iter().any(|t| PLACEHOLDER_PATTERN.is_match(t)) {
        None
    } else {
        Some(Arc::new(Operation::parse(template)))
    };

    let commands = expand(template, bindings);
    tracing::debug!(%template, count = commands.len(), "expanded template");

    commands
        .into_iter()
        .map(|text| match &shared {
            Some(operation) => PlannedCommand::with_operation(text, Arc::clone(operation)),
            None => PlannedCommand::new(text),
        })
        .collect()
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
