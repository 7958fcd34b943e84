// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operation descriptors derived from a command's subcommand token.
//!
//! Commands look like `<program> <prefix>-<resource>-<verb> [args...]`,
//! e.g. `neutron lbaas-loadbalancer-create --name lb1`.

use serde::Serialize;

/// How the completion check treats an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Asynchronous on the backend; poll the resource until it settles.
    Mutating,
    /// Completes with the command itself.
    Immediate,
    /// The command does not have the `<prefix>-<resource>-<verb>` shape.
    Opaque,
}

/// Tagged description of what a command does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub program: String,
    /// The full subcommand token, e.g. `lbaas-loadbalancer-create`.
    pub subcommand: String,
    pub prefix: String,
    pub resource: String,
    pub verb: String,
    pub kind: OperationKind,
}

impl Operation {
    /// Parse the operation from command text.
    pub fn parse(command: &str) -> Self {
        let mut tokens = command.split_whitespace();
        let program = tokens.next().unwrap_or_default().to_string();
        let subcommand = tokens.next().unwrap_or_default().to_string();

        let parts: Vec<&str> = subcommand.split('-').collect();
        if parts.len() < 3 || parts.iter().any(|p| p.is_empty()) {
            return Self {
                program,
                subcommand,
                prefix: String::new(),
                resource: String::new(),
                verb: String::new(),
                kind: OperationKind::Opaque,
            };
        }

        let prefix = parts[0].to_string();
        let verb = parts[parts.len() - 1].to_string();
        let resource = parts[1..parts.len() - 1].join("-");
        let kind = match verb.as_str() {
            "create" | "update" => OperationKind::Mutating,
            _ => OperationKind::Immediate,
        };

        Self { program, subcommand, prefix, resource, verb, kind }
    }

    pub fn requires_polling(&self) -> bool {
        self.kind == OperationKind::Mutating
    }

    /// Command that reports the state of resource `id`.
    ///
    /// Only meaningful for well-formed operations.
    pub fn show_command(&self, id: &str) -> String {
        format!("{} {}-{}-show {}", self.program, self.prefix, self.resource, id)
    }

    /// Label used when no completion check is needed.
    pub fn done_label(&self) -> String {
        if self.subcommand.is_empty() {
            format!("{} done", self.program)
        } else {
            format!("{} done", self.subcommand)
        }
    }

    /// Key that serialises commands touching the same resource.
    ///
    /// For `create` it is the `--name` value; otherwise the first positional
    /// argument after the subcommand.
    pub fn dependency_key(&self, command: &str) -> Option<String> {
        if self.kind == OperationKind::Opaque {
            return None;
        }

        let args: Vec<&str> = command.split_whitespace().skip(2).collect();
        let target = if self.verb == "create" {
            args.iter()
                .position(|a| *a == "--name")
                .and_then(|i| args.get(i + 1))
                .copied()
                .or_else(|| {
                    args.iter().find_map(|a| a.strip_prefix("--name="))
                })
        } else {
            args.iter().find(|a| !a.starts_with('-')).copied()
        }?;

        Some(format!("{}:{}", self.resource, target))
    }
}

#[cfg(test)]
#[path = "operation_tests.rs"]
mod tests;
