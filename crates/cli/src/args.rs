// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line arguments and the `-- <template> ++ <definitions>` split.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use fanout_engine::PollPolicy;
use fanout_template::{Bindings, ValueError};

use crate::env;

/// Separator between the command template and variable definitions.
pub const DEFINITIONS_MARKER: &str = "++";

pub const AFTER_HELP: &str = "\
Example:

    fanout --concurrency 2 --output results.json \\
      -- neutron lbaas-loadbalancer-create --name lb%{x} %{y} \\
      ++ x:1-5 y:private-subnet,public-subnet

Placeholders are written %{name}. Each definition is <name>:<values>, where
values is a comma-separated list of literals and inclusive ranges (1-5).";

#[derive(Parser, Debug)]
#[command(
    name = "fanout",
    version,
    about = "Expand a command template over value lists and run every combination",
    after_help = AFTER_HELP,
    styles = crate::color::styles(),
)]
pub struct Cli {
    /// Maximum number of commands in flight (1 runs strictly in order)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Write result records here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Wait between completion checks [env: FANOUT_POLL_INTERVAL_MS, default 2000]
    #[arg(long, value_name = "MS")]
    pub poll_interval_ms: Option<u64>,

    /// Give up a completion check after this many attempts [env: FANOUT_MAX_POLLS]
    #[arg(long, value_name = "N")]
    pub max_polls: Option<u32>,

    /// Give up a completion check after this long [env: FANOUT_POLL_TIMEOUT_MS]
    #[arg(long, value_name = "MS")]
    pub poll_timeout_ms: Option<u64>,

    /// Print the expanded commands without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Command template followed by `++ name:values ...`
    #[arg(last = true, value_name = "TEMPLATE")]
    pub command: Vec<String>,
}

impl Cli {
    /// Polling policy from flags, falling back to the environment.
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy {
            interval: self.poll_interval_ms.map(Duration::from_millis).unwrap_or_else(env::poll_interval),
            max_attempts: self.max_polls.or_else(env::max_polls),
            timeout: self.poll_timeout_ms.map(Duration::from_millis).or_else(env::poll_timeout),
        }
    }
}

/// Template text and raw variable definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub template: String,
    pub definitions: Vec<String>,
}

impl Invocation {
    /// Split everything after `--` at the first `++`.
    ///
    /// Returns `None` when there is no template.
    pub fn split(command: &[String]) -> Option<Self> {
        let marker = command.iter().position(|a| a == DEFINITIONS_MARKER).unwrap_or(command.len());
        let (template, rest) = command.split_at(marker);
        if template.is_empty() {
            return None;
        }
        Some(Self {
            template: template.join(" "),
            definitions: rest.iter().skip(1).cloned().collect(),
        })
    }

    /// Bind the template's placeholders from the definitions.
    ///
    /// Definitions for names the template does not use are ignored.
    pub fn bindings(&self) -> Result<Bindings, ValueError> {
        let mut bindings = Bindings::for_template(&self.template);
        for definition in &self.definitions {
            if !bindings.define(definition)? {
                tracing::debug!(%definition, "ignoring definition for unused placeholder");
            }
        }
        Ok(bindings)
    }
}

#[cfg(test)]
#[path = "args_tests.rs"]
mod tests;
