// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The fan-out pipeline: bind, plan, check the environment, execute, render.

use std::collections::BTreeSet;

use anyhow::Result;
use fanout_engine::{CheckState, Orchestrator, OrchestratorConfig, ResultRecord};
use fanout_exec::ProcessRunner;
use fanout_template::plan;
use tokio_util::sync::CancellationToken;

use crate::args::{Cli, Invocation, AFTER_HELP};
use crate::env::{self, CREDENTIAL_VAR};
use crate::exit_error::ExitError;
use crate::output;

pub fn usage() -> String {
    format!(
        "Usage:\n\n    fanout [OPTIONS] -- <command and arguments> [++ <name>:<values> ...]\n\n{AFTER_HELP}"
    )
}

pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!(concurrency = cli.concurrency, output = ?cli.output, "starting");

    let Some(invocation) = Invocation::split(&cli.command) else {
        return Err(ExitError::usage(usage()).into());
    };
    tracing::info!(template = %invocation.template, "command template");

    let bindings = invocation.bindings().map_err(|e| ExitError::usage(e.to_string()))?;
    let mut bound: Vec<_> = bindings.iter().collect();
    bound.sort_by_key(|(name, _)| *name);
    for (name, values) in bound {
        tracing::info!("{name:>15}: {values:?}");
    }
    for name in bindings.empty_names() {
        tracing::warn!(%name, "placeholder has no values; it produces no commands");
    }

    let planned = plan(&invocation.template, &bindings);
    tracing::info!(commands = planned.len(), "expanded template");

    if cli.dry_run {
        return output::write_json(&planned, cli.output.as_deref());
    }

    if !env::credentials_present() {
        return Err(ExitError::environment(format!(
            "No {CREDENTIAL_VAR} environment found. Execute `source <path/to/openrc>` first!"
        ))
        .into());
    }

    let programs: BTreeSet<&str> = planned.iter().map(|p| p.operation.program.as_str()).collect();
    for program in programs {
        match env::find_executable(program) {
            Some(path) => tracing::info!("{program} command: {}", path.display()),
            None => {
                return Err(ExitError::environment(format!(
                    "executable `{program}` not found in PATH"
                ))
                .into())
            }
        }
    }

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupted; letting running commands finish");
                cancel.cancel();
            }
        })
    };

    let config =
        OrchestratorConfig { concurrency: usize::from(cli.concurrency), poll: cli.poll_policy() };
    let records = Orchestrator::new(ProcessRunner::new(), config)
        .with_cancellation(cancel)
        .run_all(&planned)
        .await;
    interrupt.abort();

    log_summary(&records);
    output::write_json(&records, cli.output.as_deref())
}

fn log_summary(records: &[ResultRecord]) {
    let failed = records.iter().filter(|r| r.exit_code != 0).count();
    let check_failed =
        records.iter().filter(|r| r.check_state == Some(CheckState::FailedCheck)).count();
    tracing::info!(
        total = records.len(),
        failed,
        check_failed,
        "batch finished"
    );
}
