//! CLI help and usage specs

use crate::prelude::*;

#[test]
fn help_shows_usage_and_placeholder_syntax() {
    fanout().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("%{name}");
}

#[test]
fn help_lists_options() {
    fanout()
        .args(&["--help"])
        .passes()
        .stdout_has("--concurrency")
        .stdout_has("--output")
        .stdout_has("--poll-interval-ms")
        .stdout_has("--dry-run");
}

#[test]
fn version_shows_version() {
    fanout().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn no_template_prints_usage_and_exits_two() {
    fanout().exits_with(2).stderr_has("Usage:");
}

#[test]
fn definitions_without_template_print_usage() {
    fanout().args(&["--", "++", "x:1-2"]).exits_with(2).stderr_has("Usage:");
}

#[test]
fn zero_concurrency_is_rejected() {
    fanout().args(&["--concurrency", "0", "--", "neutron", "lbaas-pool-list"]).exits_with(2);
}
