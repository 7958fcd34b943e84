//! Specs for expanding and running command batches.

use serde_json::json;
use similar_asserts::assert_eq;

use crate::prelude::*;

const CREATE: &[&str] = &[
    "--poll-interval-ms",
    "10",
    "--",
    "neutron",
    "lbaas-loadbalancer-create",
    "--name",
    "lb%{x}",
    "++",
    "x:1-2",
];

#[test]
fn dry_run_lists_commands_in_expansion_order_without_running() {
    let run = fanout()
        .args(&[
            "--dry-run",
            "--",
            "neutron",
            "lbaas-loadbalancer-create",
            "--name",
            "lb%{x}",
            "%{y}",
            "++",
            "x:1-2",
            "y:private,public",
        ])
        .passes();

    let planned = run.stdout_json();
    let texts: Vec<&str> =
        planned.as_array().unwrap().iter().map(|p| p["text"].as_str().unwrap()).collect();
    assert_eq!(
        texts,
        vec![
            "neutron lbaas-loadbalancer-create --name lb1 private",
            "neutron lbaas-loadbalancer-create --name lb1 public",
            "neutron lbaas-loadbalancer-create --name lb2 private",
            "neutron lbaas-loadbalancer-create --name lb2 public",
        ]
    );
    assert_eq!(planned[0]["operation"]["kind"], json!("mutating"));
}

#[test]
fn creates_are_polled_until_active() {
    let stub = Stub::new();
    let run = stub.fanout().args(CREATE).passes();

    let records = run.stdout_json();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    for (i, record) in records.iter().enumerate() {
        let n = i + 1;
        assert_eq!(record["seqnum"], json!(n));
        assert_eq!(record["command"], json!(format!("neutron lbaas-loadbalancer-create --name lb{n}")));
        assert_eq!(record["exitcode"], json!(0));
        assert_eq!(record["output"]["id"], json!(format!("lb{n}-id")));
        assert_eq!(record["success"], json!(format!("lb{n}-id: ACTIVE")));
        assert!(record["done_duration"].as_u64().unwrap() >= record["duration"].as_u64().unwrap());
    }
}

#[test]
fn concurrent_batch_keeps_result_order() {
    let stub = Stub::new();
    let run = stub.fanout().args(&["--concurrency", "4"]).args(CREATE).passes();

    let seqs: Vec<u64> =
        run.stdout_json().as_array().unwrap().iter().map(|r| r["seqnum"].as_u64().unwrap()).collect();
    assert_eq!(seqs, vec![1, 2]);
}

#[test]
fn read_only_and_text_output_need_no_check() {
    let stub = Stub::new();
    let run = stub.fanout().args(&["--", "neutron", "lbaas-pool-delete", "pool%{x}", "++", "x:7"]).passes();

    let records = run.stdout_json();
    assert_eq!(records[0]["output"], json!({"message": "Deleted pool7\n"}));
    assert_eq!(records[0]["success"], json!("lbaas-pool-delete done"));
    assert_eq!(records[0]["done_duration"], records[0]["duration"]);
}

#[test]
fn failed_command_is_recorded_and_batch_continues() {
    let stub = Stub::new();
    let run = stub
        .fanout()
        .args(&["--", "neutron", "lbaas-pool-%{verb}", "p1", "++", "verb:fail,list"])
        .passes();

    let records = run.stdout_json();
    assert_eq!(records[0]["exitcode"], json!(3));
    assert_eq!(records[0]["output"], json!(null));
    assert_eq!(records[0]["success"], json!(null));
    assert_eq!(records[0]["error"], json!("boom\nexit status 3"));
    assert_eq!(records[1]["exitcode"], json!(0));
    assert_eq!(records[1]["success"], json!("lbaas-pool-list done"));
}

#[test]
fn undefined_placeholder_prunes_everything() {
    let stub = Stub::new();
    let run = stub.fanout().args(&["--", "neutron", "lbaas-pool-show", "%{missing}"]).passes();
    assert_eq!(run.stdout, "[]\n");
}

#[test]
fn results_can_be_written_to_a_file() {
    let stub = Stub::new();
    let out = stub.path().join("results.json");
    let run = stub
        .fanout()
        .args(&["--output", out.to_str().unwrap(), "--", "neutron", "lbaas-pool-list"])
        .passes();

    assert!(run.stdout.is_empty());
    let records: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(records[0]["output"], json!({}));
}

#[test]
fn missing_credentials_abort_before_running() {
    let stub = Stub::new();
    stub.fanout()
        .env_remove("OS_USERNAME")
        .args(&["--", "neutron", "lbaas-pool-list"])
        .exits_with(1)
        .stderr_has("No OS_USERNAME environment found");
}

#[test]
fn missing_executable_aborts_before_running() {
    let stub = Stub::new();
    stub.fanout()
        .args(&["--", "fanout-no-such-cli", "lbaas-pool-list"])
        .exits_with(1)
        .stderr_has("executable `fanout-no-such-cli` not found in PATH");
}

#[test]
fn malformed_range_fails_fast() {
    let stub = Stub::new();
    stub.fanout()
        .args(&["--", "neutron", "lbaas-pool-show", "%{x}", "++", "x:1-99999999999999999999999"])
        .exits_with(2)
        .stderr_has("invalid range bound");
}
