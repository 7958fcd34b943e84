// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::placeholder::placeholders;
use proptest::prelude::*;

fn bindings(pairs: &[(&str, &[&str])]) -> Bindings {
    pairs
        .iter()
        .map(|(name, values)| (*name, values.iter().map(|v| v.to_string()).collect::<Vec<_>>()))
        .collect()
}

#[test]
fn expands_single_placeholder_in_order() {
    let b = bindings(&[("x", &["1", "2"])]);
    assert_eq!(
        expand("create --name lb%{x}", &b),
        vec!["create --name lb1", "create --name lb2"]
    );
}

#[test]
fn outer_loop_follows_first_placeholder() {
    let b = bindings(&[("x", &["1", "2"]), ("y", &["a", "b"])]);
    assert_eq!(
        expand("--name lb%{x} %{y}", &b),
        vec!["--name lb1 a", "--name lb1 b", "--name lb2 a", "--name lb2 b"]
    );
}

#[test]
fn order_follows_template_not_binding_order() {
    let b = bindings(&[("y", &["a", "b"]), ("x", &["1", "2"])]);
    assert_eq!(expand("%{y}-%{x}", &b), vec!["a-1", "a-2", "b-1", "b-2"]);
}

#[test]
fn repeated_placeholder_shares_one_value() {
    let b = bindings(&[("x", &["1", "2"])]);
    assert_eq!(expand("lb%{x} pool%{x}", &b), vec!["lb1 pool1", "lb2 pool2"]);
}

#[test]
fn template_without_placeholders_is_emitted_once() {
    let b = bindings(&[("x", &["1", "2"])]);
    assert_eq!(expand("neutron lbaas-loadbalancer-list", &b), vec!["neutron lbaas-loadbalancer-list"]);
}

#[test]
fn unused_bindings_are_ignored() {
    let b = bindings(&[("x", &["1"]), ("unused", &["a", "b", "c"])]);
    assert_eq!(expand("lb%{x}", &b), vec!["lb1"]);
}

#[yare::parameterized(
    undeclared      = { "lb%{x} %{missing}" },
    declared_empty  = { "lb%{x} %{empty}" },
    only_undeclared = { "%{missing}" },
)]
fn empty_value_list_prunes_branch(template: &str) {
    let b = bindings(&[("x", &["1", "2"]), ("empty", &[])]);
    assert!(expand(template, &b).is_empty());
}

#[test]
fn values_are_not_rescanned() {
    let b = bindings(&[("x", &["%{x}", "%{y}"]), ("y", &["never"])]);
    assert_eq!(expand("lb%{x}", &b), vec!["lb%{x}", "lb%{y}"]);
}

#[test]
fn invalid_tokens_are_left_alone() {
    let b = bindings(&[("x", &["1"])]);
    assert_eq!(expand("%{1bad} %{x} ${x}", &b), vec!["%{1bad} 1 ${x}"]);
}

#[test]
fn expansion_is_idempotent() {
    let b = bindings(&[("x", &["1", "2", "3"]), ("y", &["a", "b"])]);
    let template = "neutron lbaas-pool-create --name p%{x}%{y} --lb lb%{x}";
    assert_eq!(expand(template, &b), expand(template, &b));
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,4}"
}

proptest! {
    #[test]
    fn output_count_is_product_of_value_list_lengths(
        lists in proptest::collection::btree_map(name_strategy(), proptest::collection::vec("[a-z0-9]{1,3}", 0..4), 1..4),
        filler in "[a-z -]{0,6}",
    ) {
        let template: String = lists
            .keys()
            .map(|name| format!("{filler}%{{{name}}}"))
            .collect::<Vec<_>>()
            .join(" ");
        let b: Bindings = lists.clone().into_iter().collect();

        let commands = expand(&template, &b);
        let expected: usize = lists.values().map(Vec::len).product();

        prop_assert_eq!(commands.len(), expected);
        for command in &commands {
            prop_assert!(placeholders(command).is_empty());
        }
    }
}
