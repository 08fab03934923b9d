// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use crucible_reference::reference;

use super::*;

#[test]
fn update_inserts_new_entry() {
    let mut list = RequirementsList::new();
    let outcome = list.update(Requirement::new(reference!("Say/0.1@diego/testing")));
    assert_eq!(outcome, MergeOutcome::Inserted);
    assert_eq!(list.len(), 1);
}

#[test]
fn update_same_reference_is_noop() {
    let mut list = RequirementsList::new();
    list.update(Requirement::new(reference!("Say/0.1@diego/testing")));
    let outcome = list.update(Requirement::new(reference!("Say/0.1@diego/testing")));
    assert_eq!(outcome, MergeOutcome::NoOp);
    assert_eq!(list.len(), 1);
}

#[test]
fn update_different_reference_with_override_replaces() {
    let mut list = RequirementsList::new();
    list.update(Requirement::new(reference!("Say/0.1@diego/testing")));
    let outcome = list.update(Requirement::new(reference!("Say/0.2@diego/testing")).overriding());
    assert!(matches!(outcome, MergeOutcome::Replaced { .. }));
    assert_eq!(
        list.get("Say").unwrap().reference,
        reference!("Say/0.2@diego/testing")
    );
}

#[test]
fn update_different_reference_without_override_conflicts() {
    let mut list = RequirementsList::new();
    list.update(Requirement::new(reference!("Say/0.1@diego/testing")));
    let outcome = list.update(Requirement::new(reference!("Say/0.2@diego/testing")));
    assert!(matches!(outcome, MergeOutcome::Conflict { .. }));
    assert_eq!(
        list.get("Say").unwrap().reference,
        reference!("Say/0.1@diego/testing")
    );
}

#[test]
fn merge_transitive_preserves_visibility() {
    let mut child = RequirementsList::new();
    child.update(Requirement::new(reference!("Say/0.1@diego/testing")).private());

    let mut parent = RequirementsList::new();
    parent.merge_transitive(&child);

    assert_eq!(parent.get("Say").unwrap().visibility, Visibility::Private);
}

#[test]
fn equality_compares_full_content() {
    let mut a = RequirementsList::new();
    a.update(Requirement::new(reference!("Say/0.1@diego/testing")));
    let mut b = RequirementsList::new();
    b.update(Requirement::new(reference!("Say/0.1@diego/testing")).private());
    assert_ne!(a, b);

    let mut c = RequirementsList::new();
    c.update(Requirement::new(reference!("Say/0.1@diego/testing")));
    assert_eq!(a, c);
}

#[test]
fn replace_overwrites_without_conflict_bookkeeping() {
    let mut list = RequirementsList::new();
    list.update(Requirement::new(reference!("Say/0.1@diego/testing")));
    list.replace(Requirement::new(reference!("Say/0.2@diego/testing")));
    assert_eq!(
        list.get("Say").unwrap().reference,
        reference!("Say/0.2@diego/testing")
    );
    assert_eq!(list.len(), 1);
}

#[test]
fn declaration_order_is_preserved_in_iteration() {
    let mut list = RequirementsList::new();
    list.update(Requirement::new(reference!("Bye/0.2@diego/testing")));
    list.update(Requirement::new(reference!("Hello/1.2@diego/testing")));
    let names: Vec<&str> = list.iter().map(|r| r.reference.name()).collect();
    assert_eq!(names, vec!["Bye", "Hello"]);
}
