// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible
//
// Whole-graph scenarios from the resolver's scenario table, exercised
// through the public facade rather than `crucible-graph`'s own unit tests.

use crucible::{reference, resolve, GraphBuilder, Recipe, RecipeBuilder, Requirement, Store, VecSink};
use rstest::rstest;

fn chat_recipe(requires: Vec<Requirement>) -> Recipe {
    let schema = crucible::Schema::default_schema();
    let mut builder = RecipeBuilder::new();
    for requirement in requires {
        builder = builder.requires(requirement);
    }
    builder
        .build()
        .instantiate(reference!("Chat/2.3@diego/testing"), &schema)
        .expect("instantiates")
}

#[test]
fn empty_config_say_node_hashes_deterministically() {
    let mut store = Store::with_default_schema();
    let mut sink = VecSink::new();
    let schema = crucible::Schema::default_schema();
    let say = RecipeBuilder::new()
        .build()
        .instantiate(reference!("Say/0.1@diego/testing"), &schema)
        .expect("instantiates");
    let graph = resolve(say, Some(reference!("Say/0.1@diego/testing")), &mut store, &mut sink)
        .expect("resolves");
    let info = graph.node(graph.root()).info().expect("pass 2 ran");
    assert_eq!(info.package_id.len(), 40);
    assert!(info.package_id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn scenario_transitive_line_chat_hello_say() {
    let mut store = Store::with_default_schema();
    store.register(reference!("Say/0.1@diego/testing"), RecipeBuilder::new().build());
    store.register(
        reference!("Hello/1.2@diego/testing"),
        RecipeBuilder::new()
            .requires(Requirement::new(reference!("Say/0.1@diego/testing")))
            .build(),
    );
    let mut sink = VecSink::new();
    let root = chat_recipe(vec![Requirement::new(reference!("Hello/1.2@diego/testing"))]);
    let graph = GraphBuilder::new(&mut store, &mut sink)
        .build(root, Some(reference!("Chat/2.3@diego/testing")))
        .expect("resolves");

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);

    let root_info = graph.node(graph.root()).info().unwrap();
    assert_eq!(root_info.requires, "Hello/1.Y.Z");
    assert!(root_info.full_requires.contains("Hello/1.2@diego/testing:"));
    assert!(root_info.full_requires.contains("Say/0.1@diego/testing:"));
}

#[test]
fn scenario_diamond_no_conflict() {
    let mut store = Store::with_default_schema();
    store.register(reference!("Say/0.1@diego/testing"), RecipeBuilder::new().build());
    store.register(
        reference!("Hello/1.2@diego/testing"),
        RecipeBuilder::new()
            .requires(Requirement::new(reference!("Say/0.1@diego/testing")))
            .build(),
    );
    store.register(
        reference!("Bye/0.2@diego/testing"),
        RecipeBuilder::new()
            .requires(Requirement::new(reference!("Say/0.1@diego/testing")))
            .build(),
    );
    let mut sink = VecSink::new();
    let root = chat_recipe(vec![
        Requirement::new(reference!("Hello/1.2@diego/testing")),
        Requirement::new(reference!("Bye/0.2@diego/testing")),
    ]);
    let graph = GraphBuilder::new(&mut store, &mut sink)
        .build(root, Some(reference!("Chat/2.3@diego/testing")))
        .expect("resolves");

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 4);
    let root_info = graph.node(graph.root()).info().unwrap();
    assert_eq!(root_info.requires, "Bye/0.2\nHello/1.Y.Z");
}

#[test]
fn scenario_diamond_conflict_resolved_by_chat_override() {
    let mut store = Store::with_default_schema();
    store.register(reference!("Say/0.1@diego/testing"), RecipeBuilder::new().build());
    store.register(reference!("Say/0.2@diego/testing"), RecipeBuilder::new().build());
    store.register(
        reference!("Hello/1.2@diego/testing"),
        RecipeBuilder::new()
            .requires(Requirement::new(reference!("Say/0.1@diego/testing")))
            .build(),
    );
    store.register(
        reference!("Bye/0.2@diego/testing"),
        RecipeBuilder::new()
            .requires(Requirement::new(reference!("Say/0.2@diego/testing")))
            .build(),
    );
    let mut sink = VecSink::new();
    let root = chat_recipe(vec![
        Requirement::new(reference!("Hello/1.2@diego/testing")),
        Requirement::new(reference!("Bye/0.2@diego/testing")),
        Requirement::new(reference!("Say/0.2@diego/testing")).overriding(),
    ]);
    let graph = GraphBuilder::new(&mut store, &mut sink)
        .build(root, Some(reference!("Chat/2.3@diego/testing")))
        .expect("resolves");

    let say = graph.public_node("Say").expect("say exists");
    assert_eq!(say.reference().unwrap(), &reference!("Say/0.2@diego/testing"));
    assert!(sink.contains("overriden by your conanfile to Say/0.2@diego/testing"));
    assert!(!sink.contains("Conflict in"));
}

#[test]
fn scenario_diamond_conflict_unresolved_keeps_first_binding() {
    let mut store = Store::with_default_schema();
    store.register(reference!("Say/0.1@diego/testing"), RecipeBuilder::new().build());
    store.register(reference!("Say/0.2@diego/testing"), RecipeBuilder::new().build());
    store.register(
        reference!("Hello/1.2@diego/testing"),
        RecipeBuilder::new()
            .requires(Requirement::new(reference!("Say/0.1@diego/testing")))
            .build(),
    );
    store.register(
        reference!("Bye/0.2@diego/testing"),
        RecipeBuilder::new()
            .requires(Requirement::new(reference!("Say/0.2@diego/testing")))
            .build(),
    );
    let mut sink = VecSink::new();
    let root = chat_recipe(vec![
        Requirement::new(reference!("Hello/1.2@diego/testing")),
        Requirement::new(reference!("Bye/0.2@diego/testing")),
    ]);
    let graph = GraphBuilder::new(&mut store, &mut sink)
        .build(root, Some(reference!("Chat/2.3@diego/testing")))
        .expect("resolves");

    assert!(sink.contains("Conflict in Bye/0.2@diego/testing"));
    let say = graph.public_node("Say").expect("say exists");
    assert_eq!(say.reference().unwrap(), &reference!("Say/0.1@diego/testing"));
}

#[rstest]
#[case("True", 5)]
#[case("False", 4)]
fn scenario_conditional_dependency_on_zip_option(#[case] zip: &str, #[case] expected_nodes: usize) {
    use crucible::{Hooks, OptionsSet, Settings};

    #[derive(Debug)]
    struct SayHooks;

    impl Hooks for SayHooks {
        fn requirements(&self, _settings: &Settings, options: &OptionsSet) -> crucible_recipe::Result<Vec<Requirement>> {
            let mut extra = Vec::new();
            if options.get("zip") == Some("True") {
                extra.push(Requirement::new(reference!("Zlib/2.1@diego/testing")));
            }
            Ok(extra)
        }
    }

    let mut store = Store::with_default_schema();
    store.register(reference!("Zlib/2.1@diego/testing"), RecipeBuilder::new().build());
    store.register(
        reference!("Say/0.1@diego/testing"),
        RecipeBuilder::new()
            .option("zip", ["True", "False"])
            .hooks(|| Box::new(SayHooks))
            .build(),
    );
    let mut sink = VecSink::new();
    let root = chat_recipe(vec![Requirement::new(reference!("Say/0.1@diego/testing"))]);
    let graph = GraphBuilder::new(&mut store, &mut sink)
        .with_option("Say", "zip", zip)
        .build(root, Some(reference!("Chat/2.3@diego/testing")))
        .expect("resolves");

    assert_eq!(graph.node_count(), expected_nodes);
}

#[test]
fn scenario_private_fork_allows_two_say_nodes() {
    let mut store = Store::with_default_schema();
    store.register(reference!("Say/0.1@diego/testing"), RecipeBuilder::new().build());
    store.register(reference!("Say/0.2@diego/testing"), RecipeBuilder::new().build());
    store.register(
        reference!("Hello/1.2@diego/testing"),
        RecipeBuilder::new()
            .requires(Requirement::new(reference!("Say/0.1@diego/testing")).private())
            .build(),
    );
    store.register(
        reference!("Bye/0.2@diego/testing"),
        RecipeBuilder::new()
            .requires(Requirement::new(reference!("Say/0.2@diego/testing")).private())
            .build(),
    );
    let mut sink = VecSink::new();
    let root = chat_recipe(vec![
        Requirement::new(reference!("Hello/1.2@diego/testing")),
        Requirement::new(reference!("Bye/0.2@diego/testing")),
    ]);
    let graph = GraphBuilder::new(&mut store, &mut sink)
        .build(root, Some(reference!("Chat/2.3@diego/testing")))
        .expect("resolves");

    assert_eq!(graph.node_count(), 5);
    assert!(graph.public_node("Say").is_none());
}

#[test]
fn boundary_undefined_option_field_is_reported_with_siblings() {
    let mut store = Store::with_default_schema();
    store.register(
        reference!("Say/0.1@diego/testing"),
        RecipeBuilder::new().option("myoption", ["123", "234"]).build(),
    );
    let mut sink = VecSink::new();
    let root = chat_recipe(vec![Requirement::new(reference!("Say/0.1@diego/testing"))]);
    let err = GraphBuilder::new(&mut store, &mut sink)
        .with_option("Say", "myoption2", "1")
        .build(root, Some(reference!("Chat/2.3@diego/testing")))
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("myoption2"));
    assert!(message.contains("myoption"));
}

#[test]
fn boundary_bad_option_value_names_allowed_set() {
    let mut store = Store::with_default_schema();
    store.register(
        reference!("Say/0.1@diego/testing"),
        RecipeBuilder::new().option("myoption", ["123", "234"]).build(),
    );
    let mut sink = VecSink::new();
    let root = chat_recipe(vec![Requirement::new(reference!("Say/0.1@diego/testing"))]);
    let err = GraphBuilder::new(&mut store, &mut sink)
        .with_option("Say", "myoption", "235")
        .build(root, Some(reference!("Chat/2.3@diego/testing")))
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("235"));
    assert!(message.contains("123"));
    assert!(message.contains("234"));
}

#[test]
fn boundary_removed_settings_enum_member_stays_rejected() {
    let schema = crucible::Schema::default_schema();
    let mut settings = crucible::Settings::new(&schema, ["os"]);
    settings.remove_value("os", "Linux").expect("narrows enum");
    let err = settings.set("os", "Linux").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("Android"));
    assert!(message.contains("Macos"));
    assert!(message.contains("Windows"));
    let (_, allowed) = message.split_once("allowed ").expect("message names the allowed set");
    assert!(!allowed.contains("Linux"));
}

#[test]
fn idempotent_builds_produce_equal_package_ids() {
    let build = || {
        let mut store = Store::with_default_schema();
        store.register(reference!("Say/0.1@diego/testing"), RecipeBuilder::new().build());
        store.register(
            reference!("Hello/1.2@diego/testing"),
            RecipeBuilder::new()
                .requires(Requirement::new(reference!("Say/0.1@diego/testing")))
                .build(),
        );
        let mut sink = VecSink::new();
        let root = chat_recipe(vec![Requirement::new(reference!("Hello/1.2@diego/testing"))]);
        resolve(root, Some(reference!("Chat/2.3@diego/testing")), &mut store, &mut sink).expect("resolves")
    };
    let a = build();
    let b = build();
    assert_eq!(
        a.node(a.root()).info().unwrap().package_id,
        b.node(b.root()).info().unwrap().package_id
    );
}

#[test]
fn permuting_requirement_declaration_order_does_not_change_package_id() {
    let build = |requires: Vec<Requirement>| {
        let mut store = Store::with_default_schema();
        store.register(reference!("Hello/1.2@diego/testing"), RecipeBuilder::new().build());
        store.register(reference!("Bye/0.2@diego/testing"), RecipeBuilder::new().build());
        let mut sink = VecSink::new();
        let root = chat_recipe(requires);
        resolve(root, Some(reference!("Chat/2.3@diego/testing")), &mut store, &mut sink).expect("resolves")
    };
    let a = build(vec![
        Requirement::new(reference!("Hello/1.2@diego/testing")),
        Requirement::new(reference!("Bye/0.2@diego/testing")),
    ]);
    let b = build(vec![
        Requirement::new(reference!("Bye/0.2@diego/testing")),
        Requirement::new(reference!("Hello/1.2@diego/testing")),
    ]);
    assert_eq!(
        a.node(a.root()).info().unwrap().package_id,
        b.node(b.root()).info().unwrap().package_id
    );
}
