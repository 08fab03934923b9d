// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

//! Pass 2: the post-order info/package-id computer (§4.6).

use std::collections::HashSet;

use crucible_recipe::InfoEdit;
use crucible_requirements::Visibility;

use crate::node::NodeId;
use crate::Graph;

#[cfg(test)]
#[path = "./info_test.rs"]
mod info_test;

/// A node's derived identity record: the literal ("full") configuration
/// applied to it, and the reduced, identity-shaping view used for hashing
/// and for the textual `requires` display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Info {
    pub full_settings: String,
    pub settings: String,
    pub full_options: String,
    pub options: String,
    pub full_requires: String,
    pub requires: String,
    pub package_id: String,
}

/// Run pass 2 over every node reachable from `root`, in dependency
/// post-order: a node's [`Info`] is only derived once every node it
/// depends on (public or private) already has one, so `full_requires` can
/// embed each dependency's already-computed package id.
pub(crate) fn compute_all(graph: &mut Graph) {
    let root = graph.root();
    let mut done = HashSet::new();
    visit(graph, root, &mut done);
}

fn visit(graph: &mut Graph, id: NodeId, done: &mut HashSet<NodeId>) {
    if done.contains(&id) {
        return;
    }
    let deps: Vec<NodeId> = graph.node(id).all_deps().collect();
    for dep in deps {
        visit(graph, dep, done);
    }
    let info = derive(graph, id);
    graph.node_mut(id).info = Some(info);
    done.insert(id);
}

fn derive(graph: &Graph, id: NodeId) -> Info {
    let node = graph.node(id);
    let recipe = node.recipe();

    let full_settings = recipe.settings().dump();
    let full_options = recipe.options().dump();

    let mut settings_pairs = recipe.settings().pairs();
    let mut options_pairs = recipe.options().own_pairs();
    let mut requires_entries: Vec<(String, String)> = recipe
        .requirements()
        .iter()
        .map(|requirement| {
            let name = requirement.reference.name().to_string();
            let version = if requirement.visibility == Visibility::Private || requirement.is_override {
                requirement.reference.version().patch()
            } else {
                requirement.reference.version().major()
            };
            (name, version)
        })
        .collect();

    if let Some(reference) = node.reference() {
        for edit in recipe.hooks().conan_info(reference) {
            apply_edit(edit, &mut settings_pairs, &mut options_pairs, &mut requires_entries);
        }
    }

    let mut full_lines = Vec::new();
    let mut seen = HashSet::new();
    walk_public(graph, id, &mut seen, &mut full_lines);
    for &dep in node.private_deps() {
        push_full_line(graph, dep, &mut seen, &mut full_lines);
    }
    full_lines.sort();

    let mut requires_lines: Vec<String> = requires_entries
        .iter()
        .map(|(name, version)| format!("{name}/{version}"))
        .collect();
    requires_lines.sort();

    let settings_dump = join_pairs(&settings_pairs);
    let options_dump = join_pairs(&options_pairs);
    let requires_dump = requires_lines.join("\n");

    let package_id = sha1_hex(&format!("{settings_dump}\n{options_dump}\n{requires_dump}"));

    Info {
        full_settings,
        settings: settings_dump,
        full_options,
        options: options_dump,
        full_requires: full_lines.join("\n"),
        requires: requires_dump,
        package_id,
    }
}

fn apply_edit(
    edit: InfoEdit,
    settings_pairs: &mut Vec<(String, String)>,
    options_pairs: &mut Vec<(String, String)>,
    requires_entries: &mut Vec<(String, String)>,
) {
    match edit {
        InfoEdit::ReplaceRequirementVersion { name, version } => {
            if let Some(entry) = requires_entries.iter_mut().find(|(n, _)| n == &name) {
                entry.1 = version;
            }
        }
        InfoEdit::RenameRequirement { name, new_name } => {
            if let Some(entry) = requires_entries.iter_mut().find(|(n, _)| n == &name) {
                entry.0 = new_name;
            }
        }
        InfoEdit::AddSyntheticRequirement { reference } => {
            if let Some((name, version)) = reference.split_once('/') {
                requires_entries.push((name.to_string(), version.to_string()));
            }
        }
        InfoEdit::EraseSetting { path, value } => upsert(settings_pairs, path, value),
        InfoEdit::EraseOption { name, value } => upsert(options_pairs, name, value),
    }
}

fn upsert(pairs: &mut Vec<(String, String)>, key: String, value: String) {
    match pairs.iter_mut().find(|(k, _)| *k == key) {
        Some(entry) => entry.1 = value,
        None => pairs.push((key, value)),
    }
}

fn join_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Walk every dependency reachable from `id` through a chain of entirely
/// public edges, recording `reference:package_id` for each, deduplicated by
/// node.
fn walk_public(graph: &Graph, id: NodeId, seen: &mut HashSet<NodeId>, out: &mut Vec<String>) {
    for &dep in graph.node(id).public_deps() {
        if push_full_line(graph, dep, seen, out) {
            walk_public(graph, dep, seen, out);
        }
    }
}

/// Record `reference:package_id` for `id` if not already seen. Returns
/// whether it was newly recorded.
fn push_full_line(graph: &Graph, id: NodeId, seen: &mut HashSet<NodeId>, out: &mut Vec<String>) -> bool {
    if !seen.insert(id) {
        return false;
    }
    let node = graph.node(id);
    let package_id = node.info().map(|info| info.package_id.as_str()).unwrap_or_default();
    out.push(format!("{}:{package_id}", node.label()));
    true
}

fn sha1_hex(input: &str) -> String {
    let digest = ring::digest::digest(&ring::digest::SHA1_FOR_LEGACY_USE_ONLY, input.as_bytes());
    data_encoding::HEXLOWER.encode(digest.as_ref())
}
