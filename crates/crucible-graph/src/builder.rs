// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

//! Pass 1: depth-first graph expansion (§4.5).

use indexmap::IndexSet;

use crucible_options::ApplyOutcome;
use crucible_recipe::{OutputSink, Recipe, Retriever};
use crucible_reference::Reference;
use crucible_requirements::{Requirement, Visibility};

use crate::error::{Diagnostic, Error, Result};
use crate::graph::Graph;
use crate::info;
use crate::node::{Edge, Node, NodeId};

#[cfg(test)]
#[path = "./builder_test.rs"]
mod builder_test;

/// A scoped option write queued for a not-yet-visited descendant: `target`
/// is a package name, `writer` is the attribution string surfaced in a
/// conflict diagnostic.
#[derive(Clone, Debug)]
struct PendingOption {
    target: String,
    name: String,
    value: String,
    writer: String,
}

/// Expands a root [`Recipe`] into a complete [`Graph`], consulting a
/// [`Retriever`] for every requirement and forwarding diagnostic text to an
/// [`OutputSink`] as it goes.
pub struct GraphBuilder<'a> {
    retriever: &'a mut dyn Retriever,
    sink: &'a mut dyn OutputSink,
    initial_settings: Vec<(String, String)>,
    initial_options: Vec<PendingOption>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(retriever: &'a mut dyn Retriever, sink: &'a mut dyn OutputSink) -> Self {
        Self {
            retriever,
            sink,
            initial_settings: Vec::new(),
            initial_options: Vec::new(),
        }
    }

    /// Queue a CLI-style scoped option write (`target:name=value`), applied
    /// as the graph is expanded rather than up front, so it participates in
    /// the same first-write-wins conflict bookkeeping as a recipe's own
    /// `default_options`.
    pub fn with_option(mut self, target: impl Into<String>, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.initial_options.push(PendingOption {
            target: target.into(),
            name: name.into(),
            value: value.into(),
            writer: "cli".to_string(),
        });
        self
    }

    /// Queue a CLI-style settings write, applied to every node in the graph
    /// that declares the field; nodes that don't declare it silently ignore
    /// it, matching the settings-propagation rule.
    pub fn with_setting(mut self, path: impl Into<String>, value: impl Into<String>) -> Self {
        self.initial_settings.push((path.into(), value.into()));
        self
    }

    /// Expand `root` into a complete graph and run the info/id pass.
    /// `root_reference` is `Some` only when the root under test is itself a
    /// named package (used so a root's own `Info` can be inspected); `None`
    /// models the ordinary anonymous consumer project (§3).
    pub fn build(mut self, root: Recipe, root_reference: Option<Reference>) -> Result<Graph> {
        let mut graph = Graph {
            nodes: Vec::new(),
            edges: IndexSet::new(),
            root: NodeId(0),
            diagnostics: Vec::new(),
        };
        graph.nodes.push(Node {
            id: NodeId(0),
            reference: root_reference,
            recipe: root,
            parent: None,
            public_deps: Vec::new(),
            private_deps: Vec::new(),
            info: None,
        });

        let options = std::mem::take(&mut self.initial_options);
        let settings = self.initial_settings.clone();
        let mut ancestry = Vec::new();
        self.expand(&mut graph, NodeId(0), options, settings, &mut ancestry)?;

        info::compute_all(&mut graph);
        Ok(graph)
    }

    /// Run pass 1 for one node: apply inherited values, run the `config()`
    /// hook, collect requirements, then recurse into each one.
    fn expand(
        &mut self,
        graph: &mut Graph,
        id: NodeId,
        inherited_options: Vec<PendingOption>,
        inherited_settings: Vec<(String, String)>,
        ancestry: &mut Vec<NodeId>,
    ) -> Result<()> {
        tracing::debug!(reference = %graph.node(id).label(), "expanding node");

        // Step 1: apply whatever inherited scoped options are addressed to
        // this node by name.
        if let Some(name) = graph.node(id).reference().map(|r| r.name().to_string()) {
            for pending in inherited_options.iter().filter(|p| p.target == name) {
                self.apply_option(graph, id, pending)?;
            }
        }

        // Step 2: apply inherited settings, silently dropping fields this
        // node's recipe never declared.
        for (path, value) in &inherited_settings {
            let label = graph.node(id).label();
            let outcome = graph.node_mut(id).recipe.settings_mut().set(path, value.clone());
            match outcome {
                Ok(()) => {}
                Err(crucible_settings::Error::UndefinedField { .. }) => {}
                Err(source) => return Err(Error::Settings { reference: label, source }),
            }
        }

        // Step 3: the `config()` hook, letting the recipe adjust its own
        // settings/options now that inherited values are in place.
        graph.node_mut(id).recipe.run_config_hook()?;

        // Step 4: collect requirements -- static entries are already
        // present from instantiation; merge in whatever the
        // `requirements()` hook contributes dynamically.
        let dynamic = graph.node_mut(id).recipe.run_requirements_hook()?;
        for requirement in dynamic {
            graph.node_mut(id).recipe.requirements_mut().update(requirement);
        }

        // Build the option pool handed to every child of this node: the
        // pool passed down to us, plus whatever this node itself wants to
        // push onto its own dependencies (from `default_options` and
        // `config()`), addressed at any depth.
        let mut child_pool = inherited_options;
        let label = graph.node(id).label();
        for (target, name, value) in graph.node(id).recipe.options().all_foreign() {
            child_pool.push(PendingOption {
                target: target.to_string(),
                name: name.to_string(),
                value: value.to_string(),
                writer: label.clone(),
            });
        }

        // Step 5: resolve each non-override requirement into an edge.
        let requirements: Vec<Requirement> = graph.node(id).recipe.requirements().iter().cloned().collect();
        ancestry.push(id);
        for requirement in requirements {
            if requirement.is_override {
                continue;
            }
            self.resolve_requirement(graph, id, requirement, &child_pool, &inherited_settings, ancestry)?;
        }
        ancestry.pop();

        Ok(())
    }

    fn apply_option(&mut self, graph: &mut Graph, id: NodeId, pending: &PendingOption) -> Result<()> {
        let target_label = graph.node(id).label();
        let outcome = graph
            .node_mut(id)
            .recipe
            .options_mut()
            .apply_own(&pending.name, pending.value.clone(), pending.writer.clone())
            .map_err(|source| Error::Options {
                reference: target_label.clone(),
                source,
            })?;
        if let ApplyOutcome::Conflict { first_value, first_writer } = outcome {
            let diagnostic = Diagnostic::OptionConflict {
                consumer: pending.writer.clone(),
                target: target_label,
                name: pending.name.clone(),
                new_value: pending.value.clone(),
                current_value: first_value,
                first_writer,
            };
            self.sink.push(diagnostic.message());
            graph.diagnostics.push(diagnostic);
        }
        Ok(())
    }

    /// Resolve one requirement into an edge (and, if needed, a fresh node),
    /// honoring override resolution, public dedup, and private bypass.
    fn resolve_requirement(
        &mut self,
        graph: &mut Graph,
        parent: NodeId,
        requirement: Requirement,
        child_pool: &[PendingOption],
        child_settings: &[(String, String)],
        ancestry: &mut Vec<NodeId>,
    ) -> Result<()> {
        let name = requirement.reference.name().to_string();
        let parent_label = graph.node(parent).label();

        // An ancestor's `override = true` pin always wins, regardless of
        // whether this particular requirement is the one that conflicts;
        // checking on every resolution (not only on conflict) is
        // behaviorally equivalent to resolving only on conflict, without
        // needing to retroactively redirect edges created before the
        // override was discovered.
        let effective = find_override(graph, ancestry, &name).unwrap_or_else(|| requirement.reference.clone());
        if effective != requirement.reference {
            let diagnostic = Diagnostic::OverrideNotice {
                consumer: parent_label.clone(),
                old: requirement.reference.to_string(),
                new: effective.to_string(),
            };
            self.sink.push(diagnostic.message());
            graph.diagnostics.push(diagnostic);
            graph.node_mut(parent).recipe.requirements_mut().replace(Requirement {
                reference: effective.clone(),
                visibility: requirement.visibility,
                is_override: false,
            });
        }

        if requirement.visibility == Visibility::Private {
            check_cycle(graph, ancestry, &effective)?;
            let child = self.create_child(graph, parent, &effective, child_pool.to_vec(), child_settings.to_vec(), ancestry)?;
            graph.node_mut(parent).private_deps.push(child);
            graph.edges.insert(Edge {
                from: parent,
                to: child,
                visibility: Visibility::Private,
            });
            return Ok(());
        }

        match graph.public_node(&name).map(|n| n.id()) {
            None => {
                check_cycle(graph, ancestry, &effective)?;
                let child = self.create_child(graph, parent, &effective, child_pool.to_vec(), child_settings.to_vec(), ancestry)?;
                graph.node_mut(parent).public_deps.push(child);
                graph.edges.insert(Edge {
                    from: parent,
                    to: child,
                    visibility: Visibility::Public,
                });
            }
            Some(existing) => {
                let existing_reference = graph
                    .node(existing)
                    .reference()
                    .expect("a publicly-reachable node always carries a reference")
                    .clone();
                let diagnostic = Diagnostic::VersionConflict {
                    consumer: parent_label,
                    requirement: effective.to_string(),
                    existing: existing_reference.to_string(),
                };
                self.sink.push(diagnostic.message());
                graph.diagnostics.push(diagnostic);
                graph.node_mut(parent).public_deps.push(existing);
                graph.edges.insert(Edge {
                    from: parent,
                    to: existing,
                    visibility: Visibility::Public,
                });
            }
        }
        Ok(())
    }

    fn create_child(
        &mut self,
        graph: &mut Graph,
        parent: NodeId,
        reference: &Reference,
        pool: Vec<PendingOption>,
        settings: Vec<(String, String)>,
        ancestry: &mut Vec<NodeId>,
    ) -> Result<NodeId> {
        let recipe = self.retriever.fetch(reference).map_err(Error::Recipe)?;
        let id = NodeId(graph.nodes.len());
        graph.nodes.push(Node {
            id,
            reference: Some(reference.clone()),
            recipe,
            parent: Some(parent),
            public_deps: Vec::new(),
            private_deps: Vec::new(),
            info: None,
        });
        self.expand(graph, id, pool, settings, ancestry)?;
        Ok(id)
    }
}

/// Search the current expansion call stack, closest ancestor first (the
/// consuming node itself included), for an `override = true` pin on
/// `name`.
fn find_override(graph: &Graph, ancestry: &[NodeId], name: &str) -> Option<Reference> {
    ancestry.iter().rev().find_map(|&id| {
        graph
            .node(id)
            .recipe
            .requirements()
            .get(name)
            .filter(|r| r.is_override)
            .map(|r| r.reference.clone())
    })
}

fn check_cycle(graph: &Graph, ancestry: &[NodeId], reference: &Reference) -> Result<()> {
    let cycles = ancestry
        .iter()
        .any(|&id| graph.node(id).reference().map(|r| r.name()) == Some(reference.name()));
    if cycles {
        return Err(Error::Cycle(reference.to_string()));
    }
    Ok(())
}
