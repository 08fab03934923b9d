// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

//! The transitive dependency resolver and package-identity engine of a
//! C/C++ package manager.
//!
//! This facade crate wires together the six leaf components
//! ([`crucible_reference`], [`crucible_settings`], [`crucible_options`],
//! [`crucible_requirements`], [`crucible_recipe`] and [`crucible_graph`])
//! behind a single [`resolve`] entry point, the way `spk-solve` sits atop
//! `spk-solve-graph`, `spk-solve-package-iterator` and `spk-solve-solution`
//! in the upstream workspace this was modelled on.

pub use crucible_config::Config;
pub use crucible_graph::{Diagnostic, Error, Graph, GraphBuilder, Info, Node, NodeId, Result};
pub use crucible_options::{ApplyOutcome, OptionsSet, ScopedName};
pub use crucible_recipe::loader::{HookRegistry, TextLoader};
pub use crucible_recipe::{
    Hooks, InfoEdit, Loader, NoHooks, Recipe, RecipeBuilder, RecipeTemplate, Requirement,
    RequirementsList, Retriever, Store, TracingSink, Visibility, VecSink,
};
pub use crucible_reference::{reference, Reference, Version};
pub use crucible_settings::{Schema, Settings};

/// Expand `root` into a complete, identity-computed [`Graph`].
///
/// `root_reference` is `Some` only when the root under resolution is
/// itself a named package (inspecting its own [`Info`] is meaningful);
/// `None` models the ordinary case of an anonymous consumer project.
/// `retriever` resolves every requirement encountered during expansion;
/// `sink` receives the free-form diagnostic strings non-fatal conditions
/// produce (conflict and override notices).
///
/// This is a thin convenience wrapper over [`GraphBuilder`] for callers
/// with no CLI-style initial options or settings to seed; reach for
/// `GraphBuilder` directly when those are needed.
pub fn resolve(
    root: Recipe,
    root_reference: Option<Reference>,
    retriever: &mut dyn Retriever,
    sink: &mut dyn OutputSink,
) -> Result<Graph> {
    GraphBuilder::new(retriever, sink).build(root, root_reference)
}

pub use crucible_recipe::OutputSink;
