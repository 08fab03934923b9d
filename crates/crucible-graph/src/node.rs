// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use crucible_recipe::{Recipe, Reference};
use crucible_requirements::Visibility;

use crate::info::Info;

/// An index into [`crate::Graph`]'s node arena.
///
/// Nodes never move once created (expansion only appends), so a `NodeId`
/// stays valid for the lifetime of the graph that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A graph vertex: the owning reference (`None` for an anonymous root), its
/// mutable [`Recipe`] state, its public/private dependency lists, a
/// back-link to the parent that caused its creation (diagnostics only,
/// never traversed structurally), and the [`Info`] record written once pass
/// 2 runs.
#[derive(Debug)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) reference: Option<Reference>,
    pub(crate) recipe: Recipe,
    pub(crate) parent: Option<NodeId>,
    pub(crate) public_deps: Vec<NodeId>,
    pub(crate) private_deps: Vec<NodeId>,
    pub(crate) info: Option<Info>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// `None` for the anonymous root (a `conanfile.txt`-style consumer with
    /// no name/version of its own); `Some` for every real package node, and
    /// optionally for a root under test that is itself a named package.
    pub fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn public_deps(&self) -> &[NodeId] {
        &self.public_deps
    }

    pub fn private_deps(&self) -> &[NodeId] {
        &self.private_deps
    }

    /// Every direct dependency, public then private, in that order.
    pub fn all_deps(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.public_deps.iter().chain(self.private_deps.iter()).copied()
    }

    /// Populated only after pass 2 runs; `None` during construction.
    pub fn info(&self) -> Option<&Info> {
        self.info.as_ref()
    }

    /// A label usable in diagnostics: the reference's string form, or the
    /// literal `root` token for the anonymous root, matching the loader's
    /// own `root:`-prefixed error convention.
    pub fn label(&self) -> String {
        match &self.reference {
            Some(reference) => reference.to_string(),
            None => "root".to_string(),
        }
    }
}

/// A directed, visibility-tagged edge between two nodes. Two edges are
/// equal iff both endpoints and the visibility match; the graph's edge set
/// is therefore a true set, not a multiset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub visibility: Visibility,
}
