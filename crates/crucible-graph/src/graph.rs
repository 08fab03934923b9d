// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use indexmap::IndexSet;

use crate::error::Diagnostic;
use crate::node::{Edge, Node, NodeId};

/// The expanded dependency DAG: a node arena plus a deduplicated, ordered
/// edge set. Single-use and single-root: one call to
/// [`crate::builder::GraphBuilder::build`] produces one [`Graph`].
#[derive(Debug)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: IndexSet<Edge>,
    pub(crate) root: NodeId,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Graph {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Find the single public node for a package name, if one exists.
    /// Private-only nodes are never returned, so a name clash against them
    /// alone does not register as a conflict (§4.5: private requirements
    /// bypass the dedup index entirely).
    pub fn public_node(&self, name: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| n.reference.as_ref().map(|r| r.name() == name).unwrap_or(false) && self.is_public(n.id))
    }

    fn is_public(&self, id: NodeId) -> bool {
        id == self.root
            || self
                .nodes
                .iter()
                .any(|n| n.public_deps.contains(&id))
    }

    /// Non-fatal diagnostics collected during construction (version/option
    /// conflicts, override notices), in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Every node reachable from root by any edge (public or private),
    /// per invariant 2 ("every non-root node is reachable from root").
    pub fn reachable_from_root(&self) -> std::collections::HashSet<NodeId> {
        let mut seen = std::collections::HashSet::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if seen.insert(id) {
                stack.extend(self.node(id).all_deps());
            }
        }
        seen
    }
}
