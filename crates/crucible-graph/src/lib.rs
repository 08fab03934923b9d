// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

//! Depth-first dependency graph construction and package-identity
//! derivation (§4 of the data model): pass 1 expands a root recipe into a
//! full [`Graph`] of [`Node`]s and [`Edge`]s, consulting a
//! `crucible_recipe::Retriever` for every requirement; pass 2 walks the
//! finished graph in dependency post-order to derive each node's [`Info`],
//! including its package id.

mod builder;
mod error;
mod graph;
mod info;
mod node;

pub use builder::GraphBuilder;
pub use error::{Diagnostic, Error, Result};
pub use graph::Graph;
pub use info::Info;
pub use node::{Edge, Node, NodeId};
