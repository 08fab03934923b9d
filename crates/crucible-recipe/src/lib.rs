// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

//! Recipe, loader, retriever and output-sink contracts.
//!
//! These are the oracle boundaries the graph builder consumes: a
//! [`Recipe`] carries the per-package declared state and [`Hooks`], a
//! [`Loader`] turns recipe source text into a [`Recipe`], a [`Retriever`]
//! resolves a [`Reference`] to a recipe, and an [`OutputSink`] receives the
//! diagnostic strings the builder emits.

mod error;
pub mod hooks;
pub mod loader;
mod recipe;
pub mod retriever;
pub mod sink;

pub use crucible_options::OptionsSet;
pub use crucible_reference::Reference;
pub use crucible_requirements::{Requirement, RequirementsList, Visibility};
pub use crucible_settings::Settings;
pub use error::{Error, Result};
pub use hooks::{Hooks, InfoEdit, NoHooks};
pub use loader::Loader;
pub use recipe::{Recipe, RecipeBuilder, RecipeTemplate};
pub use retriever::{Retriever, Store};
pub use sink::{OutputSink, TracingSink, VecSink};
