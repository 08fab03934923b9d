// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use std::collections::HashMap;

use crucible_reference::Reference;
use crucible_settings::Schema;

use crate::recipe::RecipeTemplate;
use crate::{Error, Recipe, Result};

#[cfg(test)]
#[path = "./retriever_test.rs"]
mod retriever_test;

/// Resolves a [`Reference`] to a freshly-instantiated [`Recipe`].
///
/// Implementations are expected to memoise the *loaded template* for a
/// reference, but must still hand the graph builder an independently
/// mutable [`Recipe`] on every call: private requirements create more than
/// one node for the same reference, each with its own settings/options
/// state.
pub trait Retriever {
    fn fetch(&mut self, reference: &Reference) -> Result<Recipe>;
}

/// An in-memory recipe store keyed by reference, backed by [`RecipeTemplate`]
/// values registered ahead of time. Stands in for the network store and
/// recipe loader this core treats as external collaborators.
pub struct Store {
    schema: Schema,
    templates: HashMap<String, RecipeTemplate>,
}

impl Store {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            templates: HashMap::new(),
        }
    }

    pub fn with_default_schema() -> Self {
        Self::new(Schema::default_schema())
    }

    pub fn register(&mut self, reference: Reference, template: RecipeTemplate) -> &mut Self {
        self.templates.insert(reference.to_string(), template);
        self
    }
}

impl Retriever for Store {
    fn fetch(&mut self, reference: &Reference) -> Result<Recipe> {
        let template = self
            .templates
            .get(&reference.to_string())
            .ok_or_else(|| Error::MissingRequirement(reference.to_string()))?;
        template.instantiate(reference.clone(), &self.schema)
    }
}
