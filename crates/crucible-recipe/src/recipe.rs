// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use indexmap::IndexMap;

use crucible_options::OptionsSet;
use crucible_reference::Reference;
use crucible_requirements::{Requirement, RequirementsList};
use crucible_settings::{Schema, Settings};

use crate::hooks::{Hooks, NoHooks};
use crate::Result;

/// A single node's mutable recipe state: its effective settings and
/// options, its requirements list (static entries, then whatever pass 1
/// merges in from the `requirements()` hook), and its hooks.
///
/// Mutable during graph construction; read-only once the info/id pass
/// begins.
#[derive(Debug)]
pub struct Recipe {
    reference: Reference,
    settings: Settings,
    options: OptionsSet,
    requirements: RequirementsList,
    hooks: Box<dyn Hooks>,
}

impl Recipe {
    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    pub fn options(&self) -> &OptionsSet {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut OptionsSet {
        &mut self.options
    }

    pub fn requirements(&self) -> &RequirementsList {
        &self.requirements
    }

    pub fn requirements_mut(&mut self) -> &mut RequirementsList {
        &mut self.requirements
    }

    pub fn hooks(&self) -> &dyn Hooks {
        self.hooks.as_ref()
    }

    /// Run the `config()` hook, letting it mutate this node's own
    /// settings/options after inherited values have been applied (§4.5
    /// pass 1, step 3). A no-op for recipes with no hooks.
    pub fn run_config_hook(&mut self) -> Result<()> {
        let hooks = &self.hooks;
        let settings = &mut self.settings;
        let options = &mut self.options;
        hooks.config(settings, options)
    }

    /// Run the `requirements()` hook and return the dynamic requirements
    /// it contributes (§4.5 pass 1, step 4). Static requirements from
    /// `requires` are already present from [`RecipeTemplate::instantiate`];
    /// the caller is responsible for merging these into the same list.
    pub fn run_requirements_hook(&mut self) -> Result<Vec<Requirement>> {
        let hooks = &self.hooks;
        let settings = &self.settings;
        let options = &self.options;
        hooks.requirements(settings, options)
    }
}

/// The declared, immutable shape of a recipe as produced by the loader: the
/// schema-independent pieces that are combined with the shared settings
/// schema to build a fresh, mutable [`Recipe`] instance each time the
/// retriever resolves a reference.
pub struct RecipeTemplate {
    declared_settings: Vec<String>,
    options_schema: IndexMap<String, Vec<String>>,
    default_options: Vec<(String, String)>,
    requires: Vec<Requirement>,
    hook_factory: Box<dyn Fn() -> Box<dyn Hooks> + Send + Sync>,
}

impl RecipeTemplate {
    /// Instantiate a fresh, independently-mutable [`Recipe`] for `reference`
    /// against the given settings schema. Called once per node: public
    /// dedup means this normally runs once per distinct reference, but
    /// private edges may call it more than once for the same reference,
    /// each producing its own node state.
    pub fn instantiate(&self, reference: Reference, schema: &Schema) -> Result<Recipe> {
        let settings = Settings::new(schema, self.declared_settings.iter());
        let mut options = OptionsSet::new(self.options_schema.clone());
        for (name, value) in &self.default_options {
            options
                .set(name, value.clone(), reference.to_string())
                .map_err(|source| crate::Error::Options {
                    reference: reference.to_string(),
                    source,
                })?;
        }
        let requirements = RequirementsList::from_iter(self.requires.iter().cloned());
        let hooks = (self.hook_factory)();
        Ok(Recipe {
            reference,
            settings,
            options,
            requirements,
            hooks,
        })
    }
}

/// An ergonomic builder for a [`RecipeTemplate`], used by retriever/store
/// implementations (and by tests) in place of a textual loader.
pub struct RecipeBuilder {
    declared_settings: Vec<String>,
    options_schema: IndexMap<String, Vec<String>>,
    default_options: Vec<(String, String)>,
    requires: Vec<Requirement>,
    hook_factory: Box<dyn Fn() -> Box<dyn Hooks> + Send + Sync>,
}

impl Default for RecipeBuilder {
    fn default() -> Self {
        Self {
            declared_settings: Vec::new(),
            options_schema: IndexMap::new(),
            default_options: Vec::new(),
            requires: Vec::new(),
            hook_factory: Box::new(|| Box::new(NoHooks)),
        }
    }
}

impl RecipeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn settings<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared_settings = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn option<I, S>(mut self, name: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options_schema
            .insert(name.into(), allowed.into_iter().map(Into::into).collect());
        self
    }

    pub fn default_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_options.push((name.into(), value.into()));
        self
    }

    pub fn requires(mut self, requirement: Requirement) -> Self {
        self.requires.push(requirement);
        self
    }

    pub fn hooks<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Hooks> + Send + Sync + 'static,
    {
        self.hook_factory = Box::new(factory);
        self
    }

    pub fn build(self) -> RecipeTemplate {
        RecipeTemplate {
            declared_settings: self.declared_settings,
            options_schema: self.options_schema,
            default_options: self.default_options,
            requires: self.requires,
            hook_factory: self.hook_factory,
        }
    }
}
