// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

//! A declarative recipe-source loader.
//!
//! The upstream tool this core is modelled on loads recipes by evaluating a
//! Python source file and looking for exactly one class inheriting a base
//! recipe type. A compiled rewrite can't embed that scripting runtime, so
//! per the oracle boundary this core expects (§9 "Runtime-loaded recipes"),
//! recipe *data* is expressed as a small declarative document and recipe
//! *behaviour* (the `config`/`requirements`/`conan_info` hooks) is supplied
//! out of band through a [`HookRegistry`] the document references by name.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::hooks::Hooks;
use crate::recipe::{RecipeBuilder, RecipeTemplate};
use crate::{Error, Requirement, Result};

#[cfg(test)]
#[path = "./loader_test.rs"]
mod loader_test;

type HookFactory = Arc<dyn Fn() -> Box<dyn Hooks> + Send + Sync>;

/// Turns recipe source text into a [`RecipeTemplate`].
///
/// `consumer` mirrors the upstream `consumer_flag`: true when this load is
/// for the root, user-facing project rather than a reusable dependency
/// recipe, which only affects how a load failure is attributed.
pub trait Loader {
    fn load(&self, text: &str, consumer: bool) -> Result<RecipeTemplate>;
}

/// Maps the hook name a recipe document references to a factory that
/// builds a fresh [`Hooks`] instance for each recipe instantiation.
#[derive(Default, Clone)]
pub struct HookRegistry {
    factories: HashMap<String, HookFactory>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Hooks> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
        self
    }

    fn factory(&self, name: &str) -> Result<HookFactory> {
        self.factories
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownHook(name.to_owned()))
    }
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    recipes: Vec<RawRecipe>,
}

#[derive(Deserialize)]
struct RawRecipe {
    name: String,
    #[serde(default)]
    settings: Vec<String>,
    #[serde(default)]
    options: IndexMap<String, Vec<String>>,
    #[serde(default)]
    default_options: IndexMap<String, String>,
    #[serde(default)]
    requires: Vec<RawRequirement>,
    #[serde(default)]
    hooks: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRequirement {
    Plain(String),
    Detailed {
        #[serde(rename = "ref")]
        reference: String,
        #[serde(default)]
        visibility: Option<String>,
        #[serde(default, rename = "override")]
        is_override: bool,
    },
}

impl RawRequirement {
    fn into_requirement(self) -> Result<Requirement> {
        let (raw_ref, visibility, is_override) = match self {
            RawRequirement::Plain(raw_ref) => (raw_ref, None, false),
            RawRequirement::Detailed {
                reference,
                visibility,
                is_override,
            } => (reference, visibility, is_override),
        };
        let reference: crucible_reference::Reference =
            raw_ref.parse().map_err(|source| Error::Reference {
                reference: raw_ref.clone(),
                source,
            })?;
        let mut requirement = Requirement::new(reference);
        if visibility.as_deref() == Some("private") {
            requirement = requirement.private();
        }
        if is_override {
            requirement = requirement.overriding();
        }
        Ok(requirement)
    }
}

/// A [`Loader`] that parses a `recipes:` YAML document, one entry per
/// recipe class the source text would have defined.
pub struct TextLoader {
    hooks: HookRegistry,
}

impl TextLoader {
    pub fn new(hooks: HookRegistry) -> Self {
        Self { hooks }
    }
}

impl Loader for TextLoader {
    fn load(&self, text: &str, consumer: bool) -> Result<RecipeTemplate> {
        let scope = if consumer { "root".to_string() } else { String::new() };
        let doc: RawDocument =
            serde_yaml::from_str(text).map_err(|err| Error::MalformedSource(err.to_string()))?;
        let mut recipes = doc.recipes;
        match recipes.len() {
            0 => Err(Error::NoSubclass { scope }),
            1 => {
                let raw = recipes.remove(0);
                let scope = if scope.is_empty() { raw.name.clone() } else { scope };
                self.build_template(raw).map_err(|err| match err {
                    Error::UnknownHook(name) => Error::UnknownHook(format!("{scope}: {name}")),
                    other => other,
                })
            }
            _ => Err(Error::MultipleSubclasses { scope }),
        }
    }
}

impl TextLoader {
    fn build_template(&self, raw: RawRecipe) -> Result<RecipeTemplate> {
        let mut builder = RecipeBuilder::new().settings(raw.settings);
        for (name, allowed) in raw.options {
            builder = builder.option(name, allowed);
        }
        for (name, value) in raw.default_options {
            builder = builder.default_option(name, value);
        }
        for requirement in raw.requires {
            builder = builder.requires(requirement.into_requirement()?);
        }
        match raw.hooks {
            None => {}
            Some(name) => {
                let factory = self.hooks.factory(&name)?;
                builder = builder.hooks(move || factory());
            }
        }
        Ok(builder.build())
    }
}
