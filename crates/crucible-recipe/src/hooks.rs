// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use crucible_options::OptionsSet;
use crucible_reference::Reference;
use crucible_requirements::Requirement;
use crucible_settings::Settings;

use crate::Result;

/// An edit a recipe's identity-shaping hook may apply to its node's
/// derived `Info` record. The set is closed over the five mutation kinds
/// the upstream tool demonstrates by example, rather than free mutation of
/// the record, to keep package-id derivation predictable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InfoEdit {
    /// Replace a direct requirement's displayed version with a derived
    /// form of this node's own version (e.g. `full_version.minor()`).
    ReplaceRequirementVersion { name: String, version: String },
    /// Rename a direct requirement entry, typically to this node's own
    /// `full_name`.
    RenameRequirement { name: String, new_name: String },
    /// Add a synthetic `requires` entry not present in the recipe's
    /// declared dependencies (e.g. `Say/1.Y.Z` derived from this node's own
    /// version).
    AddSyntheticRequirement { reference: String },
    /// Erase a settings field's contribution to the identity by
    /// overwriting it with a fixed value.
    EraseSetting { path: String, value: String },
    /// Erase an option's contribution to the identity by overwriting it
    /// with a fixed value.
    EraseOption { name: String, value: String },
}

/// The three optional recipe hooks: `config()`, `requirements()` and
/// `conan_info()`. A recipe with no dynamic behaviour uses [`NoHooks`].
pub trait Hooks: std::fmt::Debug {
    /// Mutate this node's own settings/options after inherited values have
    /// been applied, before requirements are collected.
    fn config(&self, _settings: &mut Settings, _options: &mut OptionsSet) -> Result<()> {
        Ok(())
    }

    /// Contribute requirements dynamically, based on this node's current
    /// settings/options (e.g. a conditional dependency behind an option).
    fn requirements(&self, _settings: &Settings, _options: &OptionsSet) -> Result<Vec<Requirement>> {
        Ok(Vec::new())
    }

    /// Contribute identity-shaping edits for this node's `Info` record.
    /// `reference` is this node's own, already-resolved reference.
    fn conan_info(&self, _reference: &Reference) -> Vec<InfoEdit> {
        Vec::new()
    }
}

/// A recipe with no hooks at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl Hooks for NoHooks {}
