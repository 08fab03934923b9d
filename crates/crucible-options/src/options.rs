// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use indexmap::IndexMap;
use itertools::Itertools;

use crate::scoped::ScopedName;
use crate::{Error, Result};

#[cfg(test)]
#[path = "./options_test.rs"]
mod options_test;

/// The result of writing a value onto an already-owned option field,
/// distinguishing the three states a downstream write may land in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// No prior value existed; this write is now the recorded one.
    Applied,
    /// A prior value existed and matched; nothing changed.
    NoOp,
    /// A prior value existed and differed. The original is kept; the
    /// caller is expected to surface a conflict diagnostic naming
    /// `first_writer`.
    Conflict { first_value: String, first_writer: String },
}

/// A single package's option state: its own declared, enumerated options,
/// plus any `pkg:opt=val` entries it wants to push down onto its
/// dependencies (collected from `default_options` and `config()`).
#[derive(Clone, Debug, Default)]
pub struct OptionsSet {
    declared: IndexMap<String, Vec<String>>,
    own: IndexMap<String, String>,
    own_writers: IndexMap<String, String>,
    foreign: IndexMap<String, IndexMap<String, String>>,
}

impl OptionsSet {
    /// Build an options set for a recipe that declared the given option
    /// schema: each name maps to its finite set of allowed values.
    pub fn new(declared: IndexMap<String, Vec<String>>) -> Self {
        Self {
            declared,
            own: IndexMap::new(),
            own_writers: IndexMap::new(),
            foreign: IndexMap::new(),
        }
    }

    fn siblings(&self) -> Vec<String> {
        self.declared.keys().cloned().collect()
    }

    /// Apply a write to one of this package's own declared options, with
    /// first-write-wins tri-state semantics. `writer` is an attribution
    /// string (typically the writer's reference) used to build conflict
    /// diagnostics at the call site.
    pub fn apply_own(
        &mut self,
        name: &str,
        value: impl Into<String>,
        writer: impl Into<String>,
    ) -> Result<ApplyOutcome> {
        let value = value.into();
        let writer = writer.into();
        let allowed = self.declared.get(name).ok_or_else(|| Error::UndefinedField {
            scope: "options",
            field: name.to_owned(),
            siblings: self.siblings(),
        })?;
        if !allowed.iter().any(|v| v == &value) {
            return Err(Error::BadValue {
                field: format!("options.{name}"),
                value,
                allowed: allowed.clone(),
            });
        }
        match self.own.get(name) {
            None => {
                self.own.insert(name.to_owned(), value);
                self.own_writers.insert(name.to_owned(), writer);
                Ok(ApplyOutcome::Applied)
            }
            Some(existing) if existing == &value => Ok(ApplyOutcome::NoOp),
            Some(existing) => Ok(ApplyOutcome::Conflict {
                first_value: existing.clone(),
                first_writer: self
                    .own_writers
                    .get(name)
                    .cloned()
                    .unwrap_or_default(),
            }),
        }
    }

    /// Assign any scoped or unscoped name, as used when loading
    /// `default_options`. Unscoped names apply to this package's own
    /// fields (with `writer` as attribution); scoped names are recorded
    /// as pass-through for a dependency of that name.
    pub fn set(&mut self, raw_name: &str, value: impl Into<String>, writer: impl Into<String>) -> Result<ApplyOutcome> {
        match ScopedName::parse(raw_name) {
            ScopedName::Own(name) => self.apply_own(&name, value, writer),
            ScopedName::Foreign { package, option } => {
                let value = value.into();
                let bucket = self.foreign.entry(package).or_default();
                bucket.insert(option, value);
                Ok(ApplyOutcome::Applied)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.own.get(name).map(String::as_str)
    }

    /// Remove all of this package's own option values, leaving any
    /// foreign-scoped pass-through entries intact.
    pub fn clear(&mut self) {
        self.own.clear();
        self.own_writers.clear();
    }

    /// Iterate the foreign-scoped entries this package wants to push down
    /// onto the named dependency, in declaration order.
    pub fn foreign_for<'a>(&'a self, package: &str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.foreign
            .get(package)
            .into_iter()
            .flat_map(|bucket| bucket.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Iterate every foreign-scoped entry this package wants to push down,
    /// regardless of target, as `(target, name, value)`. The target need
    /// not be one of this package's own direct requirements: a
    /// `default_option` may address an indirect, transitive dependency, so
    /// the graph builder forwards every entry unconditionally as it
    /// descends.
    pub fn all_foreign<'a>(&'a self) -> impl Iterator<Item = (&'a str, &'a str, &'a str)> {
        self.foreign.iter().flat_map(|(package, bucket)| {
            bucket.iter().map(move |(k, v)| (package.as_str(), k.as_str(), v.as_str()))
        })
    }

    /// This package's own assigned options only, in declaration order, as
    /// `(name, value)` pairs. This is the "reduced" view used for identity
    /// shaping; unlike [`OptionsSet::dump`] it excludes foreign-scoped
    /// pass-through entries.
    pub fn own_pairs(&self) -> Vec<(String, String)> {
        self.declared
            .keys()
            .filter_map(|name| self.own.get(name).map(|value| (name.clone(), value.clone())))
            .collect()
    }

    /// Serialise only this package's own options, in declaration order.
    /// The "reduced" counterpart to [`OptionsSet::dump`].
    pub fn dump_own(&self) -> String {
        self.own_pairs()
            .into_iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Serialise owner options first in declaration order, then foreign
    /// options grouped per target package in lexicographic order and by
    /// option name within a package.
    pub fn dump(&self) -> String {
        let mut lines = Vec::new();
        for name in self.declared.keys() {
            if let Some(value) = self.own.get(name) {
                lines.push(format!("{name}={value}"));
            }
        }
        for package in self.foreign.keys().sorted() {
            let bucket = &self.foreign[package];
            for name in bucket.keys().sorted() {
                lines.push(format!("{package}:{name}={}", bucket[name]));
            }
        }
        lines.into_iter().join("\n")
    }
}
