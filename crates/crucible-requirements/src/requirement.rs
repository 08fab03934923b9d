// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use indexmap::IndexMap;

use crucible_reference::Reference;

#[cfg(test)]
#[path = "./requirement_test.rs"]
mod requirement_test;

/// Whether a requirement participates in the graph's global by-name
/// deduplication index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// A single declared dependency: a reference annotated with its visibility
/// and whether it is an override pin rather than an edge-creating entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requirement {
    pub reference: Reference,
    pub visibility: Visibility,
    pub is_override: bool,
}

impl Requirement {
    pub fn new(reference: Reference) -> Self {
        Self {
            reference,
            visibility: Visibility::Public,
            is_override: false,
        }
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn overriding(mut self) -> Self {
        self.is_override = true;
        self
    }
}

/// The outcome of merging one requirement entry into a list that may
/// already hold an entry for the same package name.
#[derive(Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No prior entry for this package name existed.
    Inserted,
    /// A prior entry existed with the same reference; nothing changed.
    NoOp,
    /// A prior entry existed with a different reference and this update
    /// carried `override = true`; the entry was replaced.
    Replaced { previous: Requirement },
    /// A prior entry existed with a different reference and this update
    /// did not carry an override; the prior entry is kept.
    Conflict { existing: Requirement },
}

/// An ordered, by-name-deduplicated collection of [`Requirement`]s.
#[derive(Clone, Debug, Default)]
pub struct RequirementsList {
    entries: IndexMap<String, Requirement>,
}

impl RequirementsList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update an entry for `requirement.reference.name()`,
    /// following the update rules from the data model: same reference is a
    /// no-op, different reference with `override = true` replaces, and
    /// different reference without an override is a conflict that keeps
    /// the existing entry.
    pub fn update(&mut self, requirement: Requirement) -> MergeOutcome {
        let name = requirement.reference.name().to_owned();
        match self.entries.get(&name) {
            None => {
                self.entries.insert(name, requirement);
                MergeOutcome::Inserted
            }
            Some(existing) if existing.reference == requirement.reference => MergeOutcome::NoOp,
            Some(existing) if requirement.is_override => {
                let previous = existing.clone();
                self.entries.insert(name, requirement);
                MergeOutcome::Replaced { previous }
            }
            Some(existing) => MergeOutcome::Conflict {
                existing: existing.clone(),
            },
        }
    }

    /// Merge another list's entries into this one as transitive
    /// requirements, preserving each entry's visibility. Used when folding
    /// a child's requirements into its parent's view.
    pub fn merge_transitive(&mut self, other: &RequirementsList) {
        for requirement in other.iter() {
            self.update(requirement.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&Requirement> {
        self.entries.get(name)
    }

    /// Force-overwrite the entry for `requirement.reference.name()`,
    /// bypassing the conflict/override update rules. Used by the graph
    /// builder to correct a declared requirement's reference to the
    /// effective, override-resolved one before pass 2 derives this node's
    /// reduced `requires` view from it.
    pub fn replace(&mut self, requirement: Requirement) {
        let name = requirement.reference.name().to_owned();
        self.entries.insert(name, requirement);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Requirement> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for RequirementsList {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(name, req)| other.entries.get(name) == Some(req))
    }
}

impl Eq for RequirementsList {}

impl FromIterator<Requirement> for RequirementsList {
    fn from_iter<I: IntoIterator<Item = Requirement>>(iter: I) -> Self {
        let mut list = Self::new();
        for requirement in iter {
            list.update(requirement);
        }
        list
    }
}
