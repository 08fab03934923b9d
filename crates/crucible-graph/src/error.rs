// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal expansion errors. Any of these aborts construction; the
/// in-progress graph is discarded, matching §4.7's "the graph is
/// discarded" rule.
#[derive(miette::Diagnostic, Debug, Error)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(forward(0))]
    Recipe(#[from] crucible_recipe::Error),
    #[error("{reference}: {source}")]
    Settings {
        reference: String,
        #[source]
        #[diagnostic_source]
        source: crucible_settings::Error,
    },
    #[error("{reference}: {source}")]
    Options {
        reference: String,
        #[source]
        #[diagnostic_source]
        source: crucible_options::Error,
    },
    #[error("dependency cycle detected while resolving '{0}'")]
    Cycle(String),
}

/// A non-fatal condition resolved by policy rather than raised as an
/// [`Error`]: the builder writes its rendered [`Diagnostic::message`]
/// through the injected `OutputSink` and continues, while also collecting
/// the structured value on [`crate::Graph`] so tests can assert on it
/// without substring matching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// Two incompatible references were requested for the same package and
    /// no override resolved the clash; the first binding wins.
    VersionConflict {
        consumer: String,
        requirement: String,
        existing: String,
    },
    /// An override actually replaced a transitive binding.
    OverrideNotice {
        consumer: String,
        old: String,
        new: String,
    },
    /// Two different downstream writers assigned different values to the
    /// same foreign-scoped option; the first writer's value is preserved.
    OptionConflict {
        consumer: String,
        target: String,
        name: String,
        new_value: String,
        current_value: String,
        first_writer: String,
    },
}

impl Diagnostic {
    /// Render the fixed-substring text the builder pushes to the
    /// `OutputSink` and that tests match against.
    pub fn message(&self) -> String {
        match self {
            Diagnostic::VersionConflict {
                consumer,
                requirement,
                existing,
            } => format!(
                "Conflict in {consumer}\n    Requirement {requirement} conflicts with already defined {existing}\n    Keeping {existing}\n    To change it, override it in your base requirements"
            ),
            Diagnostic::OverrideNotice { consumer, old, new } => {
                format!("{consumer} requirement {old} overriden by your conanfile to {new}")
            }
            Diagnostic::OptionConflict {
                consumer,
                target,
                name,
                new_value,
                current_value,
                first_writer,
            } => format!(
                "{consumer} tried to change {target} option {name} to {new_value} but it was already assigned to {current_value} by {first_writer}"
            ),
        }
    }
}
