// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Diagnostic, Debug, Error)]
pub enum Error {
    /// Zero recipe classes were found in a loaded source file.
    #[error("{scope}: No subclass of ConanFile")]
    NoSubclass { scope: String },
    /// More than one recipe class was found in a loaded source file.
    #[error("{scope}: More than 1 conanfile in the file")]
    MultipleSubclasses { scope: String },
    #[error("malformed recipe source: {0}")]
    MalformedSource(String),
    #[error("unknown hook '{0}' referenced by recipe source")]
    UnknownHook(String),
    #[error("reference '{reference}': {source}")]
    Reference {
        reference: String,
        #[source]
        #[diagnostic_source]
        source: crucible_reference::Error,
    },
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
    #[error("no recipe registered for reference '{0}'")]
    MissingRequirement(String),
}
