// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Diagnostic, Debug, Error)]
pub enum Error {
    #[error("Invalid reference '{source}': {reason}")]
    InvalidReference { source: String, reason: String },
    #[error("Invalid version '{0}'")]
    InvalidVersion(String),
}
