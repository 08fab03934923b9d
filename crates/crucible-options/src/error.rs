// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Diagnostic, Debug, Error)]
pub enum Error {
    #[error("undefined field {scope} {field} sibling {siblings:?}")]
    UndefinedField {
        scope: &'static str,
        field: String,
        siblings: Vec<String>,
    },
    #[error("bad value {field} {value} allowed {allowed:?}")]
    BadValue {
        field: String,
        value: String,
        allowed: Vec<String>,
    },
}
