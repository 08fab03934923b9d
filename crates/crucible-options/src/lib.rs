// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

//! Per-package enumerated options with scoped (`pkg:opt=val`) addressing.

mod error;
mod options;
mod scoped;

pub use error::{Error, Result};
pub use options::{ApplyOutcome, OptionsSet};
pub use scoped::ScopedName;
