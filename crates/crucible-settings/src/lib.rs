// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

//! Typed, hierarchical, schema-constrained configuration tree.

mod error;
pub mod schema;
mod settings;

pub use error::{Error, Result};
pub use schema::Schema;
pub use settings::Settings;
