// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

//! Package coordinate parsing: `name/version@user/channel`.

mod error;
pub mod parsing;
mod reference;

pub use error::{Error, Result};
pub use reference::{Reference, Version};
