// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

mod config;
mod error;

pub use error::{Error, Result};

pub use self::config::*;
