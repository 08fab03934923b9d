// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

//! Ordered, deduplicated-by-name collection of declared dependencies.

mod requirement;

pub use requirement::{MergeOutcome, Requirement, RequirementsList, Visibility};
