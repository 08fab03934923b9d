// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

//! The injected diagnostics boundary. The builder writes user-facing
//! conflict/override strings through an `&mut dyn OutputSink` rather than
//! printing directly, the way the graph layer renders through a formatting
//! trait instead of calling `println!` itself.

/// Receives the free-form diagnostic strings the graph builder emits for
/// non-fatal conditions (version/option conflicts, override notices).
pub trait OutputSink {
    fn push(&mut self, message: String);
}

/// A push-based, `Vec<String>`-backed sink for tests.
#[derive(Debug, Default, Clone)]
pub struct VecSink {
    messages: Vec<String>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

impl OutputSink for VecSink {
    fn push(&mut self, message: String) {
        self.messages.push(message);
    }
}

/// Forwards every diagnostic through `tracing::warn!`, for production use.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl OutputSink for TracingSink {
    fn push(&mut self, message: String) {
        tracing::warn!("{message}");
    }
}
