// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{Error, Result};

/// A single node of a settings schema.
///
/// A node is either a *leaf*, with an enumeration of the values it may be
/// assigned, or a *branch*, a pure namespace with no value of its own that
/// groups further sub-settings (e.g. `compiler.version`, `compiler.libcxx`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaField {
    pub(crate) allowed: Option<Vec<String>>,
    pub(crate) children: IndexMap<String, SchemaField>,
}

impl SchemaField {
    fn leaf(allowed: Vec<String>) -> Self {
        Self {
            allowed: Some(allowed),
            children: IndexMap::new(),
        }
    }

    fn branch(children: IndexMap<String, SchemaField>) -> Self {
        Self {
            allowed: None,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.allowed.is_some()
    }
}

/// A parsed settings schema: the nested mapping of enumerated fields loaded
/// once per build from a YAML-like document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    pub(crate) fields: IndexMap<String, SchemaField>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Leaf(Vec<RawScalar>),
    Branch(IndexMap<String, RawNode>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    String(String),
    Int(i64),
    Bool(bool),
}

impl std::fmt::Display for RawScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawScalar::String(s) => f.write_str(s),
            RawScalar::Int(i) => write!(f, "{i}"),
            RawScalar::Bool(b) => write!(f, "{b}"),
        }
    }
}

fn build_field(node: RawNode) -> SchemaField {
    match node {
        RawNode::Leaf(values) => {
            SchemaField::leaf(values.into_iter().map(|v| v.to_string()).collect())
        }
        RawNode::Branch(map) => {
            let children = map
                .into_iter()
                .map(|(name, node)| (name, build_field(node)))
                .collect();
            SchemaField::branch(children)
        }
    }
}

impl Schema {
    /// Parse a settings schema from its YAML-like textual form.
    ///
    /// ```yaml
    /// os: [Windows, Linux, Macos, Android]
    /// arch: [x86, x86_64]
    /// compiler:
    ///   version: ["11", "12", "13"]
    ///   libcxx: [libstdc++, libstdc++11]
    /// build_type: [Debug, Release]
    /// ```
    pub fn load(text: &str) -> Result<Self> {
        let raw: IndexMap<String, RawNode> = serde_yaml::from_str(text)
            .map_err(|err| Error::InvalidSchema(err.to_string()))?;
        let fields = raw
            .into_iter()
            .map(|(name, node)| (name, build_field(node)))
            .collect();
        Ok(Self { fields })
    }

    /// The default schema shipped alongside this crate: `os`, `arch`,
    /// `compiler` and `build_type`, matching the minimum set named in the
    /// external interfaces contract.
    pub fn default_schema() -> Self {
        Self::load(DEFAULT_SCHEMA_YAML).expect("built-in default schema is valid")
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

pub const DEFAULT_SCHEMA_YAML: &str = r#"
os: [Windows, Linux, Macos, Android]
arch: [x86, x86_64, armv7, armv8]
compiler:
  version: ["9", "10", "11", "12", "13"]
  libcxx: [libstdc++, libstdc++11, libc++]
build_type: [Debug, Release, RelWithDebInfo, MinSizeRel]
"#;
