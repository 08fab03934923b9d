// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::schema::{Schema, SchemaField};
use crate::{Error, Result};

#[cfg(test)]
#[path = "./settings_test.rs"]
mod settings_test;

/// A recipe's effective settings: a declared subset of a [`Schema`], with
/// assigned values and any narrowing (`remove`) applied during loading or a
/// recipe's `config()` hook.
///
/// Values are addressed by dotted path (`"compiler.version"`); only the
/// first path segment is checked against the declared top-level field list,
/// matching the "subset of the schema" wording of the data model.
#[derive(Clone, Debug, Default)]
pub struct Settings {
    declared: IndexMap<String, SchemaField>,
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Build the effective settings for a recipe that declared the given
    /// top-level field names out of the full schema.
    ///
    /// Declared names that are not present in the schema are silently
    /// dropped, mirroring the "extra fields are silently dropped" rule used
    /// elsewhere when propagating settings down the graph.
    pub fn new<I, S>(schema: &Schema, declared: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = IndexMap::new();
        for name in declared {
            let name = name.as_ref();
            if let Some(field) = schema.fields.get(name) {
                out.insert(name.to_owned(), field.clone());
            }
        }
        Self {
            declared: out,
            values: BTreeMap::new(),
        }
    }

    /// The ordered list of declared top-level keys, in schema order.
    pub fn fields(&self) -> Vec<String> {
        self.declared.keys().cloned().collect()
    }

    fn field(&self, path: &str) -> Option<&SchemaField> {
        let mut segments = path.split('.');
        let top = segments.next()?;
        let mut field = self.declared.get(top)?;
        for segment in segments {
            field = field.children.get(segment)?;
        }
        Some(field)
    }

    fn field_mut(&mut self, path: &str) -> Option<&mut SchemaField> {
        let mut segments = path.split('.');
        let top = segments.next()?;
        let mut field = self.declared.get_mut(top)?;
        for segment in segments {
            field = field.children.get_mut(segment)?;
        }
        Some(field)
    }

    fn siblings_of(&self, path: &str) -> Vec<String> {
        match path.rsplit_once('.') {
            None => self.declared.keys().cloned().collect(),
            Some((parent, _)) => self
                .field(parent)
                .map(|f| f.children.keys().cloned().collect())
                .unwrap_or_default(),
        }
    }

    /// Assign a value to a leaf field, validating it exists and that the
    /// value is one of its declared enumeration.
    pub fn set(&mut self, path: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        let siblings = self.siblings_of(path);
        let field = self.field(path).ok_or_else(|| Error::UndefinedField {
            scope: "settings",
            field: path.to_owned(),
            siblings,
        })?;
        let Some(allowed) = &field.allowed else {
            return Err(Error::UndefinedField {
                scope: "settings",
                field: path.to_owned(),
                siblings: self.siblings_of(path),
            });
        };
        if !allowed.iter().any(|v| v == &value) {
            return Err(Error::BadValue {
                field: format!("settings.{path}"),
                value,
                allowed: allowed.clone(),
            });
        }
        self.values.insert(path.to_owned(), value);
        Ok(())
    }

    /// Get the currently assigned value for a field, if any.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.values.get(path).map(String::as_str)
    }

    /// Remove a field (leaf or branch) entirely, at any depth. A later
    /// `set` against it fails with `undefined field`.
    pub fn remove(&mut self, path: &str) -> Result<()> {
        self.values.retain(|k, _| k != path && !k.starts_with(&format!("{path}.")));
        match path.rsplit_once('.') {
            None => {
                self.declared.shift_remove(path);
            }
            Some((parent, leaf)) => {
                let field = self.field_mut(parent).ok_or_else(|| Error::UndefinedField {
                    scope: "settings",
                    field: parent.to_owned(),
                    siblings: self.siblings_of(parent),
                })?;
                field.children.shift_remove(leaf);
            }
        }
        Ok(())
    }

    /// Narrow a leaf's allowed values by removing one element from its
    /// enumeration (`settings.os.remove("Linux")`).
    pub fn remove_value(&mut self, path: &str, value: &str) -> Result<()> {
        let field = self.field_mut(path).ok_or_else(|| Error::UndefinedField {
            scope: "settings",
            field: path.to_owned(),
            siblings: Vec::new(),
        })?;
        let Some(allowed) = field.allowed.as_mut() else {
            return Err(Error::UndefinedField {
                scope: "settings",
                field: path.to_owned(),
                siblings: Vec::new(),
            });
        };
        allowed.retain(|v| v != value);
        Ok(())
    }

    fn pairs_into(field: &IndexMap<String, SchemaField>, values: &BTreeMap<String, String>, prefix: &str, out: &mut Vec<(String, String)>) {
        for (name, schema) in field {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            if let Some(value) = values.get(&path) {
                out.push((path.clone(), value.clone()));
            }
            Self::pairs_into(&schema.children, values, &path, out);
        }
    }

    /// The assigned fields, in schema order, as `(path, value)` pairs. The
    /// companion to [`Settings::dump`]'s flattened text form.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        Self::pairs_into(&self.declared, &self.values, "", &mut pairs);
        pairs
    }

    /// Serialise only the assigned fields, in schema order, as `key=value`
    /// lines joined by `\n`.
    pub fn dump(&self) -> String {
        self.pairs()
            .into_iter()
            .map(|(path, value)| format!("{path}={value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
