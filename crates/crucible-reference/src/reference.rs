// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use std::fmt::Write;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{parsing, Result};

#[cfg(test)]
#[path = "./reference_test.rs"]
mod reference_test;

/// A dotted, numeric version string (`1.2.3`).
///
/// Versions are opaque, exact identifiers in this resolver: there is no
/// range matching or SAT-style solving over them, only equality and the
/// derived compatibility-scoped forms used for identity shaping.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    raw: String,
    parts: Vec<String>,
}

impl Version {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parts = raw.split('.').map(ToOwned::to_owned).collect();
        Self { raw, parts }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The `N.Y.Z` form: keep the first component, replace the rest. A
    /// leading `0` component is pre-1.0 and has no stable major version to
    /// truncate to, so it is reported at full precision instead.
    pub fn major(&self) -> String {
        let first = self.parts.first().map(String::as_str).unwrap_or("0");
        if first == "0" {
            return self.raw.clone();
        }
        format!("{first}.Y.Z")
    }

    /// The `N.M.Z` form: keep the first two components, replace the rest.
    pub fn minor(&self) -> String {
        let first = self.parts.first().map(String::as_str).unwrap_or("0");
        let second = self.parts.get(1).map(String::as_str).unwrap_or("0");
        format!("{first}.{second}.Z")
    }

    /// The full, unmodified version string.
    pub fn patch(&self) -> String {
        self.raw.clone()
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Version {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Version {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A fully qualified package coordinate: `name/version@user/channel`.
///
/// Equality and ordering are over the full tuple, which keeps graph
/// serialisation deterministic regardless of insertion order.
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reference {
    pub(crate) name: String,
    pub(crate) version: Version,
    pub(crate) user: String,
    pub(crate) channel: String,
}

impl Reference {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<Version>,
        user: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            user: user.into(),
            channel: channel.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Return a copy of this reference with the version replaced.
    pub fn with_version(&self, version: impl Into<Version>) -> Self {
        Self {
            name: self.name.clone(),
            version: version.into(),
            user: self.user.clone(),
            channel: self.channel.clone(),
        }
    }

    /// Return a copy of this reference with the name replaced.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: self.version.clone(),
            user: self.user.clone(),
            channel: self.channel.clone(),
        }
    }

    /// `Name/Major.Y.Z`, the form used in a recipe's reduced `requires` view
    /// for a public, non-pinned dependency.
    pub fn major_form(&self) -> String {
        format!("{}/{}", self.name, self.version.major())
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        f.write_char('/')?;
        f.write_str(self.version.as_str())?;
        f.write_char('@')?;
        f.write_str(&self.user)?;
        f.write_char('/')?;
        f.write_str(&self.channel)?;
        Ok(())
    }
}

impl FromStr for Reference {
    type Err = crate::Error;

    fn from_str(source: &str) -> Result<Self> {
        parsing::reference::<nom_supreme::error::ErrorTree<_>>(source)
            .map(|(_, reference)| reference)
            .map_err(|err| crate::Error::InvalidReference {
                source: source.to_owned(),
                reason: err.to_string(),
            })
    }
}

/// Parse a reference string, panicking on failure. For use in tests only.
#[macro_export]
macro_rules! reference {
    ($source:literal) => {
        $source.parse::<$crate::Reference>().unwrap()
    };
}

impl Serialize for Reference {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(de::Error::custom)
    }
}
