// Copyright (c) The Crucible Authors.
// SPDX-License-Identifier: Apache-2.0
// https://github.com/crucible-pm/crucible

use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::Result;

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

static CONFIG: OnceCell<RwLock<Arc<Config>>> = OnceCell::new();

/// Knobs controlling the builder's non-fatal diagnostic behaviour.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Diagnostics {
    /// Emit an `OverrideNotice` to the output sink when an override pin
    /// actually replaces a transitive binding. Tests and scripted callers
    /// that only care about the resulting graph may want this off.
    pub emit_override_notices: bool,

    /// Emit a `VersionConflict`/`OptionConflict` diagnostic's message
    /// through `tracing::warn!` in addition to the injected `OutputSink`.
    pub log_conflicts: bool,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            emit_override_notices: true,
            log_conflicts: true,
        }
    }
}

/// Knobs that bias resolution order without changing its semantics:
/// comma-separated option names promoted to the front of a node's option
/// dump for more readable diagnostics, mirroring the teacher's
/// `request_priority_order` knob.
#[derive(Clone, Default, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Priority {
    /// Comma-separated list of option names to promote to the front when
    /// rendering a conflict diagnostic's option list.
    pub option_name_order: String,
}

/// Ambient configuration for the resolver: verbosity defaults and the
/// non-fatal diagnostic/priority knobs above. Never affects package id
/// derivation, only what gets surfaced and how.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub diagnostics: Diagnostics,
    pub priority: Priority,

    /// Default `tracing` verbosity level for `RUST_LOG=crucible=<level>`
    /// when no explicit filter is set by the caller.
    pub default_log_level: String,
}

impl Config {
    /// Get the current loaded config, loading it if needed.
    pub fn current() -> Result<Arc<Self>> {
        get_config()
    }

    /// Load the config from disk, even if it's already been loaded before.
    pub fn load() -> Result<Self> {
        load_config()
    }

    /// Make this config the current global one.
    pub fn make_current(self) -> Result<Arc<Self>> {
        let config = CONFIG.get_or_try_init(|| -> Result<RwLock<Arc<Config>>> {
            Ok(RwLock::new(Arc::new(self.clone())))
        })?;

        let mut lock = config
            .write()
            .map_err(|err| crate::Error::LockPoisonedWrite(err.to_string()))?;
        *Arc::make_mut(&mut lock) = self;
        Ok(Arc::clone(&lock))
    }
}

/// Get the current crucible config, fetching it from disk if needed.
pub fn get_config() -> Result<Arc<Config>> {
    let config = CONFIG.get_or_try_init(|| -> Result<RwLock<Arc<Config>>> {
        Ok(RwLock::new(Arc::new(load_config()?)))
    })?;
    let lock = config
        .read()
        .map_err(|err| crate::Error::LockPoisonedRead(err.to_string()))?;
    Ok(Arc::clone(&*lock))
}

/// Load the crucible configuration from disk, even if it has already been
/// loaded. This includes the default, user, and system configurations (if
/// they exist), then any `CRUCIBLE_<SECTION>_<NAME>` environment overrides.
pub fn load_config() -> Result<Config> {
    use config::{Config as RawConfig, File};

    const USER_CONFIG_BASE: &str = "crucible/crucible";
    let user_config = dirs::config_local_dir()
        .map(|config| config.join(USER_CONFIG_BASE))
        .ok_or(crate::Error::NoConfigDir)?;

    let mut config_builder = RawConfig::builder()
        .add_source(File::with_name("/etc/crucible").required(false))
        .add_source(File::with_name(&format!("{}", user_config.display())).required(false));

    for (var, value) in std::env::vars() {
        let Some(tail) = var.strip_prefix("CRUCIBLE_") else {
            continue;
        };
        let Some((section, name)) = tail.split_once('_') else {
            continue;
        };

        let key = format!("{}.{}", section.to_lowercase(), name.to_lowercase());
        config_builder = config_builder.set_override(key, value)?;
    }

    let config = config_builder.build()?;
    Ok(Config::deserialize(config)?)
}
