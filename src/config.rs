// src/config.rs

//! Manages dispatcher configuration: loading from TOML and validation.

use crate::core::SerferError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::info;

/// Per-event-kind switches deciding which membership changes are reconciled
/// into the external store.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileConfig {
    #[serde(default = "default_true")]
    pub on_join: bool,
    #[serde(default = "default_true")]
    pub on_leave: bool,
    #[serde(default = "default_true")]
    pub on_fail: bool,
    #[serde(default = "default_true")]
    pub on_update: bool,
    #[serde(default = "default_true")]
    pub on_reap: bool,
}

impl ReconcileConfig {
    /// A configuration with reconciliation disabled for every kind.
    pub fn disabled() -> Self {
        Self {
            on_join: false,
            on_leave: false,
            on_fail: false,
            on_update: false,
            on_reap: false,
        }
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            on_join: true,
            on_leave: true,
            on_fail: true,
            on_update: true,
            on_reap: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// The top-level configuration of the event dispatcher.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// User events named `<service_prefix>:<name>` are routed to the
    /// user-event handler as `<name>`.
    #[serde(default = "default_service_prefix")]
    pub service_prefix: String,
    /// User event names that announce a leader election.
    #[serde(default = "default_leader_events")]
    pub leader_events: Vec<String>,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
}

fn default_service_prefix() -> String {
    "serf".to_string()
}

fn default_leader_events() -> Vec<String> {
    vec!["leader".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_prefix: default_service_prefix(),
            leader_events: default_leader_events(),
            reconcile: ReconcileConfig::default(),
        }
    }
}

impl Config {
    /// Loads and validates the configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        let config = Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to load configuration from '{path}'"))?;
        info!(
            "Loaded dispatcher configuration from '{}' (service prefix '{}').",
            path, config.service_prefix
        );
        Ok(config)
    }

    /// Parses and validates the configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration to ensure logical consistency.
    pub fn validate(&self) -> Result<(), SerferError> {
        if self.service_prefix.is_empty() {
            return Err(SerferError::InvalidConfig(
                "service_prefix cannot be empty".to_string(),
            ));
        }
        if self.service_prefix.trim() != self.service_prefix {
            return Err(SerferError::InvalidConfig(format!(
                "service_prefix '{}' cannot start or end with whitespace",
                self.service_prefix
            )));
        }
        if self.service_prefix.contains(':') {
            return Err(SerferError::InvalidConfig(format!(
                "service_prefix '{}' cannot contain ':'",
                self.service_prefix
            )));
        }
        if self.leader_events.iter().any(|name| name.is_empty()) {
            return Err(SerferError::InvalidConfig(
                "leader_events cannot contain an empty name".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the full `<service_prefix>:` marker recognized on user event names.
    pub fn service_marker(&self) -> String {
        format!("{}:", self.service_prefix)
    }
}
