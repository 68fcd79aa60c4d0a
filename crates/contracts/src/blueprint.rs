//! AdapterBlueprint - Config Loader output
//!
//! Describes one adapter deployment: identity, verification rules, health
//! probing and response outputs.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::TilgangerAction;

/// Config version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete adapter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterBlueprint {
    /// Config version
    #[serde(default)]
    pub version: ConfigVersion,

    /// Adapter identity and dispatch behavior
    pub adapter: AdapterSettings,

    /// Acceptance rules
    #[serde(default)]
    pub verification: VerificationConfig,

    /// Health probing
    #[serde(default)]
    pub health: HealthConfig,

    /// Response outputs
    #[serde(default)]
    pub outputs: Vec<OutputConfig>,
}

/// Adapter identity and dispatch behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterSettings {
    /// Adapter name (logs, metrics)
    pub name: String,

    /// Component name reported in health records
    #[serde(default = "default_health_component")]
    pub health_component: String,

    /// What to do with action strings outside the known set
    #[serde(default)]
    pub unknown_action_policy: UnknownActionPolicy,
}

fn default_health_component() -> String {
    "adapter".to_string()
}

/// Handling of action strings that do not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownActionPolicy {
    /// Post an ADAPTER_REJECTED response naming the action
    #[default]
    Reject,
    /// Fail the dispatch call, post nothing
    Fail,
}

/// Acceptance rules for the local verifier
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationConfig {
    /// Accepted actions (empty = every action with a registered handler)
    #[serde(default)]
    pub supported_actions: Vec<TilgangerAction>,

    /// Accepted organisations (empty = any)
    #[serde(default)]
    pub org_ids: Vec<String>,
}

/// Health probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Probe kind
    #[serde(default)]
    pub probe: ProbeType,

    /// Downstream application address (`host:port`), required for `tcp`
    #[serde(default)]
    pub addr: Option<String>,

    /// Probe timeout in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            probe: ProbeType::default(),
            addr: None,
            timeout_ms: default_probe_timeout_ms(),
        }
    }
}

fn default_probe_timeout_ms() -> u64 {
    2000
}

/// Health probe kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeType {
    /// Always report healthy
    #[default]
    Always,
    /// TCP connect to `health.addr`
    Tcp,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output name
    pub name: String,

    /// Output type
    pub output_type: OutputType,

    /// Queue capacity
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Type specific parameters
    #[serde(default)]
    pub params: HashMap<String, String>,
}

fn default_queue_capacity() -> usize {
    100
}

/// Output type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    /// Log summary
    Log,
    /// JSON lines on disk
    File,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_config_defaults() {
        let config = HealthConfig::default();
        assert_eq!(config.probe, ProbeType::Always);
        assert_eq!(config.timeout_ms, 2000);
        assert!(config.addr.is_none());
    }

    #[test]
    fn adapter_settings_defaults() {
        let settings: AdapterSettings =
            serde_json::from_str(r#"{ "name": "tilganger" }"#).unwrap();
        assert_eq!(settings.health_component, "adapter");
        assert_eq!(settings.unknown_action_policy, UnknownActionPolicy::Reject);
    }

    #[test]
    fn supported_actions_use_wire_names() {
        let config: VerificationConfig =
            serde_json::from_str(r#"{ "supported_actions": ["GET_ALL_IDENTITET"] }"#).unwrap();
        assert_eq!(config.supported_actions, vec![TilgangerAction::GetAllIdentitet]);
        assert!(config.org_ids.is_empty());
    }
}
