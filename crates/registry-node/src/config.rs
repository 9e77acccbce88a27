//! # Node Configuration
//!
//! Unified configuration for the registry host and its deployment outputs.
//!
//! Defaults are overridden by `PV_*` environment variables, which are in turn
//! overridden by command-line flags.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `PV_OWNER` | `registry.owner` | dev account 0 |
//! | `PV_NETWORK` | `network.name` | `localhost` |
//! | `PV_CHAIN_ID` | `network.chain_id` | `31337` |
//! | `PV_RPC_URL` | `network.rpc_url` | `http://127.0.0.1:8545` |
//! | `PV_DEPLOYMENTS_DIR` | `deployment.deployments_dir` | `./deployments` |
//! | `PV_ENV_FILE` | `deployment.env_file` | `./.env` |
//! | `PV_EVENT_CAPACITY` | `registry.event_capacity` | `1000` |

use crate::accounts::dev_account;
use shared_types::Identity;
use std::path::PathBuf;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Registry configuration.
    pub registry: RegistryConfig,
    /// Network identity written to the deployment outputs.
    pub network: NetworkConfig,
    /// Where deployment outputs go.
    pub deployment: DeploymentConfig,
}

impl NodeConfig {
    /// Build a configuration from defaults and the given variable lookup.
    ///
    /// Unset variables keep their defaults; set but unparsable ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(owner) = lookup("PV_OWNER") {
            config.registry.owner = parse_var("PV_OWNER", &owner)?;
        }
        if let Some(capacity) = lookup("PV_EVENT_CAPACITY") {
            config.registry.event_capacity = parse_var("PV_EVENT_CAPACITY", &capacity)?;
        }
        if let Some(name) = lookup("PV_NETWORK") {
            config.network.name = name;
        }
        if let Some(chain_id) = lookup("PV_CHAIN_ID") {
            config.network.chain_id = parse_var("PV_CHAIN_ID", &chain_id)?;
        }
        if let Some(url) = lookup("PV_RPC_URL") {
            config.network.rpc_url = url;
        }
        if let Some(dir) = lookup("PV_DEPLOYMENTS_DIR") {
            config.deployment.deployments_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup("PV_ENV_FILE") {
            config.deployment.env_file = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Reject configurations the node cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.registry.owner.is_zero() {
            return Err(ConfigError::ZeroOwner);
        }
        if self.registry.event_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.network.name.trim().is_empty() {
            return Err(ConfigError::EmptyNetworkName);
        }
        Ok(())
    }
}

/// Load configuration from the process environment.
pub fn load_config() -> Result<NodeConfig, ConfigError> {
    NodeConfig::from_lookup(|key| std::env::var(key).ok())
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable was set to something unparsable.
    #[error("{var}={value:?} is invalid: {reason}")]
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
        /// Parser message.
        reason: String,
    },

    /// The owner is the zero identity.
    #[error("owner must not be the zero identity; set PV_OWNER or --owner")]
    ZeroOwner,

    /// The event bus would have no room.
    #[error("event capacity must be at least 1")]
    ZeroCapacity,

    /// Deployment records are named after the network.
    #[error("network name must not be empty")]
    EmptyNetworkName,
}

/// Registry configuration.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Fixed administrative identity.
    pub owner: Identity,
    /// Bus channel capacity.
    pub event_capacity: usize,
    /// Run the invariant checks after every commit.
    pub check_invariants: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            owner: dev_account(0),
            event_capacity: shared_bus::DEFAULT_CHANNEL_CAPACITY,
            check_invariants: true,
        }
    }
}

/// Network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name; the deployment record is `<name>.json`.
    pub name: String,
    /// Chain id.
    pub chain_id: u64,
    /// JSON-RPC URL written to the env file.
    pub rpc_url: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "localhost".to_string(),
            chain_id: 31337,
            rpc_url: "http://127.0.0.1:8545".to_string(),
        }
    }
}

/// Deployment output configuration.
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    /// Directory for `<network>.json` records.
    pub deployments_dir: PathBuf,
    /// Env file upserted after deploy.
    pub env_file: PathBuf,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        Self {
            deployments_dir: PathBuf::from("./deployments"),
            env_file: PathBuf::from("./.env"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.network.chain_id, 31337);
        assert_eq!(config.network.name, "localhost");
        assert_eq!(config.registry.event_capacity, 1000);
        assert_eq!(config.registry.owner, dev_account(0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = NodeConfig::from_lookup(lookup(&[
            ("PV_OWNER", "0x00000000000000000000000000000000000000aa"),
            ("PV_NETWORK", "sepolia"),
            ("PV_CHAIN_ID", "11155111"),
            ("PV_EVENT_CAPACITY", "16"),
            ("PV_ENV_FILE", "/tmp/x.env"),
        ]))
        .unwrap();

        let mut expected_owner = [0u8; 20];
        expected_owner[19] = 0xaa;
        assert_eq!(config.registry.owner, Identity::new(expected_owner));
        assert_eq!(config.network.name, "sepolia");
        assert_eq!(config.network.chain_id, 11_155_111);
        assert_eq!(config.registry.event_capacity, 16);
        assert_eq!(config.deployment.env_file, PathBuf::from("/tmp/x.env"));
        assert_eq!(config.deployment.deployments_dir, PathBuf::from("./deployments"));
    }

    #[test]
    fn test_invalid_value_reported() {
        let err = NodeConfig::from_lookup(lookup(&[("PV_CHAIN_ID", "abc")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "PV_CHAIN_ID", .. }));
    }

    #[test]
    fn test_validate_rejects_zero_owner_and_capacity() {
        let mut config = NodeConfig::default();
        config.registry.owner = Identity::ZERO;
        assert_eq!(config.validate(), Err(ConfigError::ZeroOwner));

        let mut config = NodeConfig::default();
        config.registry.event_capacity = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
    }
}
