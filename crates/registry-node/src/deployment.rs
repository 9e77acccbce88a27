//! # Registry Deployment
//!
//! Instantiates the registry exactly once and persists where it lives.
//!
//! ## Outputs
//!
//! 1. `<deployments_dir>/<network>.json`: pretty-printed `DeploymentRecord`
//! 2. the env file: `PROVENANCE_REGISTRY_ADDRESS`, `RPC_URL` and `CHAIN_ID`
//!    replaced in place or appended; every other line is kept

use crate::config::NodeConfig;
use chrono::{SecondsFormat, Utc};
use provenance_registry::{RegistryService, ServiceConfig, SystemTimeSource};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use shared_bus::InMemoryEventBus;
use shared_types::Identity;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Env key carrying the registry address.
pub const ADDRESS_ENV_KEY: &str = "PROVENANCE_REGISTRY_ADDRESS";
/// Env key carrying the RPC URL.
pub const RPC_URL_ENV_KEY: &str = "RPC_URL";
/// Env key carrying the chain id.
pub const CHAIN_ID_ENV_KEY: &str = "CHAIN_ID";

/// Deployment errors.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Filesystem failure.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Record serialization failure.
    #[error("failed to serialize deployment record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Address of a registry deployed by `owner` at `nonce`.
///
/// `keccak256(owner || nonce_be)[12..]`, the same derivation a contract
/// account gets from its creator.
#[must_use]
pub fn registry_address(owner: &Identity, nonce: u64) -> Identity {
    let mut hasher = Keccak256::new();
    hasher.update(owner.as_bytes());
    hasher.update(nonce.to_be_bytes());
    let hash = hasher.finalize();

    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash[12..]);
    Identity::new(bytes)
}

/// What gets written to `<network>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// Registry address, `0x`-prefixed hex.
    pub address: String,
    /// Owner identity, `0x`-prefixed hex.
    pub owner: String,
    /// Network name.
    pub network: String,
    /// Chain id.
    pub chain_id: u64,
    /// RFC 3339 deployment time.
    pub deployed_at: String,
}

/// A live registry plus the record describing it.
pub struct Deployment {
    /// Registry address.
    pub address: Identity,
    /// Persistable description.
    pub record: DeploymentRecord,
    /// The hosted registry.
    pub service: Arc<RegistryService>,
    /// Bus the service publishes to.
    pub bus: Arc<InMemoryEventBus>,
}

/// Genesis: build the bus and the one registry instance for `config`.
pub fn deploy(config: &NodeConfig) -> Deployment {
    let owner = config.registry.owner;
    let bus = Arc::new(InMemoryEventBus::with_capacity(config.registry.event_capacity));
    let service = Arc::new(RegistryService::new(
        owner,
        ServiceConfig {
            check_invariants: config.registry.check_invariants,
            ..ServiceConfig::default()
        },
        bus.clone(),
        Arc::new(SystemTimeSource),
    ));

    let address = registry_address(&owner, 0);
    let record = DeploymentRecord {
        address: address.to_hex(),
        owner: owner.to_hex(),
        network: config.network.name.clone(),
        chain_id: config.network.chain_id,
        deployed_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    info!(address = %address, network = %record.network, "Registry deployed");

    Deployment {
        address,
        record,
        service,
        bus,
    }
}

/// Write the deployment record and upsert the env file.
///
/// Returns the path of the record.
pub fn persist(record: &DeploymentRecord, config: &NodeConfig) -> Result<PathBuf, DeployError> {
    let path = write_record(record, &config.deployment.deployments_dir)?;
    info!(path = %path.display(), "Deployment record saved");

    let chain_id = record.chain_id.to_string();
    upsert_env_file(
        &config.deployment.env_file,
        &[
            (ADDRESS_ENV_KEY, record.address.as_str()),
            (RPC_URL_ENV_KEY, config.network.rpc_url.as_str()),
            (CHAIN_ID_ENV_KEY, chain_id.as_str()),
        ],
    )?;
    info!(path = %config.deployment.env_file.display(), "Env file updated");

    Ok(path)
}

/// Write `<dir>/<network>.json`, creating `dir` if needed.
pub fn write_record(record: &DeploymentRecord, dir: &Path) -> Result<PathBuf, DeployError> {
    fs::create_dir_all(dir).map_err(|source| DeployError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let path = dir.join(format!("{}.json", record.network));
    let json = serde_json::to_string_pretty(record)?;
    fs::write(&path, json).map_err(|source| DeployError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Replace or append `KEY=value` lines in the file at `path`.
///
/// A missing file is treated as empty.
pub fn upsert_env_file(path: &Path, entries: &[(&str, &str)]) -> Result<(), DeployError> {
    let existing = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(DeployError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    fs::write(path, upsert_env_contents(&existing, entries)).map_err(|source| DeployError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Pure form of `upsert_env_file`.
#[must_use]
pub fn upsert_env_contents(existing: &str, entries: &[(&str, &str)]) -> String {
    let mut pending: Vec<(&str, &str)> = entries.to_vec();
    let mut lines: Vec<String> = Vec::new();

    for line in existing.lines() {
        let key = line.split_once('=').map(|(k, _)| k.trim());
        match key.and_then(|k| pending.iter().position(|(p, _)| *p == k)) {
            Some(pos) => {
                let (k, v) = pending.remove(pos);
                lines.push(format!("{k}={v}"));
            }
            None => lines.push(line.to_string()),
        }
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    for (k, v) in pending {
        lines.push(format!("{k}={v}"));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
