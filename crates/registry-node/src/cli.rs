//! Command-line interface.

use crate::config::NodeConfig;
use clap::{Parser, Subcommand};
use shared_types::Identity;
use std::path::PathBuf;

/// Registry Node: host a permissioned provenance registry
#[derive(Parser, Debug)]
#[command(name = "registry-node")]
#[command(about = "Deploy and host a permissioned provenance registry")]
pub struct Args {
    /// Owner identity (40 hex chars); overrides PV_OWNER
    #[arg(long, global = true)]
    pub owner: Option<Identity>,

    /// Network name; overrides PV_NETWORK
    #[arg(long, global = true)]
    pub network: Option<String>,

    /// Deployment record directory; overrides PV_DEPLOYMENTS_DIR
    #[arg(long, global = true)]
    pub deployments_dir: Option<PathBuf>,

    /// Env file to update; overrides PV_ENV_FILE
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// What to do after deploying.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Deploy, write the deployment record and env file, then exit
    Deploy,
    /// Deploy and log every registry event until Ctrl+C
    Run,
    /// Deploy and run the scripted publish/verify scenario
    Exercise,
}

impl Command {
    /// Whether the command writes the deployment record and env file.
    ///
    /// `run` and `exercise` host a throwaway registry and leave both alone.
    #[must_use]
    pub fn persists_deployment(self) -> bool {
        matches!(self, Self::Deploy)
    }
}

impl Args {
    /// Apply flag overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut NodeConfig) {
        if let Some(owner) = self.owner {
            config.registry.owner = owner;
        }
        if let Some(network) = &self.network {
            config.network.name = network.clone();
        }
        if let Some(dir) = &self.deployments_dir {
            config.deployment.deployments_dir = dir.clone();
        }
        if let Some(path) = &self.env_file {
            config.deployment.env_file = path.clone();
        }
    }
}
