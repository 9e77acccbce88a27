//! # Registry Node
//!
//! Hosts a provenance registry in-process.
//!
//! ## Modules
//!
//! - `cli` - flags and subcommands
//! - `config` - `NodeConfig` from defaults, `PV_*` variables and flags
//! - `accounts` - deterministic development accounts
//! - `deployment` - genesis, registry address, deployment record, env file
//! - `exercise` - scripted publish/verify run
//!
//! ## Startup Sequence
//!
//! 1. Load configuration and validate it
//! 2. Deploy: construct the registry once with its owner
//! 3. Run the requested command; only `deploy` persists the deployment
//!    record and env file

pub mod accounts;
pub mod cli;
pub mod config;
pub mod deployment;
pub mod exercise;

pub use accounts::{dev_account, dev_accounts, DevRoles};
pub use config::{load_config, ConfigError, NodeConfig};
pub use deployment::{deploy, persist, registry_address, Deployment, DeploymentRecord};
pub use exercise::{run_exercise, ExerciseReport};
