//! # Shared Types Crate
//!
//! Ledger primitives shared by the registry, the event bus and the node binary.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: account, content and article keys are defined here.
//! - **Envelope Integrity**: `LedgerTransaction<T>` is the sole wrapper for ordered
//!   calls; its `caller` is the only identity the registry trusts.

pub mod entities;
pub mod envelope;
pub mod errors;

pub use entities::*;
pub use envelope::{LedgerContext, LedgerTransaction};
pub use errors::*;
