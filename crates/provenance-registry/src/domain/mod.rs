//! # Domain Layer (Inner Hexagon)
//!
//! Pure registry logic. NO I/O, NO async.
//!
//! - `access`: owner and trust sets
//! - `ledger`: article storage, identifier assignment, fingerprint uniqueness
//! - `verification`: attestation accounting
//! - `registry`: the composed state machine

pub mod access;
pub mod entities;
pub mod invariants;
pub mod ledger;
pub mod registry;
pub mod value_objects;
pub mod verification;

pub use access::{AccessControl, TrustList};
pub use entities::*;
pub use invariants::*;
pub use ledger::ArticleLedger;
pub use registry::ProvenanceRegistry;
pub use value_objects::*;
pub use verification::{AttestationOutcome, VerificationEngine};
