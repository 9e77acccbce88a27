//! # Provenance Registry
//!
//! Permissioned publish/verify state machine. Trusted publishers register
//! content fingerprints; trusted verifiers attest to them. An article becomes
//! verified on its first attestation and further attestations accumulate as
//! additional evidence.
//!
//! ## Components
//!
//! | Component | Location | Owns |
//! |-----------|----------|------|
//! | Access control | `domain/access.rs` | owner, publisher and verifier trust sets |
//! | Article ledger | `domain/ledger.rs` | articles, identifier assignment, fingerprint index |
//! | Verification engine | `domain/verification.rs` | attestation accounting |
//! | Event log | `adapters/event_log.rs` | append-only record of committed events |
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Fingerprint unique across all articles | `ArticleLedger::insert` → `ensure_unique()` |
//! | Attester set only grows | `Article::record_attestation()` (append only) |
//! | Verified exactly when attested, never reverts | `Article::record_attestation()` |
//! | Attester was trusted at attestation time | `VerificationEngine::attest()` role guard |
//! | Owner fixed for the registry's lifetime | `AccessControl` has no owner setter |
//! | Failed calls change nothing and emit nothing | guards run before mutation in `ProvenanceRegistry` |
//!
//! Runtime checks for all of these live in `domain/invariants.rs`.
//!
//! ## Ordering
//!
//! The registry assumes a single writer fed by a totally ordered transaction
//! log. `RegistryService` provides that writer in-process and refuses
//! transactions whose sequence does not advance.
//!
//! ## Usage Example
//!
//! ```ignore
//! use provenance_registry::prelude::*;
//!
//! let mut registry = ProvenanceRegistry::new(owner);
//! registry.add_trusted_verifier(&ctx, verifier)?;
//! let id = registry.publish_article(&ctx, fingerprint, "loc://meta".into())?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use adapters::{EventLog, LoggedEvent, ManualClock, SystemTimeSource};
pub use domain::{
    AccessControl, Article, ArticleKey, ArticleLedger, ArticleStatus, Attestation,
    ProvenanceRegistry, Role, TrustList, VerificationEngine, VerificationStatus,
};
pub use errors::{RegistryError, RegistryErrorKind, ServiceError};
pub use events::{CallOutcome, RegistryCall};
pub use ports::{EventSink, ProvenanceRegistryApi, TimeSource};
pub use service::{RegistryService, ServiceConfig, ServiceStats};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::domain::{
        check_all_invariants, Article, ArticleKey, ArticleStatus, ProvenanceRegistry,
        VerificationStatus,
    };
    pub use crate::errors::{RegistryError, ServiceError};
    pub use crate::events::{CallOutcome, RegistryCall};
    pub use crate::ports::ProvenanceRegistryApi;
    pub use crate::service::{RegistryService, ServiceConfig};
    pub use shared_types::{ArticleId, ContentFingerprint, Identity, LedgerContext};
}
