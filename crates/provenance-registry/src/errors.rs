//! # Error Types
//!
//! All error types for registry operations.
//!
//! Every error here is raised before any state is touched, so a failed call
//! leaves the registry exactly as it was and records no event.

use crate::domain::value_objects::{ArticleKey, Role};
use serde::{Deserialize, Serialize};
use shared_types::{ArticleId, ContentFingerprint, Identity};
use thiserror::Error;

// =============================================================================
// REGISTRY ERRORS
// =============================================================================

/// Errors returned by registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Caller lacks the role the operation requires.
    #[error("unauthorized: {caller} is not {required}")]
    Unauthorized {
        /// The rejected caller.
        caller: Identity,
        /// The role that was required.
        required: Role,
    },

    /// No article under this key.
    #[error("article not found: {0}")]
    NotFound(ArticleKey),

    /// Fingerprint already registered.
    #[error("duplicate content: {fingerprint} already registered as {existing}")]
    DuplicateContent {
        /// The colliding fingerprint.
        fingerprint: ContentFingerprint,
        /// The article that already owns it.
        existing: ArticleId,
    },

    /// Verifier has already attested to this article.
    #[error("already attested: {verifier} has already verified {article}")]
    AlreadyAttested {
        /// The article.
        article: ArticleId,
        /// The repeat attester.
        verifier: Identity,
    },
}

impl RegistryError {
    /// Flat error category for reporting.
    #[must_use]
    pub fn kind(&self) -> RegistryErrorKind {
        match self {
            Self::Unauthorized { .. } => RegistryErrorKind::Unauthorized,
            Self::NotFound(_) => RegistryErrorKind::NotFound,
            Self::DuplicateContent { .. } => RegistryErrorKind::DuplicateContent,
            Self::AlreadyAttested { .. } => RegistryErrorKind::AlreadyAttested,
        }
    }
}

/// Error category for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistryErrorKind {
    /// See `RegistryError::Unauthorized`.
    Unauthorized,
    /// See `RegistryError::NotFound`.
    NotFound,
    /// See `RegistryError::DuplicateContent`.
    DuplicateContent,
    /// See `RegistryError::AlreadyAttested`.
    AlreadyAttested,
}

// =============================================================================
// SERVICE ERRORS
// =============================================================================

/// Errors from the transaction-applying service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The registry rejected the call.
    #[error("rejected: {0}")]
    Rejected(#[from] RegistryError),

    /// Transaction sequence did not advance past the last applied one.
    #[error("out of order: sequence {received} after {last_applied}")]
    OutOfOrder {
        /// Sequence carried by the transaction.
        received: u64,
        /// Highest sequence already applied.
        last_applied: u64,
    },
}

impl ServiceError {
    /// The underlying registry error, if the registry rejected the call.
    #[must_use]
    pub fn registry_error(&self) -> Option<&RegistryError> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::OutOfOrder { .. } => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
