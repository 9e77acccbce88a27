//! # Call Schema
//!
//! Payloads carried inside `LedgerTransaction<RegistryCall>` and the results
//! they produce. Outbound notifications are `shared_bus::RegistryEvent`.
//!
//! ## Envelope-Only Identity
//!
//! No payload carries a caller field. The acting identity is always
//! `LedgerTransaction::context.caller`.

use serde::{Deserialize, Serialize};
use shared_types::{ArticleId, ContentFingerprint, Identity};

pub use shared_bus::{EventTopic, RegistryEvent};

// =============================================================================
// INBOUND CALLS
// =============================================================================

/// The six mutating registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryCall {
    /// Owner only.
    AddTrustedPublisher {
        /// Identity to trust.
        account: Identity,
    },
    /// Owner only.
    RemoveTrustedPublisher {
        /// Identity to distrust.
        account: Identity,
    },
    /// Owner only.
    AddTrustedVerifier {
        /// Identity to trust.
        account: Identity,
    },
    /// Owner only.
    RemoveTrustedVerifier {
        /// Identity to distrust.
        account: Identity,
    },
    /// Trusted publishers only.
    PublishArticle {
        /// Fingerprint of the off-ledger content.
        content_fingerprint: ContentFingerprint,
        /// Locator of the content description.
        metadata_pointer: String,
    },
    /// Trusted verifiers only.
    VerifyArticle {
        /// Article to attest to.
        article_id: ArticleId,
    },
}

impl RegistryCall {
    /// Operation name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddTrustedPublisher { .. } => "addTrustedPublisher",
            Self::RemoveTrustedPublisher { .. } => "removeTrustedPublisher",
            Self::AddTrustedVerifier { .. } => "addTrustedVerifier",
            Self::RemoveTrustedVerifier { .. } => "removeTrustedVerifier",
            Self::PublishArticle { .. } => "publishArticle",
            Self::VerifyArticle { .. } => "verifyArticle",
        }
    }

    /// Whether only the owner may submit this call.
    #[must_use]
    pub fn is_administrative(&self) -> bool {
        !matches!(
            self,
            Self::PublishArticle { .. } | Self::VerifyArticle { .. }
        )
    }
}

// =============================================================================
// OUTCOMES
// =============================================================================

/// Success result of an applied call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOutcome {
    /// Trust-list change committed (possibly a no-op).
    Applied,
    /// A new article was created.
    Published(ArticleId),
    /// An attestation was recorded.
    Verified {
        /// Attester count after this attestation.
        verifier_count: u64,
    },
}

impl CallOutcome {
    /// Identifier of the article created, if any.
    #[must_use]
    pub fn article_id(&self) -> Option<ArticleId> {
        match self {
            Self::Published(id) => Some(*id),
            _ => None,
        }
    }
}
