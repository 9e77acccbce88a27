//! # Domain Entities
//!
//! The article record and its attestations.
//!
//! Fields are crate-private: outside the registry an `Article` is a read-only
//! snapshot, and the only way to change one is through a registry operation.

use super::value_objects::{ArticleStatus, VerificationStatus};
use serde::{Deserialize, Serialize};
use shared_types::{ArticleId, ContentFingerprint, Identity};
use std::collections::BTreeSet;

/// One verifier's act of vouching for an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    /// The attesting identity.
    pub verifier: Identity,
    /// Ledger time of the attestation.
    pub attested_at: u64,
    /// Ledger sequence of the attesting call.
    pub sequence: u64,
}

/// A published content record.
///
/// Serializable for observers, never deserialized: an `Article` only comes
/// from a registry operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub(crate) id: ArticleId,
    pub(crate) content_fingerprint: ContentFingerprint,
    pub(crate) metadata_pointer: String,
    pub(crate) publisher: Identity,
    pub(crate) created_at: u64,
    pub(crate) is_verified: bool,
    /// Attestations in the order they were committed. Grows only.
    pub(crate) attestations: Vec<Attestation>,
}

impl Article {
    /// A freshly published, unverified article.
    pub(crate) fn new(
        id: ArticleId,
        content_fingerprint: ContentFingerprint,
        metadata_pointer: String,
        publisher: Identity,
        created_at: u64,
    ) -> Self {
        Self {
            id,
            content_fingerprint,
            metadata_pointer,
            publisher,
            created_at,
            is_verified: false,
            attestations: Vec::new(),
        }
    }

    /// Assigned identifier.
    #[must_use]
    pub fn id(&self) -> ArticleId {
        self.id
    }

    /// Publisher-supplied content fingerprint.
    #[must_use]
    pub fn content_fingerprint(&self) -> ContentFingerprint {
        self.content_fingerprint
    }

    /// Locator of the off-ledger content description.
    #[must_use]
    pub fn metadata_pointer(&self) -> &str {
        &self.metadata_pointer
    }

    /// Identity that published the article.
    #[must_use]
    pub fn publisher(&self) -> Identity {
        self.publisher
    }

    /// Ledger time of publication.
    #[must_use]
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// Whether at least one trusted verifier attested.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    /// Number of distinct attesters.
    #[must_use]
    pub fn verifier_count(&self) -> u64 {
        self.attestations.len() as u64
    }

    /// Attestations in commit order.
    #[must_use]
    pub fn attestations(&self) -> &[Attestation] {
        &self.attestations
    }

    /// Attesters in commit order.
    pub fn verifiers(&self) -> impl Iterator<Item = Identity> + '_ {
        self.attestations.iter().map(|a| a.verifier)
    }

    /// Attesters as a set.
    #[must_use]
    pub fn verifier_set(&self) -> BTreeSet<Identity> {
        self.verifiers().collect()
    }

    /// Whether `verifier` has already attested.
    #[must_use]
    pub fn has_attested(&self, verifier: &Identity) -> bool {
        self.attestations.iter().any(|a| a.verifier == *verifier)
    }

    /// Lifecycle state.
    #[must_use]
    pub fn status(&self) -> ArticleStatus {
        if self.is_verified {
            ArticleStatus::Verified
        } else {
            ArticleStatus::Unverified
        }
    }

    /// `(exists, is_verified, verifier_count)` view.
    #[must_use]
    pub fn verification_status(&self) -> VerificationStatus {
        VerificationStatus {
            exists: true,
            is_verified: self.is_verified,
            verifier_count: self.verifier_count(),
        }
    }

    /// Append an attestation and return the new attester count.
    ///
    /// Callers check `has_attested` first; this never removes or reorders.
    pub(crate) fn record_attestation(&mut self, attestation: Attestation) -> u64 {
        self.attestations.push(attestation);
        self.is_verified = true;
        self.verifier_count()
    }
}
