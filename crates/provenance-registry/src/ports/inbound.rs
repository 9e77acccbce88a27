//! # Driving Ports (API - Inbound)
//!
//! The public operations of the registry. Mutating calls take the
//! `LedgerContext` of the ordered transaction that carries them; the caller
//! identity and ledger time are read from it and from nowhere else.

use crate::domain::entities::Article;
use crate::domain::value_objects::{ArticleKey, VerificationStatus};
use crate::errors::RegistryError;
use shared_types::{ArticleId, ContentFingerprint, Identity, LedgerContext};

/// Registry operations.
pub trait ProvenanceRegistryApi {
    // =========================================================================
    // ACCESS CONTROL (owner only)
    // =========================================================================

    /// Trust `account` to publish. Idempotent.
    fn add_trusted_publisher(
        &mut self,
        ctx: &LedgerContext,
        account: Identity,
    ) -> Result<(), RegistryError>;

    /// Stop trusting `account` to publish. Idempotent.
    fn remove_trusted_publisher(
        &mut self,
        ctx: &LedgerContext,
        account: Identity,
    ) -> Result<(), RegistryError>;

    /// Trust `account` to attest. Idempotent.
    fn add_trusted_verifier(
        &mut self,
        ctx: &LedgerContext,
        account: Identity,
    ) -> Result<(), RegistryError>;

    /// Stop trusting `account` to attest. Idempotent.
    ///
    /// Attestations already recorded by `account` stay valid.
    fn remove_trusted_verifier(
        &mut self,
        ctx: &LedgerContext,
        account: Identity,
    ) -> Result<(), RegistryError>;

    /// Whether `account` may publish.
    fn is_trusted_publisher(&self, account: &Identity) -> bool;

    /// Whether `account` may attest.
    fn is_trusted_verifier(&self, account: &Identity) -> bool;

    // =========================================================================
    // ARTICLES
    // =========================================================================

    /// Register a new fingerprint. Requires a trusted publisher.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, then `DuplicateContent`.
    fn publish_article(
        &mut self,
        ctx: &LedgerContext,
        content_fingerprint: ContentFingerprint,
        metadata_pointer: String,
    ) -> Result<ArticleId, RegistryError>;

    /// Attest to an article. Requires a trusted verifier.
    ///
    /// Returns the attester count after this attestation.
    ///
    /// # Errors
    ///
    /// `Unauthorized`, then `NotFound`, then `AlreadyAttested`.
    fn verify_article(
        &mut self,
        ctx: &LedgerContext,
        article_id: ArticleId,
    ) -> Result<u64, RegistryError>;

    /// Fetch an article by identifier or fingerprint.
    fn get_article(&self, key: ArticleKey) -> Result<&Article, RegistryError>;

    /// `(exists, is_verified, verifier_count)`; never fails.
    fn check_article_verification(&self, key: ArticleKey) -> VerificationStatus;
}
