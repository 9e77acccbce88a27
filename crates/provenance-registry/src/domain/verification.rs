//! # Verification Engine
//!
//! Attestation accounting. All three preconditions are checked against the
//! current state before the article is touched:
//!
//! 1. caller is a trusted verifier
//! 2. the article exists
//! 3. caller has not attested to it yet

use super::access::AccessControl;
use super::entities::Attestation;
use super::ledger::ArticleLedger;
use super::value_objects::{ArticleKey, Role};
use crate::errors::RegistryError;
use shared_types::{ArticleId, LedgerContext};

/// What a successful attestation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttestationOutcome {
    /// The attested article.
    pub article_id: ArticleId,
    /// Attester count after this attestation.
    pub verifier_count: u64,
    /// True when this attestation moved the article to verified.
    pub newly_verified: bool,
}

/// Stateless attestation rules over the access list and the ledger.
pub struct VerificationEngine;

impl VerificationEngine {
    /// Record `ctx.caller`'s attestation of `article_id`.
    pub fn attest(
        access: &AccessControl,
        ledger: &mut ArticleLedger,
        ctx: &LedgerContext,
        article_id: ArticleId,
    ) -> Result<AttestationOutcome, RegistryError> {
        access.require(Role::Verifier, ctx.caller)?;

        let key = ArticleKey::Id(article_id);
        let article = ledger
            .get_mut(article_id)
            .ok_or(RegistryError::NotFound(key))?;

        if article.has_attested(&ctx.caller) {
            return Err(RegistryError::AlreadyAttested {
                article: article_id,
                verifier: ctx.caller,
            });
        }

        let newly_verified = !article.is_verified();
        let verifier_count = article.record_attestation(Attestation {
            verifier: ctx.caller,
            attested_at: ctx.timestamp,
            sequence: ctx.sequence,
        });

        Ok(AttestationOutcome {
            article_id,
            verifier_count,
            newly_verified,
        })
    }
}
