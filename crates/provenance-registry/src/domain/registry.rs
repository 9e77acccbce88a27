//! # Provenance Registry
//!
//! The synchronous state machine. Composes access control, the article
//! ledger and the verification engine, and writes one event per committed
//! call to its `EventSink`.
//!
//! Every operation follows the same shape: role guard, record-level guards,
//! mutation, event. A guard failure returns before the mutation, so a failed
//! call changes nothing and records nothing.

use super::access::{AccessControl, TrustList};
use super::entities::Article;
use super::ledger::ArticleLedger;
use super::value_objects::{ArticleKey, ArticleStatus, Role, VerificationStatus};
use super::verification::VerificationEngine;
use crate::adapters::event_log::{EventLog, LoggedEvent};
use crate::errors::RegistryError;
use crate::events::{CallOutcome, RegistryCall};
use crate::ports::inbound::ProvenanceRegistryApi;
use crate::ports::outbound::EventSink;
use shared_bus::RegistryEvent;
use shared_types::{ArticleId, ContentFingerprint, Identity, LedgerContext, LedgerTransaction};

/// A single registry instance.
///
/// Constructed once with its owner; there is no re-initialization path.
#[derive(Debug, Clone)]
pub struct ProvenanceRegistry<S = EventLog> {
    access: AccessControl,
    ledger: ArticleLedger,
    sink: S,
}

impl ProvenanceRegistry<EventLog> {
    /// Genesis with an in-memory event log.
    #[must_use]
    pub fn new(owner: Identity) -> Self {
        Self::with_sink(owner, EventLog::new())
    }

    /// Every committed event, oldest first.
    #[must_use]
    pub fn events(&self) -> &[LoggedEvent] {
        self.sink.entries()
    }
}

impl<S: EventSink> ProvenanceRegistry<S> {
    /// Genesis: `owner` is fixed and lands in both trust sets.
    pub fn with_sink(owner: Identity, sink: S) -> Self {
        Self {
            access: AccessControl::genesis(owner),
            ledger: ArticleLedger::new(),
            sink,
        }
    }

    /// Apply an ordered call from the host ledger.
    pub fn apply(
        &mut self,
        tx: &LedgerTransaction<RegistryCall>,
    ) -> Result<CallOutcome, RegistryError> {
        let ctx = &tx.context;
        match &tx.payload {
            RegistryCall::AddTrustedPublisher { account } => self
                .add_trusted_publisher(ctx, *account)
                .map(|()| CallOutcome::Applied),
            RegistryCall::RemoveTrustedPublisher { account } => self
                .remove_trusted_publisher(ctx, *account)
                .map(|()| CallOutcome::Applied),
            RegistryCall::AddTrustedVerifier { account } => self
                .add_trusted_verifier(ctx, *account)
                .map(|()| CallOutcome::Applied),
            RegistryCall::RemoveTrustedVerifier { account } => self
                .remove_trusted_verifier(ctx, *account)
                .map(|()| CallOutcome::Applied),
            RegistryCall::PublishArticle {
                content_fingerprint,
                metadata_pointer,
            } => self
                .publish_article(ctx, *content_fingerprint, metadata_pointer.clone())
                .map(CallOutcome::Published),
            RegistryCall::VerifyArticle { article_id } => self
                .verify_article(ctx, *article_id)
                .map(|verifier_count| CallOutcome::Verified { verifier_count }),
        }
    }

    /// Owner-gated trust-list change. The event is recorded even when the
    /// set already had the requested shape.
    fn change_trust(
        &mut self,
        ctx: &LedgerContext,
        list: TrustList,
        account: Identity,
        grant: bool,
    ) -> Result<(), RegistryError> {
        self.access.require(Role::Owner, ctx.caller)?;

        if grant {
            self.access.grant(list, account);
        } else {
            self.access.revoke(list, account);
        }

        let event = match (list, grant) {
            (TrustList::Publishers, true) => RegistryEvent::PublisherAdded { account },
            (TrustList::Publishers, false) => RegistryEvent::PublisherRemoved { account },
            (TrustList::Verifiers, true) => RegistryEvent::VerifierAdded { account },
            (TrustList::Verifiers, false) => RegistryEvent::VerifierRemoved { account },
        };
        self.sink.record(ctx, event);
        Ok(())
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// The fixed administrative identity.
    #[must_use]
    pub fn owner(&self) -> Identity {
        self.access.owner()
    }

    /// Lifecycle state of the article under `key`.
    #[must_use]
    pub fn status(&self, key: ArticleKey) -> ArticleStatus {
        self.ledger.verification_status(key).into()
    }

    /// Look an article up by fingerprint.
    #[must_use]
    pub fn article_by_fingerprint(&self, fingerprint: &ContentFingerprint) -> Option<&Article> {
        self.ledger.get(ArticleKey::Fingerprint(*fingerprint))
    }

    /// Number of published articles.
    #[must_use]
    pub fn article_count(&self) -> usize {
        self.ledger.len()
    }

    /// Whether `verifier` has attested to the article under `key`.
    #[must_use]
    pub fn has_attested(&self, key: ArticleKey, verifier: &Identity) -> bool {
        self.ledger
            .get(key)
            .is_some_and(|article| article.has_attested(verifier))
    }

    /// Sorted snapshot of the publisher trust set.
    #[must_use]
    pub fn trusted_publishers(&self) -> Vec<Identity> {
        self.access.members(TrustList::Publishers)
    }

    /// Sorted snapshot of the verifier trust set.
    #[must_use]
    pub fn trusted_verifiers(&self) -> Vec<Identity> {
        self.access.members(TrustList::Verifiers)
    }

    /// Access-control state.
    #[must_use]
    pub fn access(&self) -> &AccessControl {
        &self.access
    }

    /// Article state.
    #[must_use]
    pub fn ledger(&self) -> &ArticleLedger {
        &self.ledger
    }

    /// The event sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: EventSink> ProvenanceRegistryApi for ProvenanceRegistry<S> {
    fn add_trusted_publisher(
        &mut self,
        ctx: &LedgerContext,
        account: Identity,
    ) -> Result<(), RegistryError> {
        self.change_trust(ctx, TrustList::Publishers, account, true)
    }

    fn remove_trusted_publisher(
        &mut self,
        ctx: &LedgerContext,
        account: Identity,
    ) -> Result<(), RegistryError> {
        self.change_trust(ctx, TrustList::Publishers, account, false)
    }

    fn add_trusted_verifier(
        &mut self,
        ctx: &LedgerContext,
        account: Identity,
    ) -> Result<(), RegistryError> {
        self.change_trust(ctx, TrustList::Verifiers, account, true)
    }

    fn remove_trusted_verifier(
        &mut self,
        ctx: &LedgerContext,
        account: Identity,
    ) -> Result<(), RegistryError> {
        self.change_trust(ctx, TrustList::Verifiers, account, false)
    }

    fn is_trusted_publisher(&self, account: &Identity) -> bool {
        self.access.is_trusted_publisher(account)
    }

    fn is_trusted_verifier(&self, account: &Identity) -> bool {
        self.access.is_trusted_verifier(account)
    }

    fn publish_article(
        &mut self,
        ctx: &LedgerContext,
        content_fingerprint: ContentFingerprint,
        metadata_pointer: String,
    ) -> Result<ArticleId, RegistryError> {
        self.access.require(Role::Publisher, ctx.caller)?;
        let article_id =
            self.ledger
                .insert(content_fingerprint, metadata_pointer, ctx.caller, ctx.timestamp)?;

        self.sink.record(
            ctx,
            RegistryEvent::ArticlePublished {
                article_id,
                content_fingerprint,
                publisher: ctx.caller,
                created_at: ctx.timestamp,
            },
        );
        Ok(article_id)
    }

    fn verify_article(
        &mut self,
        ctx: &LedgerContext,
        article_id: ArticleId,
    ) -> Result<u64, RegistryError> {
        let outcome = VerificationEngine::attest(&self.access, &mut self.ledger, ctx, article_id)?;

        self.sink.record(
            ctx,
            RegistryEvent::ArticleVerified {
                article_id,
                verifier: ctx.caller,
                verifier_count: outcome.verifier_count,
            },
        );
        Ok(outcome.verifier_count)
    }

    fn get_article(&self, key: ArticleKey) -> Result<&Article, RegistryError> {
        self.ledger.require(key)
    }

    fn check_article_verification(&self, key: ArticleKey) -> VerificationStatus {
        self.ledger.verification_status(key)
    }
}
