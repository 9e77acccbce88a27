//! # Registry Service
//!
//! Hosts one `ProvenanceRegistry` behind a single writer lock and forwards
//! committed events to the shared bus.
//!
//! ## Ordering
//!
//! - `apply` takes transactions already ordered by the host ledger. A
//!   sequence that does not advance past the last applied one is refused
//!   with `OutOfOrder` and touches nothing.
//! - `submit` plays the host for in-process callers: it assigns the next
//!   sequence and reads ledger time from the `TimeSource`.
//! - A rejected call still occupies its position in the order.
//!
//! Events reach the bus only after the lock is released and only for
//! committed calls.

use crate::adapters::event_log::LoggedEvent;
use crate::domain::entities::Article;
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::registry::ProvenanceRegistry;
use crate::domain::value_objects::{ArticleKey, ArticleStatus, VerificationStatus};
use crate::errors::{RegistryError, ServiceError};
use crate::events::{CallOutcome, RegistryCall};
use crate::ports::inbound::ProvenanceRegistryApi;
use crate::ports::outbound::TimeSource;

use parking_lot::RwLock;
use shared_bus::{EventPublisher, RegistryEvent};
use shared_types::{Identity, LedgerContext, LedgerTransaction};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Registry service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Forward committed events to the bus.
    pub publish_events: bool,
    /// Run the full invariant check after every commit.
    pub check_invariants: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            publish_events: true,
            check_invariants: cfg!(debug_assertions),
        }
    }
}

/// Statistics for the registry service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Calls that committed.
    pub calls_applied: u64,
    /// Calls the registry refused.
    pub calls_rejected: u64,
    /// Transactions refused for their sequence.
    pub out_of_order: u64,
    /// Articles created.
    pub articles_published: u64,
    /// Attestations recorded.
    pub attestations_recorded: u64,
    /// Events handed to the bus.
    pub events_published: u64,
}

struct HostedRegistry {
    registry: ProvenanceRegistry,
    last_sequence: u64,
}

/// The registry service.
pub struct RegistryService {
    config: ServiceConfig,
    state: RwLock<HostedRegistry>,
    bus: Arc<dyn EventPublisher>,
    clock: Arc<dyn TimeSource>,
    stats: RwLock<ServiceStats>,
}

impl RegistryService {
    /// Genesis of a fresh registry owned by `owner`.
    pub fn new(
        owner: Identity,
        config: ServiceConfig,
        bus: Arc<dyn EventPublisher>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        info!(owner = %owner, "Registry created");
        Self {
            config,
            state: RwLock::new(HostedRegistry {
                registry: ProvenanceRegistry::new(owner),
                last_sequence: 0,
            }),
            bus,
            clock,
            stats: RwLock::new(ServiceStats::default()),
        }
    }

    /// Submit a call as `caller`; sequence and time are assigned here.
    #[instrument(skip_all, fields(call = call.name(), caller = %caller))]
    pub async fn submit(
        &self,
        caller: Identity,
        call: RegistryCall,
    ) -> Result<CallOutcome, ServiceError> {
        let result = {
            let mut state = self.state.write();
            let ctx = LedgerContext::new(caller, state.last_sequence + 1, self.clock.now());
            self.commit(&mut state, LedgerTransaction::new(ctx, call))
        };
        self.finish(result).await
    }

    /// Apply a transaction ordered by the host ledger.
    #[instrument(
        skip_all,
        fields(call = tx.payload.name(), caller = %tx.caller(), sequence = tx.context.sequence)
    )]
    pub async fn apply(
        &self,
        tx: LedgerTransaction<RegistryCall>,
    ) -> Result<CallOutcome, ServiceError> {
        let result = {
            let mut state = self.state.write();
            self.commit(&mut state, tx)
        };
        self.finish(result).await
    }

    fn commit(
        &self,
        state: &mut HostedRegistry,
        tx: LedgerTransaction<RegistryCall>,
    ) -> Result<(CallOutcome, Vec<RegistryEvent>), ServiceError> {
        let sequence = tx.context.sequence;
        if sequence <= state.last_sequence {
            warn!(
                received = sequence,
                last_applied = state.last_sequence,
                "Transaction out of order"
            );
            self.stats.write().out_of_order += 1;
            return Err(ServiceError::OutOfOrder {
                received: sequence,
                last_applied: state.last_sequence,
            });
        }
        state.last_sequence = sequence;

        let mark = state.registry.events().len();
        let outcome = match state.registry.apply(&tx) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(kind = ?err.kind(), error = %err, "Call rejected");
                self.stats.write().calls_rejected += 1;
                return Err(err.into());
            }
        };

        let committed: Vec<RegistryEvent> = state.registry.events()[mark..]
            .iter()
            .map(|logged| logged.event.clone())
            .collect();

        {
            let mut stats = self.stats.write();
            stats.calls_applied += 1;
            match outcome {
                CallOutcome::Published(_) => stats.articles_published += 1,
                CallOutcome::Verified { .. } => stats.attestations_recorded += 1,
                CallOutcome::Applied => {}
            }
        }
        info!(sequence, outcome = ?outcome, "Call committed");

        let mut outbound = committed;
        if self.config.check_invariants {
            if let InvariantCheckResult::Invalid(violations) = check_all_invariants(&state.registry)
            {
                for violation in &violations {
                    error!(%violation, "Invariant violated");
                }
                outbound.push(RegistryEvent::CriticalError {
                    component: "provenance-registry".to_string(),
                    error: format!(
                        "{} invariant violation(s) after sequence {sequence}",
                        violations.len()
                    ),
                });
            }
        }

        Ok((outcome, outbound))
    }

    async fn finish(
        &self,
        result: Result<(CallOutcome, Vec<RegistryEvent>), ServiceError>,
    ) -> Result<CallOutcome, ServiceError> {
        let (outcome, events) = result?;
        if self.config.publish_events {
            for event in events {
                let name = event.name();
                let receivers = self.bus.publish(event).await;
                debug!(event = name, receivers, "Event forwarded to bus");
                self.stats.write().events_published += 1;
            }
        }
        Ok(outcome)
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Run `f` against the current registry state.
    pub fn read<R>(&self, f: impl FnOnce(&ProvenanceRegistry) -> R) -> R {
        f(&self.state.read().registry)
    }

    /// Snapshot of an article.
    pub fn get_article(&self, key: ArticleKey) -> Result<Article, RegistryError> {
        self.read(|reg| reg.get_article(key).cloned())
    }

    /// `(exists, is_verified, verifier_count)`.
    pub fn check_article_verification(&self, key: ArticleKey) -> VerificationStatus {
        self.read(|reg| reg.check_article_verification(key))
    }

    /// Lifecycle state of an article.
    pub fn status(&self, key: ArticleKey) -> ArticleStatus {
        self.read(|reg| reg.status(key))
    }

    /// Whether `account` may publish.
    pub fn is_trusted_publisher(&self, account: &Identity) -> bool {
        self.read(|reg| reg.is_trusted_publisher(account))
    }

    /// Whether `account` may attest.
    pub fn is_trusted_verifier(&self, account: &Identity) -> bool {
        self.read(|reg| reg.is_trusted_verifier(account))
    }

    /// The registry owner.
    pub fn owner(&self) -> Identity {
        self.read(|reg| reg.owner())
    }

    /// Highest sequence taken so far.
    pub fn last_sequence(&self) -> u64 {
        self.state.read().last_sequence
    }

    /// Copy of the event log.
    pub fn events(&self) -> Vec<LoggedEvent> {
        self.read(|reg| reg.events().to_vec())
    }

    /// Get current service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }
}
