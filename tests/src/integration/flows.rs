//! # Integration Test Flows
//!
//! Tests that the hosted registry service, the shared bus and the node's
//! deployment outputs work together.
//!
//! ## Flows Tested:
//!
//! 1. **Service → Bus**: committed calls reach observers, filtered by topic
//!    and by article; rejected calls reach nobody
//! 2. **Host ordering**: transactions applied out of order are refused
//! 3. **Concurrent callers**: parallel submitters serialize on one registry
//! 4. **Deploy → Persist → Exercise**: the node bootstraps a working registry

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    // Shared infrastructure
    use shared_bus::{EventFilter, EventTopic, InMemoryEventBus, RegistryEvent};
    use shared_types::{ArticleId, ContentFingerprint, Identity, LedgerContext, LedgerTransaction};

    // Registry
    use provenance_registry::domain::check_all_invariants;
    use provenance_registry::{
        ArticleStatus, CallOutcome, ManualClock, RegistryCall, RegistryErrorKind,
        RegistryService, ServiceConfig, ServiceError,
    };

    // Node
    use registry_node::deployment::ADDRESS_ENV_KEY;
    use registry_node::{deploy, persist, run_exercise, DevRoles, NodeConfig};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const OWNER: Identity = Identity::new([0x0A; 20]);
    const PUBLISHER: Identity = Identity::new([0x0B; 20]);
    const VERIFIER_1: Identity = Identity::new([0x0C; 20]);
    const VERIFIER_2: Identity = Identity::new([0x0D; 20]);
    const OUTSIDER: Identity = Identity::new([0x0E; 20]);

    fn fingerprint(byte: u8) -> ContentFingerprint {
        ContentFingerprint::new([byte; 32])
    }

    fn publish(byte: u8) -> RegistryCall {
        RegistryCall::PublishArticle {
            content_fingerprint: fingerprint(byte),
            metadata_pointer: format!("ipfs://article-{byte}"),
        }
    }

    fn create_service() -> (Arc<RegistryService>, Arc<InMemoryEventBus>, Arc<ManualClock>) {
        let bus = Arc::new(InMemoryEventBus::new());
        let clock = Arc::new(ManualClock::new(1_700_000_000));
        let service = Arc::new(RegistryService::new(
            OWNER,
            ServiceConfig {
                publish_events: true,
                check_invariants: true,
            },
            bus.clone(),
            clock.clone(),
        ));
        (service, bus, clock)
    }

    async fn trust_everyone(service: &RegistryService) {
        let calls = [
            RegistryCall::AddTrustedPublisher { account: PUBLISHER },
            RegistryCall::AddTrustedVerifier {
                account: VERIFIER_1,
            },
            RegistryCall::AddTrustedVerifier {
                account: VERIFIER_2,
            },
        ];
        for call in calls {
            service.submit(OWNER, call).await.unwrap();
        }
    }

    // =============================================================================
    // SERVICE → BUS
    // =============================================================================

    /// Observers filtered by topic only see their topic.
    #[tokio::test]
    async fn test_topic_filtered_observers() {
        let (service, bus, _) = create_service();
        let mut access = bus.subscribe(EventFilter::topics(vec![EventTopic::AccessControl]));
        let mut articles = bus.subscribe(EventFilter::topics(vec![EventTopic::Articles]));

        trust_everyone(&service).await;
        service.submit(PUBLISHER, publish(1)).await.unwrap();
        service
            .submit(
                VERIFIER_1,
                RegistryCall::VerifyArticle {
                    article_id: ArticleId::FIRST,
                },
            )
            .await
            .unwrap();

        let access_events = access.drain();
        assert_eq!(access_events.len(), 3);
        assert!(access_events
            .iter()
            .all(|e| e.topic() == EventTopic::AccessControl));

        let article_events = articles.drain();
        assert_eq!(article_events.len(), 2);
        assert!(matches!(
            article_events[0],
            RegistryEvent::ArticlePublished { publisher: PUBLISHER, .. }
        ));
        assert!(matches!(
            article_events[1],
            RegistryEvent::ArticleVerified {
                verifier: VERIFIER_1,
                verifier_count: 1,
                ..
            }
        ));
    }

    /// An article-scoped stream ignores every other article.
    #[tokio::test]
    async fn test_article_scoped_stream() {
        let (service, bus, _) = create_service();
        let second = ArticleId::FIRST.next();
        let mut stream = bus.event_stream(EventFilter::for_articles(vec![second]));

        trust_everyone(&service).await;
        service.submit(PUBLISHER, publish(1)).await.unwrap();
        service.submit(PUBLISHER, publish(2)).await.unwrap();
        for verifier in [VERIFIER_1, VERIFIER_2] {
            service
                .submit(
                    verifier,
                    RegistryCall::VerifyArticle {
                        article_id: ArticleId::FIRST,
                    },
                )
                .await
                .unwrap();
        }
        service
            .submit(VERIFIER_2, RegistryCall::VerifyArticle { article_id: second })
            .await
            .unwrap();

        let first = timeout(Duration::from_millis(100), stream.next())
            .await
            .expect("timeout")
            .expect("stream closed");
        assert_eq!(first.article_id(), Some(second));
        assert_eq!(first.name(), "ArticlePublished");

        let next = timeout(Duration::from_millis(100), stream.next())
            .await
            .expect("timeout")
            .expect("stream closed");
        assert!(matches!(
            next,
            RegistryEvent::ArticleVerified {
                verifier: VERIFIER_2,
                verifier_count: 1,
                ..
            }
        ));
    }

    /// Refused calls publish nothing and leave state untouched.
    #[tokio::test]
    async fn test_rejections_are_silent_on_the_bus() {
        let (service, bus, _) = create_service();
        trust_everyone(&service).await;
        service.submit(PUBLISHER, publish(7)).await.unwrap();
        let mut events = bus.subscribe(EventFilter::all());

        let attempts = [
            (OUTSIDER, publish(8), RegistryErrorKind::Unauthorized),
            (PUBLISHER, publish(7), RegistryErrorKind::DuplicateContent),
            (
                VERIFIER_1,
                RegistryCall::VerifyArticle {
                    article_id: ArticleId(99),
                },
                RegistryErrorKind::NotFound,
            ),
            (
                PUBLISHER,
                RegistryCall::VerifyArticle {
                    article_id: ArticleId::FIRST,
                },
                RegistryErrorKind::Unauthorized,
            ),
            (
                VERIFIER_1,
                RegistryCall::AddTrustedVerifier { account: OUTSIDER },
                RegistryErrorKind::Unauthorized,
            ),
        ];
        for (caller, call, expected) in attempts {
            let err = service.submit(caller, call).await.unwrap_err();
            assert_eq!(err.registry_error().map(|e| e.kind()), Some(expected));
        }

        assert!(events.drain().is_empty());
        assert_eq!(
            service.status(fingerprint(8).into()),
            ArticleStatus::Unpublished
        );
        assert!(!service.is_trusted_verifier(&OUTSIDER));
        assert_eq!(service.stats().calls_rejected, 5);
        assert!(service.read(|reg| check_all_invariants(reg)).is_valid());
    }

    // =============================================================================
    // HOST ORDERING
    // =============================================================================

    #[tokio::test]
    async fn test_host_ordering_enforced() {
        let (service, bus, _) = create_service();
        let mut events = bus.subscribe(EventFilter::all());

        let tx = |sequence, caller, call| {
            LedgerTransaction::new(LedgerContext::new(caller, sequence, 1_000 + sequence), call)
        };

        service
            .apply(tx(
                5,
                OWNER,
                RegistryCall::AddTrustedPublisher { account: PUBLISHER },
            ))
            .await
            .unwrap();

        // Replay and reordering are refused before the registry sees them.
        for sequence in [5, 3] {
            let err = service
                .apply(tx(sequence, PUBLISHER, publish(1)))
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                ServiceError::OutOfOrder {
                    last_applied: 5,
                    ..
                }
            ));
        }
        assert_eq!(service.status(fingerprint(1).into()), ArticleStatus::Unpublished);

        // Gaps are fine.
        let outcome = service
            .apply(tx(9, PUBLISHER, publish(1)))
            .await
            .unwrap();
        assert_eq!(outcome, CallOutcome::Published(ArticleId::FIRST));
        assert_eq!(service.last_sequence(), 9);

        let article = service.get_article(ArticleId::FIRST.into()).unwrap();
        assert_eq!(article.created_at(), 1_009);
        assert_eq!(events.drain().len(), 2);
        assert_eq!(service.stats().out_of_order, 2);
    }

    #[tokio::test]
    async fn test_submit_uses_clock_time() {
        let (service, _, clock) = create_service();
        trust_everyone(&service).await;

        clock.set(1_800_000_000);
        service.submit(PUBLISHER, publish(3)).await.unwrap();
        clock.advance(60);
        service.submit(PUBLISHER, publish(4)).await.unwrap();

        let first = service.get_article(fingerprint(3).into()).unwrap();
        let second = service.get_article(fingerprint(4).into()).unwrap();
        assert_eq!(first.created_at(), 1_800_000_000);
        assert_eq!(second.created_at(), 1_800_000_060);

        let logged = service.events();
        let last = logged.last().unwrap();
        assert_eq!(last.timestamp, 1_800_000_060);
        assert_eq!(last.sequence, service.last_sequence());
    }

    // =============================================================================
    // CONCURRENT CALLERS
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_attesters_counted_once_each() {
        let (service, _, _) = create_service();
        service
            .submit(OWNER, RegistryCall::AddTrustedPublisher { account: PUBLISHER })
            .await
            .unwrap();

        let verifiers: Vec<Identity> = (1..=16u8)
            .map(|i| {
                let mut bytes = [0xF0; 20];
                bytes[19] = i;
                Identity::new(bytes)
            })
            .collect();
        for verifier in &verifiers {
            service
                .submit(OWNER, RegistryCall::AddTrustedVerifier { account: *verifier })
                .await
                .unwrap();
        }
        service.submit(PUBLISHER, publish(5)).await.unwrap();

        // Every verifier attests twice, concurrently.
        let mut handles = Vec::new();
        for verifier in verifiers.iter().chain(verifiers.iter()).copied() {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .submit(
                        verifier,
                        RegistryCall::VerifyArticle {
                            article_id: ArticleId::FIRST,
                        },
                    )
                    .await
            }));
        }

        let mut accepted = 0;
        let mut repeated = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(err) => {
                    assert_eq!(
                        err.registry_error().map(|e| e.kind()),
                        Some(RegistryErrorKind::AlreadyAttested)
                    );
                    repeated += 1;
                }
            }
        }

        assert_eq!(accepted, 16);
        assert_eq!(repeated, 16);
        let status = service.check_article_verification(ArticleId::FIRST.into());
        assert!(status.is_verified);
        assert_eq!(status.verifier_count, 16);
        assert_eq!(service.stats().attestations_recorded, 16);
    }

    // =============================================================================
    // DEPLOY → PERSIST → EXERCISE
    // =============================================================================

    #[tokio::test]
    async fn test_node_bootstrap_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = NodeConfig::default();
        config.network.name = "staging".to_string();
        config.deployment.deployments_dir = dir.path().join("deployments");
        config.deployment.env_file = dir.path().join(".env");

        let deployment = deploy(&config);
        let record_path = persist(&deployment.record, &config).unwrap();
        assert!(record_path.ends_with("staging.json"));

        let record: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&record_path).unwrap()).unwrap();
        assert_eq!(record["owner"], config.registry.owner.to_hex());

        let env = std::fs::read_to_string(&config.deployment.env_file).unwrap();
        assert!(env
            .lines()
            .any(|l| l == format!("{ADDRESS_ENV_KEY}={}", deployment.address.to_hex())));

        let mut dead_letters = deployment
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::DeadLetterQueue]));
        let roles = DevRoles::with_owner(config.registry.owner);
        let report = run_exercise(&deployment.service, &roles).await.unwrap();

        assert_eq!(report.article_id, ArticleId::FIRST);
        assert!(report.article.has_attested(&roles.verifier1));
        assert!(report.article.has_attested(&roles.verifier2));
        assert!(!deployment.service.is_trusted_publisher(&roles.reader));
        assert!(dead_letters.drain().is_empty());
        assert_eq!(deployment.service.events().len(), 6);
    }
}
