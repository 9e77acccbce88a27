//! Scripted end-to-end run against a freshly deployed registry.
//!
//! Trusts one publisher and two verifiers, publishes one article, has both
//! verifiers attest to it, and records the verification status after each
//! step.

use crate::accounts::DevRoles;
use provenance_registry::{
    Article, CallOutcome, RegistryCall, RegistryService, ServiceError, VerificationStatus,
};
use shared_types::{ArticleId, ContentFingerprint};
use thiserror::Error;
use tracing::info;

/// Content hash the script publishes.
pub const SAMPLE_CONTENT: &[u8] = b"Test article content hash";
/// `SAMPLE_CONTENT` right-padded to 32 bytes.
pub const SAMPLE_FINGERPRINT: ContentFingerprint =
    ContentFingerprint::new(right_pad(SAMPLE_CONTENT));
/// Metadata pointer the script publishes.
pub const SAMPLE_METADATA_URI: &str = "ipfs://test-metadata-uri";

/// Exercise failures.
#[derive(Debug, Error)]
pub enum ExerciseError {
    /// A scripted call was refused.
    #[error("{step}: {source}")]
    Step {
        /// Which step failed.
        step: &'static str,
        /// Why.
        #[source]
        source: ServiceError,
    },

    /// Publishing did not return an identifier.
    #[error("publish returned {0:?} instead of an article id")]
    UnexpectedOutcome(CallOutcome),
}

/// Everything the script observed.
#[derive(Debug, Clone)]
pub struct ExerciseReport {
    /// The published article.
    pub article_id: ArticleId,
    /// Status after publish, after the first and after the second attestation.
    pub statuses: Vec<(&'static str, VerificationStatus)>,
    /// Final article snapshot.
    pub article: Article,
}

/// Fails const evaluation if `bytes` is longer than 32.
const fn right_pad(bytes: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut i = 0;
    while i < bytes.len() {
        out[i] = bytes[i];
        i += 1;
    }
    out
}

fn step(step: &'static str) -> impl FnOnce(ServiceError) -> ExerciseError {
    move |source| ExerciseError::Step { step, source }
}

/// Run the scripted scenario as `roles`.
pub async fn run_exercise(
    service: &RegistryService,
    roles: &DevRoles,
) -> Result<ExerciseReport, ExerciseError> {
    info!(publisher = %roles.publisher, "Adding trusted publisher");
    service
        .submit(
            roles.owner,
            RegistryCall::AddTrustedPublisher {
                account: roles.publisher,
            },
        )
        .await
        .map_err(step("add publisher"))?;

    info!(verifier1 = %roles.verifier1, verifier2 = %roles.verifier2, "Adding trusted verifiers");
    for verifier in [roles.verifier1, roles.verifier2] {
        service
            .submit(roles.owner, RegistryCall::AddTrustedVerifier { account: verifier })
            .await
            .map_err(step("add verifier"))?;
    }

    let outcome = service
        .submit(
            roles.publisher,
            RegistryCall::PublishArticle {
                content_fingerprint: SAMPLE_FINGERPRINT,
                metadata_pointer: SAMPLE_METADATA_URI.to_string(),
            },
        )
        .await
        .map_err(step("publish"))?;
    let article_id = outcome
        .article_id()
        .ok_or(ExerciseError::UnexpectedOutcome(outcome))?;
    info!(%article_id, "Article published");

    let mut statuses = vec![(
        "initial",
        service.check_article_verification(article_id.into()),
    )];

    for (label, verifier) in [
        ("after first verifier", roles.verifier1),
        ("after second verifier", roles.verifier2),
    ] {
        service
            .submit(verifier, RegistryCall::VerifyArticle { article_id })
            .await
            .map_err(step("verify"))?;
        statuses.push((label, service.check_article_verification(article_id.into())));
    }

    let article = service
        .get_article(article_id.into())
        .map_err(|e| step("get article")(e.into()))?;

    Ok(ExerciseReport {
        article_id,
        statuses,
        article,
    })
}
