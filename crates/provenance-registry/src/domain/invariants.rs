//! # Domain Invariants
//!
//! Properties that MUST hold at every observable point of the registry.
//! Each check is a pure function over a state snapshot; `check_all_invariants`
//! collects every violation found.
//!
//! - Fingerprint uniqueness (one article per fingerprint)
//! - Attester count equals the size of the attestation list
//! - An article is verified exactly when it has at least one attester
//! - No identity attests to the same article twice
//! - The fingerprint index agrees with the primary map
//! - Attestation lists only grow, verification never reverts

use super::access::AccessControl;
use super::entities::Article;
use super::ledger::ArticleLedger;
use super::value_objects::ArticleKey;
use crate::domain::registry::ProvenanceRegistry;
use crate::ports::outbound::EventSink;
use shared_types::{ArticleId, Identity};
use std::collections::HashSet;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// No two articles share a fingerprint.
#[must_use]
pub fn check_fingerprint_uniqueness(ledger: &ArticleLedger) -> bool {
    let mut seen = HashSet::with_capacity(ledger.len());
    ledger.iter().all(|a| seen.insert(a.content_fingerprint()))
}

/// `verifier_count` is the length of the attestation list.
#[must_use]
pub fn check_count_matches_attesters(article: &Article) -> bool {
    article.verifier_count() == article.attestations().len() as u64
}

/// Verified iff at least one attestation exists.
#[must_use]
pub fn check_verified_iff_attested(article: &Article) -> bool {
    article.is_verified() == !article.attestations().is_empty()
}

/// Each attester appears at most once.
#[must_use]
pub fn check_unique_attesters(article: &Article) -> bool {
    article.verifier_set().len() == article.attestations().len()
}

/// Every index entry points at an article carrying that fingerprint, and
/// every article is indexed.
#[must_use]
pub fn check_index_consistency(ledger: &ArticleLedger) -> bool {
    let index = ledger.fingerprint_index();
    index.len() == ledger.len()
        && index.iter().all(|(fp, id)| {
            ledger
                .get(ArticleKey::Id(*id))
                .is_some_and(|a| a.content_fingerprint() == *fp)
        })
}

/// Identifiers are dense from `ArticleId::FIRST` and below `next_id`.
#[must_use]
pub fn check_identifier_sequence(ledger: &ArticleLedger) -> bool {
    let mut expected = ArticleId::FIRST;
    for article in ledger.iter() {
        if article.id() != expected {
            return false;
        }
        expected = expected.next();
    }
    expected == ledger.next_id()
}

/// The owner is what it was at construction.
#[must_use]
pub fn check_owner_unchanged(access: &AccessControl, expected: Identity) -> bool {
    access.owner() == expected
}

/// A freshly constructed access list holds the owner in both trust sets.
#[must_use]
pub fn check_genesis_roles(access: &AccessControl) -> bool {
    let owner = access.owner();
    access.is_trusted_publisher(&owner) && access.is_trusted_verifier(&owner)
}

/// `after` is a legal successor of `before` for the same article.
///
/// The earlier attestation list must be a prefix of the later one and a
/// verified article stays verified.
#[must_use]
pub fn check_monotonic_growth(before: &Article, after: &Article) -> bool {
    before.id() == after.id()
        && after.attestations().starts_with(before.attestations())
        && (!before.is_verified() || after.is_verified())
}

/// Check all state invariants at once.
#[must_use]
pub fn check_all_invariants<S: EventSink>(registry: &ProvenanceRegistry<S>) -> InvariantCheckResult {
    let ledger = registry.ledger();
    let mut violations = Vec::new();

    if !check_fingerprint_uniqueness(ledger) {
        violations.push(InvariantViolation::DuplicateFingerprint);
    }

    if !check_index_consistency(ledger) {
        violations.push(InvariantViolation::IndexMismatch {
            indexed: ledger.fingerprint_index().len(),
            articles: ledger.len(),
        });
    }

    if !check_identifier_sequence(ledger) {
        violations.push(InvariantViolation::IdentifierGap {
            next_id: ledger.next_id(),
        });
    }

    for article in ledger.iter() {
        if !check_count_matches_attesters(article) {
            violations.push(InvariantViolation::CountMismatch { article: article.id() });
        }
        if !check_verified_iff_attested(article) {
            violations.push(InvariantViolation::VerificationFlagMismatch {
                article: article.id(),
                is_verified: article.is_verified(),
            });
        }
        if !check_unique_attesters(article) {
            violations.push(InvariantViolation::RepeatedAttester { article: article.id() });
        }
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Two articles carry the same fingerprint.
    DuplicateFingerprint,
    /// Fingerprint index and article map disagree.
    IndexMismatch {
        /// Index entries.
        indexed: usize,
        /// Articles stored.
        articles: usize,
    },
    /// Identifiers are not a dense sequence.
    IdentifierGap {
        /// The ledger's next identifier.
        next_id: ArticleId,
    },
    /// `verifier_count` differs from the attestation list length.
    CountMismatch {
        /// Offending article.
        article: ArticleId,
    },
    /// `is_verified` disagrees with the attestation list.
    VerificationFlagMismatch {
        /// Offending article.
        article: ArticleId,
        /// The stored flag.
        is_verified: bool,
    },
    /// An identity attested twice.
    RepeatedAttester {
        /// Offending article.
        article: ArticleId,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateFingerprint => write!(f, "fingerprint registered twice"),
            Self::IndexMismatch { indexed, articles } => {
                write!(f, "index mismatch: {indexed} indexed, {articles} articles")
            }
            Self::IdentifierGap { next_id } => {
                write!(f, "identifier sequence broken before {next_id}")
            }
            Self::CountMismatch { article } => {
                write!(f, "verifier count mismatch on {article}")
            }
            Self::VerificationFlagMismatch {
                article,
                is_verified,
            } => write!(f, "{article} has is_verified={is_verified} against its attesters"),
            Self::RepeatedAttester { article } => {
                write!(f, "repeated attester on {article}")
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Attestation;
    use shared_types::ContentFingerprint;

    fn article(id: u64, fp: u8) -> Article {
        Article::new(
            ArticleId(id),
            ContentFingerprint::new([fp; 32]),
            String::new(),
            Identity::new([1; 20]),
            0,
        )
    }

    fn attestation(byte: u8) -> Attestation {
        Attestation {
            verifier: Identity::new([byte; 20]),
            attested_at: 10,
            sequence: 1,
        }
    }

    #[test]
    fn test_fresh_article_passes_per_article_checks() {
        let a = article(1, 1);
        assert!(check_count_matches_attesters(&a));
        assert!(check_verified_iff_attested(&a));
        assert!(check_unique_attesters(&a));
    }

    #[test]
    fn test_flag_without_attesters_detected() {
        let mut a = article(1, 1);
        a.is_verified = true;
        assert!(!check_verified_iff_attested(&a));
    }

    #[test]
    fn test_repeated_attester_detected() {
        let mut a = article(1, 1);
        a.attestations.push(attestation(2));
        a.attestations.push(attestation(2));
        assert!(!check_unique_attesters(&a));
    }

    #[test]
    fn test_monotonic_growth() {
        let before = article(1, 1);
        let mut after = before.clone();
        after.record_attestation(attestation(2));
        assert!(check_monotonic_growth(&before, &after));
        assert!(!check_monotonic_growth(&after, &before));
    }

    #[test]
    fn test_ledger_checks_on_valid_ledger() {
        let mut ledger = ArticleLedger::new();
        ledger
            .insert(ContentFingerprint::new([1; 32]), "a".into(), Identity::ZERO, 0)
            .unwrap();
        ledger
            .insert(ContentFingerprint::new([2; 32]), "b".into(), Identity::ZERO, 0)
            .unwrap();
        assert!(check_fingerprint_uniqueness(&ledger));
        assert!(check_index_consistency(&ledger));
        assert!(check_identifier_sequence(&ledger));
    }

    #[test]
    fn test_genesis_roles() {
        let owner = Identity::new([7; 20]);
        let access = AccessControl::genesis(owner);
        assert!(check_genesis_roles(&access));
        assert!(check_owner_unchanged(&access, owner));
        assert!(!check_owner_unchanged(&access, Identity::ZERO));
    }

    #[test]
    fn test_violation_display() {
        let v = InvariantViolation::CountMismatch {
            article: ArticleId(4),
        };
        assert_eq!(v.to_string(), "verifier count mismatch on #4");
    }
}
