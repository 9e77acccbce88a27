//! # Value Objects
//!
//! Immutable domain primitives for the registry.
//! These types represent concepts that are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use shared_types::{ArticleId, ContentFingerprint};
use std::fmt;

// =============================================================================
// ROLES
// =============================================================================

/// A role an operation can require of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// The fixed administrative identity.
    Owner,
    /// Member of the publisher trust set.
    Publisher,
    /// Member of the verifier trust set.
    Verifier,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Owner => write!(f, "owner"),
            Self::Publisher => write!(f, "trusted publisher"),
            Self::Verifier => write!(f, "trusted verifier"),
        }
    }
}

// =============================================================================
// ADDRESSING
// =============================================================================

/// Either of the two ways an article can be addressed.
///
/// `Id` is the primary key. `Fingerprint` resolves through the uniqueness index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArticleKey {
    /// Sequential identifier assigned at publish.
    Id(ArticleId),
    /// Publisher-supplied content fingerprint.
    Fingerprint(ContentFingerprint),
}

impl fmt::Display for ArticleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Fingerprint(fp) => write!(f, "{fp}"),
        }
    }
}

impl From<ArticleId> for ArticleKey {
    fn from(id: ArticleId) -> Self {
        Self::Id(id)
    }
}

impl From<ContentFingerprint> for ArticleKey {
    fn from(fp: ContentFingerprint) -> Self {
        Self::Fingerprint(fp)
    }
}

// =============================================================================
// STATUS
// =============================================================================

/// Result of `check_article_verification`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerificationStatus {
    /// Whether the article exists.
    pub exists: bool,
    /// Whether at least one trusted verifier attested.
    pub is_verified: bool,
    /// Number of distinct attesters.
    pub verifier_count: u64,
}

impl VerificationStatus {
    /// Status reported for an unknown key.
    pub const ABSENT: Self = Self {
        exists: false,
        is_verified: false,
        verifier_count: 0,
    };
}

/// Per-article lifecycle state.
///
/// ```text
/// Unpublished ──publish──→ Unverified ──first attestation──→ Verified ─┐
///                                                              ↑       │
///                                                              └───────┘
///                                                       further attestations
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArticleStatus {
    /// No article under this key.
    Unpublished,
    /// Published, no attestations yet.
    Unverified,
    /// At least one attestation.
    Verified,
}

impl ArticleStatus {
    /// Whether `self → next` is an allowed transition.
    ///
    /// Self-loops on `Verified` are allowed (additional attestations);
    /// nothing ever moves backwards.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Unpublished, Self::Unverified)
                | (Self::Unverified, Self::Verified)
                | (Self::Verified, Self::Verified)
        )
    }
}

impl From<VerificationStatus> for ArticleStatus {
    fn from(status: VerificationStatus) -> Self {
        match (status.exists, status.is_verified) {
            (false, _) => Self::Unpublished,
            (true, false) => Self::Unverified,
            (true, true) => Self::Verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Owner.to_string(), "owner");
        assert_eq!(Role::Verifier.to_string(), "trusted verifier");
    }

    #[test]
    fn test_article_key_from() {
        let key: ArticleKey = ArticleId(3).into();
        assert_eq!(key, ArticleKey::Id(ArticleId(3)));
        let fp = ContentFingerprint::new([9; 32]);
        assert_eq!(ArticleKey::from(fp), ArticleKey::Fingerprint(fp));
    }

    #[test]
    fn test_status_transitions() {
        use ArticleStatus::*;
        assert!(Unpublished.can_transition_to(Unverified));
        assert!(Unverified.can_transition_to(Verified));
        assert!(Verified.can_transition_to(Verified));

        assert!(!Verified.can_transition_to(Unverified));
        assert!(!Unverified.can_transition_to(Unpublished));
        assert!(!Unpublished.can_transition_to(Verified));
        assert!(!Unverified.can_transition_to(Unverified));
    }

    #[test]
    fn test_status_from_verification() {
        assert_eq!(
            ArticleStatus::from(VerificationStatus::ABSENT),
            ArticleStatus::Unpublished
        );
        let verified = VerificationStatus {
            exists: true,
            is_verified: true,
            verifier_count: 2,
        };
        assert_eq!(ArticleStatus::from(verified), ArticleStatus::Verified);
    }
}
