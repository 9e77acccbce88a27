//! # Registry Events
//!
//! Defines all event types that flow through the shared bus.
//! Every committed registry mutation produces exactly one of these.

use serde::{Deserialize, Serialize};
use shared_types::entities::{ArticleId, ContentFingerprint, Identity};

/// All events that can be published to the event bus.
///
/// Events are notifications for external observers; nothing inside the
/// registry reads them back for correctness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    // =========================================================================
    // ACCESS CONTROL
    // =========================================================================
    /// An identity was added to the publisher trust set.
    PublisherAdded {
        /// The trusted identity.
        account: Identity,
    },

    /// An identity was removed from the publisher trust set.
    PublisherRemoved {
        /// The no-longer-trusted identity.
        account: Identity,
    },

    /// An identity was added to the verifier trust set.
    VerifierAdded {
        /// The trusted identity.
        account: Identity,
    },

    /// An identity was removed from the verifier trust set.
    VerifierRemoved {
        /// The no-longer-trusted identity.
        account: Identity,
    },

    // =========================================================================
    // ARTICLES
    // =========================================================================
    /// A new article was registered.
    ArticlePublished {
        /// Assigned identifier.
        article_id: ArticleId,
        /// Fingerprint of the off-ledger content.
        content_fingerprint: ContentFingerprint,
        /// The publishing identity.
        publisher: Identity,
        /// Ledger time of publication.
        created_at: u64,
    },

    /// A trusted verifier attested to an article.
    ArticleVerified {
        /// The attested article.
        article_id: ArticleId,
        /// The attesting identity.
        verifier: Identity,
        /// Attester count after this attestation.
        verifier_count: u64,
    },

    // =========================================================================
    // CRITICAL EVENTS (DLQ)
    // =========================================================================
    /// Critical error requiring operator attention.
    CriticalError {
        /// Component that encountered the error.
        component: String,
        /// Error description.
        error: String,
    },
}

impl RegistryEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::PublisherAdded { .. }
            | Self::PublisherRemoved { .. }
            | Self::VerifierAdded { .. }
            | Self::VerifierRemoved { .. } => EventTopic::AccessControl,
            Self::ArticlePublished { .. } | Self::ArticleVerified { .. } => EventTopic::Articles,
            Self::CriticalError { .. } => EventTopic::DeadLetterQueue,
        }
    }

    /// Event name as shown to observers.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::PublisherAdded { .. } => "PublisherAdded",
            Self::PublisherRemoved { .. } => "PublisherRemoved",
            Self::VerifierAdded { .. } => "VerifierAdded",
            Self::VerifierRemoved { .. } => "VerifierRemoved",
            Self::ArticlePublished { .. } => "ArticlePublished",
            Self::ArticleVerified { .. } => "ArticleVerified",
            Self::CriticalError { .. } => "CriticalError",
        }
    }

    /// The article this event concerns, if any.
    #[must_use]
    pub fn article_id(&self) -> Option<ArticleId> {
        match self {
            Self::ArticlePublished { article_id, .. } | Self::ArticleVerified { article_id, .. } => {
                Some(*article_id)
            }
            _ => None,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Trust-list changes.
    AccessControl,
    /// Publication and attestation.
    Articles,
    /// Dead Letter Queue for critical errors.
    DeadLetterQueue,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Articles to include. Empty means all articles (and non-article events).
    pub articles: Vec<ArticleId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            articles: Vec::new(),
        }
    }

    /// Create a filter for events about specific articles.
    #[must_use]
    pub fn for_articles(articles: Vec<ArticleId>) -> Self {
        Self {
            topics: vec![EventTopic::Articles],
            articles,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &RegistryEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let article_match = self.articles.is_empty()
            || event
                .article_id()
                .is_some_and(|id| self.articles.contains(&id));

        topic_match && article_match
    }
}
