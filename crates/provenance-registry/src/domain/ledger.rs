//! # Article Ledger
//!
//! Owns every published article. Articles are keyed by a sequential
//! `ArticleId`; a fingerprint index enforces content uniqueness and lets
//! callers look articles up by fingerprint as well.

use super::entities::Article;
use super::value_objects::{ArticleKey, VerificationStatus};
use crate::errors::RegistryError;
use shared_types::{ArticleId, ContentFingerprint, Identity};
use std::collections::{BTreeMap, HashMap};

/// Collection of published articles plus the fingerprint index.
#[derive(Debug, Clone)]
pub struct ArticleLedger {
    articles: BTreeMap<ArticleId, Article>,
    by_fingerprint: HashMap<ContentFingerprint, ArticleId>,
    next_id: ArticleId,
}

impl Default for ArticleLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleLedger {
    /// Empty ledger; the first article gets `ArticleId::FIRST`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            articles: BTreeMap::new(),
            by_fingerprint: HashMap::new(),
            next_id: ArticleId::FIRST,
        }
    }

    /// `DuplicateContent` if `fingerprint` is already registered.
    pub fn ensure_unique(&self, fingerprint: &ContentFingerprint) -> Result<(), RegistryError> {
        match self.by_fingerprint.get(fingerprint) {
            Some(existing) => Err(RegistryError::DuplicateContent {
                fingerprint: *fingerprint,
                existing: *existing,
            }),
            None => Ok(()),
        }
    }

    /// Create a new article and return its identifier.
    ///
    /// Runs the uniqueness check itself, so a duplicate never reaches the maps.
    pub(crate) fn insert(
        &mut self,
        fingerprint: ContentFingerprint,
        metadata_pointer: String,
        publisher: Identity,
        created_at: u64,
    ) -> Result<ArticleId, RegistryError> {
        self.ensure_unique(&fingerprint)?;

        let id = self.next_id;
        let article = Article::new(id, fingerprint, metadata_pointer, publisher, created_at);
        self.articles.insert(id, article);
        self.by_fingerprint.insert(fingerprint, id);
        self.next_id = id.next();
        Ok(id)
    }

    /// Map any key to the primary identifier.
    #[must_use]
    pub fn resolve(&self, key: ArticleKey) -> Option<ArticleId> {
        match key {
            ArticleKey::Id(id) => self.articles.contains_key(&id).then_some(id),
            ArticleKey::Fingerprint(fp) => self.by_fingerprint.get(&fp).copied(),
        }
    }

    /// Look up an article by either key.
    #[must_use]
    pub fn get(&self, key: ArticleKey) -> Option<&Article> {
        self.resolve(key).and_then(|id| self.articles.get(&id))
    }

    /// Look up an article or fail with `NotFound`.
    pub fn require(&self, key: ArticleKey) -> Result<&Article, RegistryError> {
        self.get(key).ok_or(RegistryError::NotFound(key))
    }

    pub(crate) fn get_mut(&mut self, id: ArticleId) -> Option<&mut Article> {
        self.articles.get_mut(&id)
    }

    /// `(exists, is_verified, verifier_count)`; never fails.
    #[must_use]
    pub fn verification_status(&self, key: ArticleKey) -> VerificationStatus {
        self.get(key)
            .map_or(VerificationStatus::ABSENT, Article::verification_status)
    }

    /// Articles in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Article> {
        self.articles.values()
    }

    /// Number of articles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether nothing has been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Identifier the next publish will receive.
    #[must_use]
    pub fn next_id(&self) -> ArticleId {
        self.next_id
    }

    /// Fingerprint index entries (for consistency checks).
    pub(crate) fn fingerprint_index(&self) -> &HashMap<ContentFingerprint, ArticleId> {
        &self.by_fingerprint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBLISHER: Identity = Identity::new([1; 20]);

    fn fp(byte: u8) -> ContentFingerprint {
        ContentFingerprint::new([byte; 32])
    }

    #[test]
    fn test_sequential_identifiers() {
        let mut ledger = ArticleLedger::new();
        let a = ledger.insert(fp(1), "a".into(), PUBLISHER, 10).unwrap();
        let b = ledger.insert(fp(2), "b".into(), PUBLISHER, 11).unwrap();
        assert_eq!(a, ArticleId(1));
        assert_eq!(b, ArticleId(2));
        assert_eq!(ledger.next_id(), ArticleId(3));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_duplicate_fingerprint_rejected_without_change() {
        let mut ledger = ArticleLedger::new();
        let id = ledger.insert(fp(1), "a".into(), PUBLISHER, 10).unwrap();

        let err = ledger.insert(fp(1), "other".into(), PUBLISHER, 11).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateContent {
                fingerprint: fp(1),
                existing: id
            }
        );
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.next_id(), ArticleId(2));
        assert_eq!(ledger.get(id.into()).unwrap().metadata_pointer(), "a");
    }

    #[test]
    fn test_lookup_by_either_key() {
        let mut ledger = ArticleLedger::new();
        let id = ledger.insert(fp(7), "x".into(), PUBLISHER, 10).unwrap();
        assert_eq!(ledger.resolve(ArticleKey::Fingerprint(fp(7))), Some(id));
        assert_eq!(
            ledger.get(ArticleKey::Id(id)),
            ledger.get(ArticleKey::Fingerprint(fp(7)))
        );
    }

    #[test]
    fn test_missing_article() {
        let ledger = ArticleLedger::new();
        let key = ArticleKey::Id(ArticleId(42));
        assert_eq!(ledger.resolve(key), None);
        assert_eq!(ledger.require(key).unwrap_err(), RegistryError::NotFound(key));
        assert_eq!(ledger.verification_status(key), VerificationStatus::ABSENT);
    }
}
