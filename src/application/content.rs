//! Fetch-then-cache access to content lists.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::application::source::{ContentQuery, ContentSource, SourceError};
use crate::cache::ContentCache;
use crate::domain::content::{ContentRecord, Niche};

/// Serves content queries from the cache when possible, falling back to the
/// backend and memoizing successful results.
///
/// Concurrent misses on the same key each hit the backend; the last write
/// wins. Failed fetches are returned as-is and never cached.
pub struct CachedContentService {
    source: Arc<dyn ContentSource>,
    cache: Arc<ContentCache>,
}

impl CachedContentService {
    pub fn new(source: Arc<dyn ContentSource>, cache: Arc<ContentCache>) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    pub async fn latest(&self, limit: u32) -> Result<Vec<ContentRecord>, SourceError> {
        self.fetch(&ContentQuery::Latest { limit }).await
    }

    pub async fn by_niche(
        &self,
        niche: Niche,
        limit: u32,
    ) -> Result<Vec<ContentRecord>, SourceError> {
        self.fetch(&ContentQuery::ByNiche { niche, limit }).await
    }

    pub async fn fetch(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>, SourceError> {
        self.fetch_with_ttl(query, self.cache.default_ttl()).await
    }

    #[instrument(skip(self), fields(key = %query.cache_key()))]
    pub async fn fetch_with_ttl(
        &self,
        query: &ContentQuery,
        ttl: Duration,
    ) -> Result<Vec<ContentRecord>, SourceError> {
        let key = query.cache_key();

        if let Some(records) = self.cache.get::<Vec<ContentRecord>>(&key) {
            debug!(count = records.len(), "Served content from cache");
            return Ok(records);
        }

        let records = self.source.fetch(query).await?;
        debug!(count = records.len(), "Fetched content from source");
        self.cache.set_with_ttl(key, records.clone(), ttl);
        Ok(records)
    }
}
