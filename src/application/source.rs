//! The content backend as seen from this crate: an opaque query service
//! returning lists of records.

use async_trait::async_trait;
use thiserror::Error;

use crate::cache::query_key;
use crate::domain::content::{ContentRecord, Niche};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("content backend unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// A list query against the content backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentQuery {
    /// Most recent items across every niche.
    Latest { limit: u32 },
    /// Most recent items within one niche.
    ByNiche { niche: Niche, limit: u32 },
}

impl ContentQuery {
    pub fn limit(&self) -> u32 {
        match self {
            ContentQuery::Latest { limit } | ContentQuery::ByNiche { limit, .. } => *limit,
        }
    }

    pub fn niche(&self) -> Option<Niche> {
        match self {
            ContentQuery::Latest { .. } => None,
            ContentQuery::ByNiche { niche, .. } => Some(*niche),
        }
    }

    /// Cache key namespaced by query name and arguments.
    pub fn cache_key(&self) -> String {
        match self {
            ContentQuery::Latest { limit } => query_key("latestContent", [limit.to_string()]),
            ContentQuery::ByNiche { niche, limit } => {
                query_key("contentByNiche", [niche.to_string(), limit.to_string()])
            }
        }
    }
}

#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>, SourceError>;
}
