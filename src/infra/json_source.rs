//! File-backed content source.
//!
//! Reads a JSON array of content records once and answers list queries from
//! memory, newest first.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use crate::application::source::{ContentQuery, ContentSource, SourceError};
use crate::domain::content::ContentRecord;

use super::error::InfraError;

pub struct JsonFileSource {
    records: Vec<ContentRecord>,
}

impl JsonFileSource {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, InfraError> {
        let path = path.as_ref();
        let raw = tokio::fs::read(path).await?;
        let records: Vec<ContentRecord> = serde_json::from_slice(&raw)
            .map_err(|err| InfraError::decode(path, err.to_string()))?;

        info!(path = %path.display(), records = records.len(), "Loaded content source");
        Ok(Self::from_records(records))
    }

    pub fn from_records(mut records: Vec<ContentRecord>) -> Self {
        records.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ContentSource for JsonFileSource {
    async fn fetch(&self, query: &ContentQuery) -> Result<Vec<ContentRecord>, SourceError> {
        let niche = query.niche();
        let limit = usize::try_from(query.limit()).unwrap_or(usize::MAX);

        Ok(self
            .records
            .iter()
            .filter(|record| niche.is_none_or(|niche| record.niche == niche))
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::content::Niche;

    fn record(id: &str, niche: Niche, published_at: i64) -> ContentRecord {
        ContentRecord {
            id: id.to_string(),
            title: id.to_uppercase(),
            slug: id.to_string(),
            niche,
            published_at,
            summary: None,
            url: None,
            source_name: None,
        }
    }

    fn ids(records: &[ContentRecord]) -> Vec<&str> {
        records.iter().map(|record| record.id.as_str()).collect()
    }

    #[tokio::test]
    async fn latest_is_newest_first_and_limited() {
        let source = JsonFileSource::from_records(vec![
            record("old", Niche::Tech, 1),
            record("new", Niche::Gaming, 3),
            record("mid", Niche::Security, 2),
        ]);

        let records = source
            .fetch(&ContentQuery::Latest { limit: 2 })
            .await
            .expect("fetch");
        assert_eq!(ids(&records), ["new", "mid"]);
    }

    #[tokio::test]
    async fn niche_query_filters() {
        let source = JsonFileSource::from_records(vec![
            record("s1", Niche::Security, 1),
            record("t1", Niche::Tech, 2),
            record("s2", Niche::Security, 3),
        ]);

        let records = source
            .fetch(&ContentQuery::ByNiche {
                niche: Niche::Security,
                limit: 10,
            })
            .await
            .expect("fetch");
        assert_eq!(ids(&records), ["s2", "s1"]);
    }

    #[tokio::test]
    async fn load_reads_json_array() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"[{{"id":"a1","title":"A","slug":"a","niche":"gaming","publishedAt":10}}]"#
        )
        .expect("write fixture");

        let source = JsonFileSource::load(file.path()).await.expect("load");
        assert_eq!(source.len(), 1);
    }

    #[tokio::test]
    async fn load_reports_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{not json").expect("write fixture");

        let err = JsonFileSource::load(file.path())
            .await
            .err()
            .expect("load should fail");
        assert!(matches!(err, InfraError::Decode { .. }));
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let err = JsonFileSource::load("/nonexistent/feedcache/content.json")
            .await
            .err()
            .expect("load should fail");
        assert!(matches!(err, InfraError::Io(_)));
    }
}
