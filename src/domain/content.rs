//! Content records as served by the content backend.
//!
//! The cache stores these opaquely; only the service layer and the JSON
//! source look inside.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Editorial vertical a piece of content belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Niche {
    Tech,
    Security,
    Gaming,
}

impl Niche {
    pub fn as_str(self) -> &'static str {
        match self {
            Niche::Tech => "tech",
            Niche::Security => "security",
            Niche::Gaming => "gaming",
        }
    }
}

impl fmt::Display for Niche {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Niche {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tech" => Ok(Niche::Tech),
            "security" => Ok(Niche::Security),
            "gaming" => Ok(Niche::Gaming),
            other => Err(DomainError::validation(format!("unknown niche `{other}`"))),
        }
    }
}

/// A single published item (article, advisory, review).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub niche: Niche,
    /// Milliseconds since the Unix epoch.
    pub published_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn niche_parses_case_insensitively() {
        assert_eq!("Security".parse::<Niche>().expect("niche"), Niche::Security);
        assert_eq!(" gaming ".parse::<Niche>().expect("niche"), Niche::Gaming);
        assert!(matches!(
            "cooking".parse::<Niche>(),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn record_uses_camel_case_fields() {
        let json = r#"{
            "id": "a1",
            "title": "Kernel patch lands",
            "slug": "kernel-patch-lands",
            "niche": "tech",
            "publishedAt": 1700000000000,
            "sourceName": "LWN"
        }"#;

        let record: ContentRecord = serde_json::from_str(json).expect("record should parse");
        assert_eq!(record.niche, Niche::Tech);
        assert_eq!(record.published_at, 1_700_000_000_000);
        assert_eq!(record.source_name.as_deref(), Some("LWN"));
        assert!(record.summary.is_none());

        let encoded = serde_json::to_value(&record).expect("record should encode");
        assert!(encoded.get("publishedAt").is_some());
        assert!(encoded.get("summary").is_none());
    }
}
