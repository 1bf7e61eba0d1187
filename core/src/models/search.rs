use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SearchSource {
    Web,
    Cases,
    Statutes,
    Vault,
    Memory,
    #[serde(other)]
    Unknown,
}

/// Federated search; no `sources` means every source the key can read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SearchSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            sources: Vec::new(),
            limit: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: SearchSource) -> Self {
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
        self
    }
}

optional_setters!(SearchRequest {
    with_limit => limit: u32,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub source: SearchSource,
    pub title: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub total: u64,
}

impl SearchResults {
    pub fn from_source(&self, source: SearchSource) -> impl Iterator<Item = &SearchHit> {
        self.hits.iter().filter(move |h| h.source == source)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn sources_are_deduplicated() {
        let req = SearchRequest::new("force majeure pandemic")
            .with_source(SearchSource::Cases)
            .with_source(SearchSource::Cases)
            .with_source(SearchSource::Vault);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"query": "force majeure pandemic", "sources": ["cases", "vault"]})
        );
    }
}
