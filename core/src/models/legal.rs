use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSearchRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub court: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_after: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_before: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl CaseSearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            jurisdiction: None,
            court: None,
            decided_after: None,
            decided_before: None,
            limit: None,
        }
    }
}

optional_setters!(CaseSearchRequest {
    with_jurisdiction => jurisdiction: String,
    with_court => court: String,
    with_decided_after => decided_after: NaiveDate,
    with_decided_before => decided_before: NaiveDate,
    with_limit => limit: u32,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub id: String,
    pub name: String,
    pub citation: String,
    pub court: String,
    pub jurisdiction: String,
    #[serde(default)]
    pub decided_on: Option<NaiveDate>,
    #[serde(default)]
    pub snippet: Option<String>,
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDetail {
    pub id: String,
    pub name: String,
    pub citation: String,
    pub court: String,
    pub jurisdiction: String,
    #[serde(default)]
    pub decided_on: Option<NaiveDate>,
    #[serde(default)]
    pub judges: Vec<String>,
    pub opinion_text: String,
    #[serde(default)]
    pub cited_by_count: u32,
}

/// Full-text statute lookup, sent as query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatuteQuery {
    pub q: String,
    pub jurisdiction: Option<String>,
    pub limit: Option<u32>,
}

impl StatuteQuery {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![("q", self.q.clone())];
        if let Some(jurisdiction) = &self.jurisdiction {
            query.push(("jurisdiction", jurisdiction.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}

optional_setters!(StatuteQuery {
    with_jurisdiction => jurisdiction: String,
    with_limit => limit: u32,
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statute {
    pub id: String,
    pub title: String,
    pub code: String,
    pub section: String,
    pub jurisdiction: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationCheckRequest {
    pub citations: Vec<String>,
}

impl CitationCheckRequest {
    pub fn new<I, S>(citations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            citations: citations.into_iter().map(Into::into).collect(),
        }
    }
}

/// How later decisions have treated a cited case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Treatment {
    GoodLaw,
    Distinguished,
    Questioned,
    Overruled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationStatus {
    pub citation: String,
    pub valid: bool,
    pub treatment: Treatment,
    #[serde(default)]
    pub case_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationCheckResult {
    pub results: Vec<CitationStatus>,
}

impl CitationCheckResult {
    /// Citations that did not resolve or are no longer good law.
    pub fn problems(&self) -> impl Iterator<Item = &CitationStatus> {
        self.results
            .iter()
            .filter(|s| !s.valid || matches!(s.treatment, Treatment::Overruled | Treatment::Questioned))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn case_search_dates_are_iso() {
        let req = CaseSearchRequest::new("implied warranty")
            .with_jurisdiction("us-ny")
            .with_decided_after(NaiveDate::from_ymd_opt(2015, 1, 1).unwrap());
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"query": "implied warranty", "jurisdiction": "us-ny", "decided_after": "2015-01-01"})
        );
    }

    #[test]
    fn statute_query_pairs() {
        let query = StatuteQuery::new("trade secret").with_jurisdiction("us-ca").to_query();
        assert_eq!(
            query,
            vec![("q", "trade secret".to_string()), ("jurisdiction", "us-ca".to_string())]
        );
    }

    #[test]
    fn problems_lists_invalid_and_overruled() {
        let result: CitationCheckResult = serde_json::from_value(json!({"results": [
            {"citation": "1 U.S. 1", "valid": true, "treatment": "good_law"},
            {"citation": "2 U.S. 2", "valid": true, "treatment": "overruled"},
            {"citation": "bogus", "valid": false, "treatment": "unknown"}
        ]}))
        .unwrap();
        let problems: Vec<_> = result.problems().map(|s| s.citation.as_str()).collect();
        assert_eq!(problems, vec!["2 U.S. 2", "bogus"]);
    }
}
