use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::legal::{
    CaseDetail, CaseSearchRequest, CaseSummary, CitationCheckRequest, CitationCheckResult, Statute, StatuteQuery,
};
use crate::models::Page;

/// Case law, statutes and citation checking.
pub trait LegalResearchApi {
    fn search_cases(&self, input: &CaseSearchRequest) -> Result<Page<CaseSummary>, ApiError>;

    fn get_case(&self, case_id: &str) -> Result<CaseDetail, ApiError>;

    fn search_statutes(&self, query: &StatuteQuery) -> Result<Page<Statute>, ApiError>;

    fn verify_citations(&self, input: &CitationCheckRequest) -> Result<CitationCheckResult, ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct LegalResearchService<'a> {
    client: &'a ApiClient,
}

impl<'a> LegalResearchService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl LegalResearchApi for LegalResearchService<'_> {
    fn search_cases(&self, input: &CaseSearchRequest) -> Result<Page<CaseSummary>, ApiError> {
        if let (Some(after), Some(before)) = (input.decided_after, input.decided_before) {
            if after > before {
                return Err(ApiError::InvalidRequest(format!(
                    "decided_after {after} is later than decided_before {before}"
                )));
            }
        }
        self.client
            .send_json(HttpMethod::Post, &["v1", "legal", "cases", "search"], input, 200)
    }

    fn get_case(&self, case_id: &str) -> Result<CaseDetail, ApiError> {
        self.client.get(&["v1", "legal", "cases", case_id], &[])
    }

    fn search_statutes(&self, query: &StatuteQuery) -> Result<Page<Statute>, ApiError> {
        self.client.get(&["v1", "legal", "statutes"], &query.to_query())
    }

    fn verify_citations(&self, input: &CitationCheckRequest) -> Result<CitationCheckResult, ApiError> {
        if input.citations.is_empty() {
            return Err(ApiError::InvalidRequest("no citations to verify".into()));
        }
        self.client
            .send_json(HttpMethod::Post, &["v1", "legal", "citations", "verify"], input, 200)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::services::test_support::{client_returning, client_without_calls};

    #[test]
    fn statutes_use_query_string() {
        let client = client_returning(
            |req| {
                req.method == HttpMethod::Get
                    && req.url == "http://api.test/v1/legal/statutes?q=non-compete&jurisdiction=us-ca&limit=3"
            },
            200,
            r#"{"data":[{"id":"st_1","title":"Contracts in restraint of trade","code":"BPC","section":"16600","jurisdiction":"us-ca","text":"..."}]}"#,
        );
        let page = client
            .legal()
            .search_statutes(&StatuteQuery::new("non-compete").with_jurisdiction("us-ca").with_limit(3u32))
            .unwrap();
        assert_eq!(page.data[0].section, "16600");
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let client = client_without_calls();
        let req = CaseSearchRequest::new("estoppel")
            .with_decided_after(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
            .with_decided_before(NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
        assert!(matches!(client.legal().search_cases(&req), Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn empty_citation_list_is_rejected() {
        let client = client_without_calls();
        let req = CitationCheckRequest::new(Vec::<String>::new());
        assert!(matches!(client.legal().verify_citations(&req), Err(ApiError::InvalidRequest(_))));
    }
}
