use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::search::{SearchRequest, SearchResults};

/// Federated search across research sources and the caller's own data.
pub trait SearchApi {
    fn search(&self, input: &SearchRequest) -> Result<SearchResults, ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct SearchService<'a> {
    client: &'a ApiClient,
}

impl<'a> SearchService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl SearchApi for SearchService<'_> {
    fn search(&self, input: &SearchRequest) -> Result<SearchResults, ApiError> {
        if input.query.trim().is_empty() {
            return Err(ApiError::InvalidRequest("search query is empty".into()));
        }
        self.client.send_json(HttpMethod::Post, &["v1", "search"], input, 200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::search::SearchSource;
    use crate::services::test_support::client_returning;

    #[test]
    fn hits_grouped_by_source() {
        let client = client_returning(
            |req| req.url == "http://api.test/v1/search",
            200,
            r#"{"query":"lease","total":2,"hits":[
                {"id":"c1","source":"cases","title":"Doe v. Roe","score":0.8},
                {"id":"v1","source":"vault","title":"lease.pdf","score":0.7}
            ]}"#,
        );
        let results = client.search().search(&SearchRequest::new("lease")).unwrap();
        assert_eq!(results.from_source(SearchSource::Vault).count(), 1);
        assert_eq!(results.total, 2);
    }
}
