use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::database::{QueryRequest, QueryResult, TableInfo};
use crate::models::Page;

/// Managed SQL database access.
pub trait DatabaseApi {
    fn execute_query(&self, input: &QueryRequest) -> Result<QueryResult, ApiError>;

    /// Tables of `database`, or of the account's default database.
    fn list_tables(&self, database: Option<&str>) -> Result<Page<TableInfo>, ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct DatabaseService<'a> {
    client: &'a ApiClient,
}

impl<'a> DatabaseService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl DatabaseApi for DatabaseService<'_> {
    fn execute_query(&self, input: &QueryRequest) -> Result<QueryResult, ApiError> {
        if input.sql.trim().is_empty() {
            return Err(ApiError::InvalidRequest("query needs SQL text".into()));
        }
        self.client
            .send_json(HttpMethod::Post, &["v1", "database", "query"], input, 200)
    }

    fn list_tables(&self, database: Option<&str>) -> Result<Page<TableInfo>, ApiError> {
        let query: Vec<(&str, String)> = database
            .map(|db| vec![("database", db.to_string())])
            .unwrap_or_default();
        self.client.get(&["v1", "database", "tables"], &query)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::services::test_support::{client_returning, json_body};

    #[test]
    fn execute_query_sends_params() {
        let client = client_returning(
            |req| {
                req.url == "http://api.test/v1/database/query"
                    && json_body(req) == json!({"sql": "select count(*) from matters where open = $1", "params": [true]})
            },
            200,
            r#"{"columns":[{"name":"count","data_type":"bigint"}],"rows":[[12]],"row_count":1,"elapsed_ms":3}"#,
        );
        let result = client
            .database()
            .execute_query(&QueryRequest::new("select count(*) from matters where open = $1").with_param(true))
            .unwrap();
        assert_eq!(result.rows, vec![vec![json!(12)]]);
    }

    #[test]
    fn list_tables_names_database() {
        let client = client_returning(
            |req| req.url == "http://api.test/v1/database/tables?database=billing",
            200,
            r#"{"data":[{"name":"invoices","row_count":40}]}"#,
        );
        let page = client.database().list_tables(Some("billing")).unwrap();
        assert_eq!(page.data[0].name, "invoices");
    }
}
