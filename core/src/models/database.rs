use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parameterised SQL statement. Parameters bind positionally to `$1`, `$2`, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub sql: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl QueryRequest {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            database: None,
        }
    }

    #[must_use]
    pub fn with_param(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }
}

optional_setters!(QueryRequest {
    with_database => database: String,
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Vec<Value>>,
    pub row_count: u64,
    #[serde(default)]
    pub elapsed_ms: u64,
}

impl QueryResult {
    /// Index of the column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Values of one column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().filter_map(|row| row.get(index)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    pub row_count: u64,
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn params_are_positional() {
        let req = QueryRequest::new("select * from matters where client = $1 and open = $2")
            .with_param("Acme")
            .with_param(true);
        assert_eq!(serde_json::to_value(&req).unwrap()["params"], json!(["Acme", true]));
    }

    #[test]
    fn column_lookup() {
        let result: QueryResult = serde_json::from_value(json!({
            "columns": [{"name": "id", "data_type": "int"}, {"name": "title", "data_type": "text"}],
            "rows": [[1, "NDA"], [2, "MSA"]],
            "row_count": 2
        }))
        .unwrap();
        assert_eq!(result.column("title").unwrap(), vec![&json!("NDA"), &json!("MSA")]);
        assert!(result.column("missing").is_none());
        assert_eq!(result.elapsed_ms, 0);
    }
}
