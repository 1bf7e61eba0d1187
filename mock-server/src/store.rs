//! In-memory state behind the mock API.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::MockError;

pub const DEFAULT_PAGE_LIMIT: usize = 20;

pub type Db = Arc<RwLock<Store>>;

/// `?limit=&cursor=` accepted by every list route.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub limit: Option<usize>,
    pub cursor: Option<String>,
}

/// Rows kept in insertion order, addressed by their `"id"` field.
#[derive(Debug, Default)]
pub struct Table {
    rows: Vec<Value>,
}

impl Table {
    pub fn insert(&mut self, row: Value) -> Value {
        self.rows.push(row.clone());
        row
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.rows.iter().find(|r| r["id"] == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Value> {
        self.rows.iter_mut().find(|r| r["id"] == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Value> {
        let position = self.rows.iter().position(|r| r["id"] == id)?;
        Some(self.rows.remove(position))
    }

    /// Drop every row whose `field` equals `value`.
    pub fn remove_where(&mut self, field: &str, value: &str) {
        self.rows.retain(|r| r[field] != value);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.rows.iter()
    }
}

/// Slice `rows` into one `{"data", "next_cursor"}` page.
///
/// The cursor is the id of the last row of the previous page.
pub fn paginate<'a>(
    rows: impl IntoIterator<Item = &'a Value>,
    params: &PageParams,
) -> Result<Value, MockError> {
    let rows: Vec<&Value> = rows.into_iter().collect();
    let start = match &params.cursor {
        Some(cursor) => {
            rows.iter()
                .position(|r| r["id"] == cursor.as_str())
                .ok_or_else(|| MockError::BadRequest(format!("unknown cursor {cursor}")))?
                + 1
        }
        None => 0,
    };
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1);
    let page: Vec<Value> = rows.iter().skip(start).take(limit).map(|r| (*r).clone()).collect();
    let next_cursor = if start + page.len() < rows.len() {
        page.last().map(|r| r["id"].clone())
    } else {
        None
    };
    Ok(json!({ "data": page, "next_cursor": next_cursor }))
}

pub fn new_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

#[derive(Debug, Default)]
pub struct Store {
    pub agents: Table,
    pub runs: Table,
    pub jobs: Table,
    pub memories: Table,
    pub vaults: Table,
    pub objects: Table,
    pub webhooks: Table,
    pub workflows: Table,
    pub executions: Table,
    pub transactions: Table,
    /// Checkout sessions by idempotency key.
    pub checkouts: HashMap<String, Value>,
}

impl Store {
    /// A fresh store with the account's transaction history filled in.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        for (id, amount, kind, description, created_at) in [
            ("txn_1", 50_000, "charge", "Pro plan, March", "2026-03-01T00:00:00Z"),
            ("txn_2", -1_250, "usage", "OCR pages", "2026-03-04T12:30:00Z"),
            ("txn_3", -5_000, "refund", "Duplicate charge", "2026-03-06T09:15:00Z"),
        ] {
            store.transactions.insert(json!({
                "id": id,
                "amount": amount,
                "currency": "usd",
                "kind": kind,
                "description": description,
                "created_at": created_at,
            }));
        }
        store
    }

    pub fn shared() -> Db {
        Arc::new(RwLock::new(Store::seeded()))
    }
}
