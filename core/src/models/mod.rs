//! Request and response DTOs, one module per service.
//!
//! Conventions shared by every module:
//! - wire names are snake_case, matching the Rust field names;
//! - request DTOs omit `None` fields and empty collections from the JSON;
//! - request DTOs take required fields in `new` and optional ones through
//!   `with_*` mutators;
//! - response enums fall back to `Unknown` for values this SDK predates.

use serde::{Deserialize, Serialize};

/// Generates `with_*` mutators that set an `Option` field.
macro_rules! optional_setters {
    ($ty:ident { $($method:ident => $field:ident: $fty:ty),* $(,)? }) => {
        impl $ty {
            $(
                #[doc = concat!("Sets `", stringify!($field), "`.")]
                #[must_use]
                pub fn $method(mut self, value: impl Into<$fty>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )*
        }
    };
}

pub mod agents;
pub mod compute;
pub mod database;
pub mod format;
pub mod legal;
pub mod llm;
pub mod memory;
pub mod ocr;
pub mod payments;
pub mod privilege;
pub mod search;
pub mod vault;
pub mod voice;
pub mod webhooks;
pub mod workflows;

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// Pagination parameters accepted by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

optional_setters!(ListParams {
    with_limit => limit: u32,
    with_cursor => cursor: String,
});

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue from the page that `page` ended on.
    pub fn after<T>(page: &Page<T>) -> Option<Self> {
        page.next_cursor.as_ref().map(|c| Self::new().with_cursor(c.clone()))
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(cursor) = &self.cursor {
            query.push(("cursor", cursor.clone()));
        }
        query
    }
}
