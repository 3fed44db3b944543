//! Boundary to the spreadsheet-backed list store.
//!
//! The store is a key-less list per resource: list everything, append one
//! row, overwrite one field of a row. It never retries; callers decide.

pub mod error;
#[cfg(test)]
pub(crate) mod fake;
pub mod http;
pub mod schema;

pub use error::StoreError;
pub use http::HttpStore;

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Tasks,
    Projects,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Projects => "projects",
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    /// All rows of `resource`, in store order.
    async fn fetch_all(&self, resource: Resource) -> Result<Vec<Value>, StoreError>;

    /// Append one row. Returns the stored row when the store echoes one back,
    /// `None` for a bare acknowledgement.
    async fn append_one(&self, resource: Resource, record: Value)
        -> Result<Option<Value>, StoreError>;

    async fn update_field(
        &self,
        resource: Resource,
        id: &str,
        field: &str,
        value: &str,
    ) -> Result<(), StoreError>;
}
