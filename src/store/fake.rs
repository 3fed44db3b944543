//! In-memory store used by unit tests. Counts calls and fails on request.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use serde_json::{json, Value};

use crate::store::{RemoteStore, Resource, StoreError};

#[derive(Default)]
pub struct FakeStore {
    pub rows: RefCell<HashMap<Resource, Vec<Value>>>,
    pub fetch_calls: Cell<usize>,
    pub append_calls: Cell<usize>,
    pub update_calls: Cell<usize>,
    pub fail_fetch: Cell<bool>,
    pub fail_append: Cell<bool>,
    /// Number of upcoming `update_field` calls that fail.
    pub failing_updates: Cell<u32>,
    /// When set, appends echo the row back with a fresh numeric id.
    pub assign_ids: Cell<bool>,
    /// `(id, field, value)` of every successful update, in arrival order.
    pub updates: RefCell<Vec<(String, String, String)>>,
}

impl FakeStore {
    pub fn with_tasks(rows: Vec<Value>) -> Self {
        let store = Self::default();
        store.rows.borrow_mut().insert(Resource::Tasks, rows);
        store
    }

    pub fn with_projects(rows: Vec<Value>) -> Self {
        let store = Self::default();
        store.rows.borrow_mut().insert(Resource::Projects, rows);
        store
    }

    pub fn row_count(&self, resource: Resource) -> usize {
        self.rows.borrow().get(&resource).map_or(0, Vec::len)
    }
}

fn api_error() -> StoreError {
    StoreError::Api {
        status: 500,
        message: "simulated failure".into(),
    }
}

impl RemoteStore for FakeStore {
    async fn fetch_all(&self, resource: Resource) -> Result<Vec<Value>, StoreError> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        if self.fail_fetch.get() {
            return Err(api_error());
        }
        Ok(self.rows.borrow().get(&resource).cloned().unwrap_or_default())
    }

    async fn append_one(
        &self,
        resource: Resource,
        mut record: Value,
    ) -> Result<Option<Value>, StoreError> {
        self.append_calls.set(self.append_calls.get() + 1);
        if self.fail_append.get() {
            return Err(api_error());
        }
        let mut rows = self.rows.borrow_mut();
        let table = rows.entry(resource).or_default();
        if self.assign_ids.get() {
            record["id"] = json!(table.len() + 100);
        }
        table.push(record.clone());
        Ok(self.assign_ids.get().then_some(record))
    }

    async fn update_field(
        &self,
        resource: Resource,
        id: &str,
        field: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        self.update_calls.set(self.update_calls.get() + 1);
        let failing = self.failing_updates.get();
        if failing > 0 {
            self.failing_updates.set(failing - 1);
            return Err(api_error());
        }
        let mut rows = self.rows.borrow_mut();
        let row = rows
            .entry(resource)
            .or_default()
            .iter_mut()
            .find(|row| match row.get("id") {
                Some(Value::String(s)) => s == id,
                Some(Value::Number(n)) => n.to_string() == id,
                _ => false,
            })
            .ok_or_else(|| StoreError::Api {
                status: 404,
                message: format!("no row {id}"),
            })?;
        row[field] = json!(value);
        self.updates
            .borrow_mut()
            .push((id.to_string(), field.to_string(), value.to_string()));
        Ok(())
    }
}
