//! HTTP adapter for the spreadsheet relay.
//!
//! `GET {path}` lists rows, `POST {path}` appends one, and
//! `PUT {path}/{id}` with `{"id": .., "<field>": ..}` overwrites a field.
//! Any non-2xx answer is a failure; the relay's error bodies are not
//! interpreted beyond being carried in the message.

use std::time::Duration;

use serde_json::{json, Value};

use crate::config::StoreConfig;
use crate::error::TaskboardError;
use crate::store::schema::type_name;
use crate::store::{RemoteStore, Resource, StoreError};

#[derive(Debug, Clone)]
pub struct HttpStore {
    http: reqwest::Client,
    base_url: String,
    tasks_path: String,
    projects_path: String,
}

impl HttpStore {
    pub fn from_config(config: &StoreConfig) -> Result<Self, TaskboardError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("taskboard/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TaskboardError::config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            tasks_path: config.tasks_path.clone(),
            projects_path: config.projects_path.clone(),
        })
    }

    pub fn resource_url(&self, resource: Resource) -> String {
        let path = match resource {
            Resource::Tasks => &self.tasks_path,
            Resource::Projects => &self.projects_path,
        };
        format!("{}{}", self.base_url, path)
    }

    fn record_url(&self, resource: Resource, id: &str) -> String {
        format!("{}/{}", self.resource_url(resource), urlencoding::encode(id))
    }
}

impl RemoteStore for HttpStore {
    async fn fetch_all(&self, resource: Resource) -> Result<Vec<Value>, StoreError> {
        let url = self.resource_url(resource);
        tracing::debug!(%url, resource = resource.as_str(), "fetching rows");
        let resp = check_response(self.http.get(&url).send().await?).await?;
        let body = resp.text().await?;
        parse_rows(&body)
    }

    async fn append_one(
        &self,
        resource: Resource,
        record: Value,
    ) -> Result<Option<Value>, StoreError> {
        let url = self.resource_url(resource);
        tracing::debug!(%url, resource = resource.as_str(), "appending row");
        let resp = check_response(self.http.post(&url).json(&record).send().await?).await?;
        let body = resp.text().await?;
        Ok(parse_append_ack(&body))
    }

    async fn update_field(
        &self,
        resource: Resource,
        id: &str,
        field: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let url = self.record_url(resource, id);
        tracing::debug!(%url, field, value, "updating field");
        let mut body = json!({ "id": id });
        body[field] = json!(value);
        check_response(self.http.put(&url).json(&body).send().await?).await?;
        Ok(())
    }
}

/// Return the response unchanged on 2xx, otherwise [`StoreError::Api`] with
/// the status and body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    if !resp.status().is_success() {
        return Err(StoreError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

fn parse_rows(body: &str) -> Result<Vec<Value>, StoreError> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Array(rows)) => Ok(rows),
        Ok(other) => Err(StoreError::Parse(format!(
            "expected a JSON array of rows, got {}",
            type_name(&other)
        ))),
        Err(e) => Err(StoreError::Parse(e.to_string())),
    }
}

/// An append answer is either the stored row or a bare acknowledgement
/// (empty body, other JSON, or plain text). The row was accepted either way
/// since the status was 2xx; only an echoed object is kept.
fn parse_append_ack(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(value @ Value::Object(_)) => Some(value),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, body, "append acknowledged with a non-JSON body");
            None
        }
    }
}
