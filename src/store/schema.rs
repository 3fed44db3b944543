//! Canonical wire shape of store rows.
//!
//! Field names follow the spreadsheet headers (`tarea`, `proyecto`, ...).
//! Every field is optional on the way in because sheet rows may be ragged.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::{Project, RecordId, StatusSet, SyncState, Task};
use crate::store::StoreError;

/// Name of the status column, the only field ever updated in place.
pub const STATUS_FIELD: &str = "estado";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(rename = "tarea", default)]
    pub title: Option<String>,
    #[serde(rename = "proyecto", default)]
    pub project: Option<String>,
    #[serde(rename = "responsable", default)]
    pub owner: Option<String>,
    #[serde(rename = "fechaInicio", default)]
    pub start_date: Option<String>,
    #[serde(rename = "fechaFin", default)]
    pub end_date: Option<String>,
    #[serde(rename = "fechaEjecucion", default)]
    pub executed_on: Option<String>,
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
}

impl TaskRecord {
    /// Outgoing row for an append: everything but the id.
    pub fn for_append(task: &Task) -> Self {
        Self {
            id: None,
            title: Some(task.title.clone()),
            project: Some(task.project.clone()),
            owner: Some(task.owner.clone()),
            start_date: Some(task.start_date.clone()),
            end_date: Some(task.end_date.clone()),
            executed_on: Some(task.executed_on.clone().unwrap_or_default()),
            status: Some(task.status.to_string()),
        }
    }

    pub fn into_task(self, statuses: &StatusSet) -> Task {
        let executed_on = self.executed_on.filter(|s| !s.trim().is_empty());
        Task {
            id: RecordId::from_store(self.id).unwrap_or_else(RecordId::local),
            title: self.title.unwrap_or_default(),
            project: self.project.unwrap_or_default(),
            owner: self.owner.unwrap_or_default(),
            start_date: self.start_date.unwrap_or_default(),
            end_date: self.end_date.unwrap_or_default(),
            executed_on,
            status: statuses.normalize(self.status.as_deref().unwrap_or_default()),
            sync: SyncState::Synced,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(
        default,
        deserialize_with = "deserialize_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(rename = "nombre", default)]
    pub name: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
}

impl ProjectRecord {
    pub fn for_append(project: &Project) -> Self {
        Self {
            id: None,
            name: Some(project.name.clone()),
            description: Some(project.description.clone()),
        }
    }

    pub fn into_project(self) -> Project {
        Project {
            id: RecordId::from_store(self.id).unwrap_or_else(RecordId::local),
            name: self.name.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        }
    }
}

/// Id assigned by the store in an append response, if it sent one.
pub fn assigned_id(response: Option<&Value>) -> Option<RecordId> {
    let raw = match response?.get("id")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    RecordId::from_store(Some(raw))
}

/// Decode one row. Only JSON objects are rows; serde would otherwise read an
/// array positionally and misplace every column.
pub fn decode_row<T: DeserializeOwned>(row: Value) -> Result<T, StoreError> {
    match row {
        Value::Object(_) => {
            serde_json::from_value(row).map_err(|e| StoreError::Parse(e.to_string()))
        }
        other => Err(StoreError::Parse(format!(
            "expected a JSON object row, got {}",
            type_name(&other)
        ))),
    }
}

/// Encode an outgoing row.
pub fn encode_row<T: Serialize>(record: &T) -> Result<Value, StoreError> {
    serde_json::to_value(record).map_err(|e| StoreError::Parse(e.to_string()))
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
