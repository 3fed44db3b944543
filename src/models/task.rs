use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use ulid::Ulid;

use crate::error::TaskboardError;
use crate::models::{Status, StatusSet};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identity of a task or project row.
///
/// `Remote` ids come from the store. `Local` ids are opaque placeholders for
/// rows the store has not identified; they are never sent back to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    Remote(String),
    Local(Ulid),
}

impl RecordId {
    pub fn local() -> Self {
        Self::Local(Ulid::new())
    }

    /// Store id from a raw record value; blank ids count as absent.
    pub fn from_store(raw: Option<String>) -> Option<Self> {
        raw.map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(Self::Remote)
    }

    pub fn remote(&self) -> Option<&str> {
        match self {
            Self::Remote(id) => Some(id),
            Self::Local(_) => None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Remote(_))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(id) => f.write_str(id),
            Self::Local(ulid) => write!(f, "local-{ulid}"),
        }
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Where a task's status stands relative to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SyncState {
    Synced,
    PendingSync { last_known_good: Status },
    SyncFailed { last_known_good: Status },
}

impl SyncState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Synced => "synced",
            Self::PendingSync { .. } => "pending_sync",
            Self::SyncFailed { .. } => "sync_failed",
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::SyncFailed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: RecordId,
    pub title: String,
    pub project: String,
    pub owner: String,
    pub start_date: String,
    pub end_date: String,
    pub executed_on: Option<String>,
    pub status: Status,
    pub sync: SyncState,
}

impl Task {
    /// The status the store is believed to hold for this task.
    pub fn last_known_good(&self) -> &Status {
        match &self.sync {
            SyncState::Synced => &self.status,
            SyncState::PendingSync { last_known_good }
            | SyncState::SyncFailed { last_known_good } => last_known_good,
        }
    }
}

/// Unvalidated input for a new task.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub project: String,
    pub owner: String,
    pub start_date: String,
    pub end_date: String,
    pub executed_on: Option<String>,
    pub status: Option<String>,
}

impl NewTask {
    /// Check required fields and dates, producing a task with a local
    /// placeholder id. Nothing here touches the store.
    pub fn validate(&self, statuses: &StatusSet) -> Result<Task, TaskboardError> {
        let required = [
            ("tarea", self.title.trim()),
            ("proyecto", self.project.trim()),
            ("responsable", self.owner.trim()),
            ("fechaInicio", self.start_date.trim()),
            ("fechaFin", self.end_date.trim()),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.is_empty())
            .map(|(field, _)| *field)
            .collect();
        if !missing.is_empty() {
            return Err(TaskboardError::missing_fields(&missing));
        }

        let start = parse_date("fechaInicio", &self.start_date)?;
        let end = parse_date("fechaFin", &self.end_date)?;
        if end < start {
            return Err(TaskboardError::invalid_field(
                "fechaFin",
                format!("fechaFin ({end}) is before fechaInicio ({start})"),
            ));
        }

        let executed_on = self
            .executed_on
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if let Some(executed) = executed_on {
            parse_date("fechaEjecucion", executed)?;
        }

        Ok(Task {
            id: RecordId::local(),
            title: self.title.trim().to_string(),
            project: self.project.trim().to_string(),
            owner: self.owner.trim().to_string(),
            start_date: self.start_date.trim().to_string(),
            end_date: self.end_date.trim().to_string(),
            executed_on: executed_on.map(str::to_string),
            status: statuses.normalize(self.status.as_deref().unwrap_or_default()),
            sync: SyncState::Synced,
        })
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, TaskboardError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        TaskboardError::invalid_field(
            field,
            format!("{field} must be a date in YYYY-MM-DD format, got '{}'", value.trim()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewTask {
        NewTask {
            title: "Draft report".into(),
            project: "P1".into(),
            owner: "Ada".into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-01-05".into(),
            ..Default::default()
        }
    }

    #[test]
    fn status_defaults_to_pending() {
        let task = sample().validate(&StatusSet::default()).unwrap();
        assert_eq!(task.status.as_str(), "Pendiente");
        assert!(!task.id.is_confirmed());
        assert_eq!(task.sync, SyncState::Synced);
    }

    #[test]
    fn missing_fields_are_listed() {
        let draft = NewTask {
            title: "  ".into(),
            owner: String::new(),
            ..sample()
        };
        let err = draft.validate(&StatusSet::default()).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.fields, vec!["tarea", "responsable"]);
    }

    #[test]
    fn end_before_start_rejected() {
        let draft = NewTask {
            end_date: "2023-12-31".into(),
            ..sample()
        };
        let err = draft.validate(&StatusSet::default()).unwrap_err();
        assert_eq!(err.fields, vec!["fechaFin"]);
    }

    #[test]
    fn malformed_execution_date_rejected() {
        let draft = NewTask {
            executed_on: Some("yesterday".into()),
            ..sample()
        };
        let err = draft.validate(&StatusSet::default()).unwrap_err();
        assert_eq!(err.fields, vec!["fechaEjecucion"]);
    }

    #[test]
    fn blank_execution_date_is_none() {
        let draft = NewTask {
            executed_on: Some(" ".into()),
            status: Some("Completada".into()),
            ..sample()
        };
        let task = draft.validate(&StatusSet::default()).unwrap();
        assert_eq!(task.executed_on, None);
        assert_eq!(task.status.as_str(), "Completada");
    }

    #[test]
    fn blank_store_id_is_absent() {
        assert_eq!(RecordId::from_store(Some(" ".into())), None);
        assert_eq!(
            RecordId::from_store(Some("7".into())),
            Some(RecordId::Remote("7".into()))
        );
    }

    #[test]
    fn last_known_good_follows_sync_state() {
        let mut task = sample().validate(&StatusSet::default()).unwrap();
        task.status = Status::from("Completada");
        task.sync = SyncState::PendingSync {
            last_known_good: Status::from("Pendiente"),
        };
        assert_eq!(task.last_known_good().as_str(), "Pendiente");
    }
}
