use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TaskboardError;

pub const PENDING: &str = "Pendiente";
pub const IN_PROGRESS: &str = "En Progreso";
pub const REVIEW: &str = "Revisión";
pub const COMPLETED: &str = "Completada";

/// A task status as stored in the `estado` column. Any non-empty value is
/// accepted; values outside the configured set become ad-hoc board columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(String);

impl Status {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Status {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The configured board statuses, in column order, plus the status given to
/// tasks that arrive without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSet {
    statuses: Vec<Status>,
    default_status: Status,
}

impl StatusSet {
    pub fn new(statuses: Vec<Status>, default_status: Status) -> Result<Self, TaskboardError> {
        if statuses.is_empty() {
            return Err(TaskboardError::config("At least one board status is required"));
        }
        if let Some(blank) = statuses.iter().position(Status::is_empty) {
            return Err(TaskboardError::config(format!(
                "Board status #{} is empty",
                blank + 1
            )));
        }
        for (i, status) in statuses.iter().enumerate() {
            if statuses[..i].contains(status) {
                return Err(TaskboardError::config(format!(
                    "Duplicate board status '{status}'"
                )));
            }
        }
        if !statuses.contains(&default_status) {
            return Err(TaskboardError::config(format!(
                "Default status '{default_status}' is not one of the board statuses"
            )));
        }
        Ok(Self {
            statuses,
            default_status,
        })
    }

    pub fn statuses(&self) -> &[Status] {
        &self.statuses
    }

    pub fn default_status(&self) -> &Status {
        &self.default_status
    }

    pub fn contains(&self, status: &Status) -> bool {
        self.statuses.contains(status)
    }

    /// Map a raw `estado` value to a status, falling back to the default for
    /// blank input.
    pub fn normalize(&self, raw: &str) -> Status {
        let status = Status::new(raw);
        if status.is_empty() {
            self.default_status.clone()
        } else {
            status
        }
    }
}

impl Default for StatusSet {
    fn default() -> Self {
        Self {
            statuses: [PENDING, IN_PROGRESS, REVIEW, COMPLETED]
                .into_iter()
                .map(Status::from)
                .collect(),
            default_status: Status::from(PENDING),
        }
    }
}
