use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ValidationError,
    FetchError,
    AppendError,
    UpdateError,
    TaskNotFound,
    AmbiguousRef,
    InvalidMove,
    ConfigError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::FetchError => "FETCH_ERROR",
            Self::AppendError => "APPEND_ERROR",
            Self::UpdateError => "UPDATE_ERROR",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::AmbiguousRef => "AMBIGUOUS_REF",
            Self::InvalidMove => "INVALID_MOVE",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TaskboardError {
    pub code: ErrorCode,
    pub message: String,
    /// Offending field names, only populated for validation failures.
    pub fields: Vec<String>,
}

impl TaskboardError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn missing_fields(fields: &[&str]) -> Self {
        Self {
            code: ErrorCode::ValidationError,
            message: format!("Missing required fields: {}", fields.join(", ")),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationError,
            message: message.into(),
            fields: vec![field.to_string()],
        }
    }

    pub fn fetch(resource: &str, e: &StoreError) -> Self {
        Self::new(
            ErrorCode::FetchError,
            format!("Failed to load {resource}: {e}"),
        )
    }

    pub fn append(resource: &str, e: &StoreError) -> Self {
        Self::new(
            ErrorCode::AppendError,
            format!("Failed to add to {resource}: {e}"),
        )
    }

    pub fn update(id: &str, message: impl std::fmt::Display) -> Self {
        Self::new(
            ErrorCode::UpdateError,
            format!("Failed to sync status of task {id}: {message}"),
        )
    }

    pub fn task_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::TaskNotFound,
            format!("Task not found: {reference}"),
        )
    }

    pub fn ambiguous_ref(reference: &str, candidates: &[String]) -> Self {
        Self::new(
            ErrorCode::AmbiguousRef,
            format!(
                "Ambiguous reference '{}'. Candidates: {}",
                reference,
                candidates.join(", ")
            ),
        )
    }

    pub fn invalid_move(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidMove, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn is_validation(&self) -> bool {
        self.code == ErrorCode::ValidationError
    }
}

impl From<figment::Error> for TaskboardError {
    fn from(e: figment::Error) -> Self {
        Self::config(e.to_string())
    }
}
