//! Layered configuration using figment.
//!
//! Sources, highest priority last:
//! 1. Built-in defaults
//! 2. `taskboard.toml` in the working directory
//! 3. Environment variables (`TASKBOARD_*`, `__` separates sections, so
//!    `TASKBOARD_STORE__BASE_URL` sets `store.base_url`)
//!
//! The CLI applies `--store-url` on top of the extracted value.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::TaskboardError;
use crate::models::{Status, StatusSet, COMPLETED, IN_PROGRESS, PENDING, REVIEW};

pub const CONFIG_FILE: &str = "taskboard.toml";
pub const ENV_PREFIX: &str = "TASKBOARD_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_tasks_path")]
    pub tasks_path: String,
    #[serde(default = "default_projects_path")]
    pub projects_path: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3000".into()
}

fn default_tasks_path() -> String {
    "/api/tareas".into()
}

fn default_projects_path() -> String {
    "/api/proyectos".into()
}

const fn default_timeout_secs() -> u64 {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            tasks_path: default_tasks_path(),
            projects_path: default_projects_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BoardConfig {
    #[serde(default = "default_statuses")]
    pub statuses: Vec<String>,
    #[serde(default = "default_status")]
    pub default_status: String,
}

fn default_statuses() -> Vec<String> {
    [PENDING, IN_PROGRESS, REVIEW, COMPLETED]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_status() -> String {
    PENDING.into()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            statuses: default_statuses(),
            default_status: default_status(),
        }
    }
}

impl BoardConfig {
    pub fn status_set(&self) -> Result<StatusSet, TaskboardError> {
        StatusSet::new(
            self.statuses.iter().map(|s| Status::new(s.as_str())).collect(),
            Status::new(self.default_status.as_str()),
        )
    }
}

/// What to do with a task whose status write-through failed for good.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Revert to the last status the store acknowledged.
    #[default]
    Rollback,
    /// Keep the local status and only flag the task.
    Flag,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rollback => "rollback",
            Self::Flag => "flag",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Extra attempts for a failed status update.
    #[serde(default = "default_update_retries")]
    pub update_retries: u32,
    #[serde(default)]
    pub on_failure: FailurePolicy,
}

const fn default_update_retries() -> u32 {
    1
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            update_retries: default_update_retries(),
            on_failure: FailurePolicy::default(),
        }
    }
}

impl Config {
    /// Load from defaults, `taskboard.toml` and `TASKBOARD_*` variables.
    pub fn load() -> Result<Self, TaskboardError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Same as [`Config::load`], reading a `.env` file from the working
    /// directory first when there is one.
    pub fn load_with_dotenv() -> Result<Self, TaskboardError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let local_path = PathBuf::from(CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(&self) -> Result<(), TaskboardError> {
        if self.store.base_url.trim().is_empty() {
            return Err(TaskboardError::config("store.base_url must not be empty"));
        }
        for (field, path) in [
            ("store.tasks_path", &self.store.tasks_path),
            ("store.projects_path", &self.store.projects_path),
        ] {
            if !path.starts_with('/') {
                return Err(TaskboardError::config(format!(
                    "{field} must start with '/', got '{path}'"
                )));
            }
        }
        if self.store.timeout_secs == 0 {
            return Err(TaskboardError::config("store.timeout_secs must be greater than 0"));
        }
        self.board.status_set()?;
        Ok(())
    }

    pub fn with_store_url(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url {
            self.store.base_url = url.to_string();
        }
        self
    }

    /// Write the defaults to `dir/taskboard.toml` unless the file exists.
    /// Returns the path and whether it was created.
    pub fn write_default(dir: &Path) -> Result<(PathBuf, bool), TaskboardError> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            return Ok((path, false));
        }
        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| TaskboardError::config(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| TaskboardError::config(e.to_string()))?;
        Ok((path, true))
    }
}
