use serde::Serialize;

use crate::error::TaskboardError;
use crate::models::RecordId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: RecordId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
}

impl NewProject {
    pub fn validate(&self) -> Result<Project, TaskboardError> {
        if self.name.trim().is_empty() {
            return Err(TaskboardError::missing_fields(&["nombre"]));
        }
        Ok(Project {
            id: RecordId::local(),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}
