//! Drafts for the "new task" and "new project" forms.
//!
//! A draft is only cleared after the store accepted the record, so a
//! validation or network failure never loses what the user typed.

use crate::board::{ProjectCollection, TaskCollection};
use crate::error::TaskboardError;
use crate::models::{NewProject, NewTask, Project, Task};
use crate::store::RemoteStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Title,
    Project,
    Owner,
    StartDate,
    EndDate,
    ExecutedOn,
    Status,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    fields: NewTask,
}

impl TaskDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: TaskField, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match field {
            TaskField::Title => self.fields.title = value,
            TaskField::Project => self.fields.project = value,
            TaskField::Owner => self.fields.owner = value,
            TaskField::StartDate => self.fields.start_date = value,
            TaskField::EndDate => self.fields.end_date = value,
            TaskField::ExecutedOn => self.fields.executed_on = Some(value),
            TaskField::Status => self.fields.status = Some(value),
        }
        self
    }

    pub fn fields(&self) -> &NewTask {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields == NewTask::default()
    }

    pub fn clear(&mut self) {
        self.fields = NewTask::default();
    }

    pub async fn submit<S: RemoteStore>(
        &mut self,
        tasks: &mut TaskCollection<S>,
    ) -> Result<Task, TaskboardError> {
        let task = tasks.append(&self.fields).await?;
        self.clear();
        Ok(task)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Name,
    Description,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    fields: NewProject,
}

impl ProjectDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: ProjectField, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        match field {
            ProjectField::Name => self.fields.name = value,
            ProjectField::Description => self.fields.description = value,
        }
        self
    }

    pub fn fields(&self) -> &NewProject {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields == NewProject::default()
    }

    pub fn clear(&mut self) {
        self.fields = NewProject::default();
    }

    pub async fn submit<S: RemoteStore>(
        &mut self,
        projects: &mut ProjectCollection<S>,
    ) -> Result<Project, TaskboardError> {
        let project = projects.append(&self.fields).await?;
        self.clear();
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SyncConfig;
    use crate::models::StatusSet;
    use crate::store::fake::FakeStore;

    fn tasks(store: FakeStore) -> TaskCollection<FakeStore> {
        TaskCollection::new(store, StatusSet::default(), SyncConfig::default())
    }

    fn filled() -> TaskDraft {
        let mut draft = TaskDraft::new();
        draft
            .set(TaskField::Title, "Draft report")
            .set(TaskField::Project, "P1")
            .set(TaskField::Owner, "Ada")
            .set(TaskField::StartDate, "2024-01-01")
            .set(TaskField::EndDate, "2024-01-05");
        draft
    }

    #[tokio::test]
    async fn successful_submit_clears_draft() {
        let mut collection = tasks(FakeStore::default());
        let mut draft = filled();

        let task = draft.submit(&mut collection).await.unwrap();
        assert_eq!(task.title, "Draft report");
        assert!(draft.is_empty());
        assert_eq!(collection.len(), 1);
    }

    #[tokio::test]
    async fn validation_failure_keeps_draft() {
        let mut collection = tasks(FakeStore::default());
        let mut draft = filled();
        draft.set(TaskField::Owner, "");

        let err = draft.submit(&mut collection).await.unwrap_err();
        assert_eq!(err.fields, vec!["responsable"]);
        assert_eq!(draft.fields().title, "Draft report");
        assert_eq!(collection.store().append_calls.get(), 0);
    }

    #[tokio::test]
    async fn network_failure_keeps_draft() {
        let store = FakeStore::default();
        store.fail_append.set(true);
        let mut collection = tasks(store);
        let mut draft = filled();

        let err = draft.submit(&mut collection).await.unwrap_err();
        assert_eq!(err.code.as_str(), "APPEND_ERROR");
        assert!(!draft.is_empty());
    }

    #[tokio::test]
    async fn project_draft_round() {
        let mut projects = ProjectCollection::new(FakeStore::default());
        let mut draft = ProjectDraft::new();

        draft.set(ProjectField::Description, "Sin nombre");
        assert!(draft.submit(&mut projects).await.is_err());
        assert_eq!(draft.fields().description, "Sin nombre");

        draft.set(ProjectField::Name, "Web");
        let project = draft.submit(&mut projects).await.unwrap();
        assert_eq!(project.name, "Web");
        assert!(draft.is_empty());
    }
}
